//! COP 곡선 표본과 운전점.
use heatpump_recovery_toolbox::chart::{generate, nearest_sample, ChartPoint, SweepAxis};
use heatpump_recovery_toolbox::heat_pump::{OperatingMode, RecoveryType};
use heatpump_recovery_toolbox::system::{SimulationState, Topology};

#[test]
fn air_source_curve_has_gap_below_evaporation_limit() {
    let state = SimulationState::preset(Topology::Parallel, OperatingMode::Water);
    let chart = generate(&state, None);
    assert_eq!(chart.axis, SweepAxis::SourceTemperature);
    assert_eq!(chart.points.len(), 13);
    // -20°C 외기는 증발 -28°C
    assert_eq!(chart.points[0].x, -20.0);
    assert!(chart.points[0].cop.is_none());
    assert!(chart.points[1..].iter().all(|p| p.cop.is_some()));
    // 열원 온도가 오르면 COP도 오른다
    let cops: Vec<f64> = chart.points.iter().filter_map(|p| p.cop).collect();
    assert!(cops.windows(2).all(|w| w[0] <= w[1]));

    let nearest = chart.nearest_to_operating_point().expect("sample near -5°C");
    assert_eq!(nearest.x, -5.0);
    assert_eq!(chart.operating_point.cop, nearest.cop);
}

#[test]
fn steam_curve_stops_at_compressor_limit() {
    let state = SimulationState::preset(Topology::Coupled, OperatingMode::Steam);
    let chart = generate(&state, None);
    assert_eq!(chart.axis, SweepAxis::SaturationPressure);
    assert_eq!(chart.points.len(), 12);
    assert!(chart.points[0].cop.is_some());
    assert!(chart.points[11].cop.is_none(), "1.2 MPa exceeds 185°C condensing");
    let nearest = chart.nearest_to_operating_point().expect("sample near 0.5 MPa");
    assert!((nearest.x - 0.5).abs() < 1e-12);
}

#[test]
fn recovery_curve_uses_fixed_absorption_cop() {
    let state = SimulationState {
        flue_out_c: 40.0,
        load_in_c: 20.0,
        target: 90.0,
        load_out_c: 90.0,
        recovery_type: RecoveryType::Absorption,
        ..SimulationState::preset(Topology::Recovery, OperatingMode::Water)
    };
    let chart = generate(&state, Some(3.5));
    assert_eq!(chart.axis, SweepAxis::TargetFlueOutlet);
    assert_eq!(chart.points.len(), 11);
    assert!(chart.points.iter().all(|p| p.cop == Some(1.70)));
    // 운전점은 실제(수동) COP를 그대로 쓴다
    assert_eq!(chart.operating_point.x, 40.0);
    assert_eq!(chart.operating_point.cop, Some(3.5));
}

#[test]
fn nearest_sample_respects_tolerance() {
    let points = [
        ChartPoint { x: 30.0, cop: Some(2.0) },
        ChartPoint { x: 35.0, cop: None },
        ChartPoint { x: 40.0, cop: Some(2.4) },
    ];
    assert_eq!(nearest_sample(&points, 38.0, 2.5).map(|p| p.x), Some(40.0));
    assert_eq!(nearest_sample(&points, 36.0, 2.5).map(|p| p.x), Some(35.0));
    assert!(nearest_sample(&points, 50.0, 2.5).is_none());
}
