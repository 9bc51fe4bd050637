//! 토폴로지별 전체 시뮬레이션 시나리오.
use heatpump_recovery_toolbox::boiler::{Co2Override, FuelType};
use heatpump_recovery_toolbox::heat_pump::{OperatingMode, RecoveryType};
use heatpump_recovery_toolbox::limits::{EngineError, Outcome, SoftLimit};
use heatpump_recovery_toolbox::physics::{estimate_enthalpy, saturation_temperature_from_pressure};
use heatpump_recovery_toolbox::system::{
    simulate, DecisionTier, LimitReason, LoadKind, SimulationResult, SimulationState, SourceKind,
    StateError, Topology, Winner,
};
use heatpump_recovery_toolbox::units::Co2FactorUnit;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.4} got {actual:.4} (diff {diff:.4}, tol {tol})"
    );
}

fn completed(state: &SimulationState) -> Box<SimulationResult> {
    match simulate(state).expect("valid state") {
        Outcome::Completed(result) => result,
        Outcome::Limited(run) => panic!("unexpected limit: {}", run.limit),
    }
}

/// 천연가스 2000 kW 보일러 배연을 흡수식으로 40°C까지 회수해 20→90°C 온수를 만든다.
fn absorption_hot_water() -> SimulationState {
    SimulationState {
        flue_in_c: 130.0,
        flue_out_c: 40.0,
        load_in_c: 20.0,
        load_out_c: 90.0,
        target: 90.0,
        recovery_type: RecoveryType::Absorption,
        ..SimulationState::preset(Topology::Recovery, OperatingMode::Water)
    }
}

#[test]
fn absorption_recovery_is_source_limited() {
    let result = completed(&absorption_hot_water());
    assert_eq!(result.cop, 1.70);
    assert!(!result.cop_is_manual);
    assert_eq!(result.limit_reason, Some(LimitReason::SourceLimited));

    let source = result.source.expect("flue gas potential");
    assert_close("source total", source.total_kw, 148.70, 0.01);
    // Q_src * COP / (COP - 1)
    assert_close("recovered", result.recovered_heat_kw, 361.13, 0.01);
    assert!(result.recovered_heat_kw <= 2000.0);
    assert_close("drive", result.drive_energy_kw, 361.13 / 1.7, 0.01);

    // 열원을 모두 썼으므로 배연은 목표 출구까지 내려간다
    assert_eq!(result.request.source, SourceKind::FlueGas);
    assert_eq!(result.request.source_out_c, 40.0);
    assert_eq!(result.request.load, LoadKind::HotWater);
    assert_eq!(result.request.load_out_c, 90.0);
}

#[test]
fn absorption_recovery_economics() {
    let result = completed(&absorption_hot_water());
    assert_close("baseline", result.baseline_cost_per_hour, 869.57, 0.01);
    assert!(result.annual_saving > 0.0);
    assert!(result.payback_years < 4.0, "payback {}", result.payback_years);
    assert_eq!(result.decision.winner, Winner::HeatPump);
    assert_eq!(result.decision.tier, DecisionTier::Strong);
    assert!(result.co2_reduction_rate > 0.0);
    assert!(result.primary_energy_ratio > 1.0);
    assert_close(
        "steam tons",
        result.steam_tons.heat_pump + result.steam_tons.boiler,
        result.steam_tons.total,
        1e-9,
    );
    let coupling = result.coupling.expect("coupling data");
    assert!(coupling.site_efficiency_after > coupling.site_efficiency_before);

    // 구동열은 같은 보일러 연료로 만든다
    let recovered = result.recovered_heat_kw;
    let drive_fuel_kw = result.drive_energy_kw / 0.92;
    let saved_m3 = recovered / 0.92 * 3.6 / 36.0;
    let drive_m3 = drive_fuel_kw * 3.6 / 36.0;
    assert_close(
        "cost per hour",
        result.cost_per_hour,
        result.baseline_cost_per_hour - (saved_m3 * 4.0 - drive_m3 * 4.0),
        1e-6,
    );
    assert_close(
        "primary energy ratio",
        result.primary_energy_ratio,
        recovered / (drive_fuel_kw * 1.05),
        1e-9,
    );
}

#[test]
fn compression_recovery_drive_is_electric() {
    let state = SimulationState {
        recovery_type: RecoveryType::Mvr,
        ..absorption_hot_water()
    };
    let result = completed(&state);
    // 증발 35°C, 응축 95°C
    assert_eq!(result.cop, 2.76);
    assert_close("lift", result.lift_k, 60.0, 1e-9);
    assert_eq!(result.limit_reason, Some(LimitReason::SourceLimited));

    let recovered = result.recovered_heat_kw;
    let drive = result.drive_energy_kw;
    assert_close("recovered", recovered, 148.70 * 2.76 / 1.76, 0.05);
    assert_close("drive", drive, recovered / 2.76, 1e-9);
    assert_close("drive kW", drive, 84.5, 0.05);

    let saved_m3 = recovered / 0.92 * 3.6 / 36.0;
    let electric_cost = drive * 0.7;
    assert_close(
        "cost per hour",
        result.cost_per_hour,
        result.baseline_cost_per_hour - (saved_m3 * 4.0 - electric_cost),
        1e-6,
    );
    assert_close(
        "annual saving",
        result.annual_saving,
        (saved_m3 * 4.0 - electric_cost) * state.annual_hours,
        1e-6,
    );
    assert_close(
        "primary energy ratio",
        result.primary_energy_ratio,
        recovered / (drive * 2.5),
        1e-9,
    );

    let baseline_co2 = result.baseline_co2_kg_per_hour;
    assert_close(
        "baseline co2",
        baseline_co2,
        2000.0 / 0.92 * 0.1 * 2.02,
        1e-6,
    );
    assert_close(
        "co2 reduction",
        result.co2_reduction_rate,
        (saved_m3 * 2.02 - drive * 0.58) / baseline_co2 * 100.0,
        1e-9,
    );

    // 전기 구동비는 연료 구동비와 달라야 한다
    let fuel_drive_cost = drive / 0.92 * 3.6 / 36.0 * 4.0;
    let fuel_based_cost = result.baseline_cost_per_hour - (saved_m3 * 4.0 - fuel_drive_cost);
    assert!(
        (result.cost_per_hour - fuel_based_cost).abs() > 1.0,
        "electric {} vs fuel {}",
        result.cost_per_hour,
        fuel_based_cost
    );
    let absorption = completed(&absorption_hot_water());
    assert!(result.primary_energy_ratio != absorption.primary_energy_ratio);
}

#[test]
fn cold_flue_gas_is_not_worth_recovering() {
    let state = SimulationState {
        flue_in_c: 50.0,
        ..absorption_hot_water()
    };
    let outcome = simulate(&state).expect("valid state");
    assert!(matches!(
        outcome.soft_limit(),
        Some(SoftLimit::FlueTooCold { .. })
    ));
}

#[test]
fn zero_enthalpy_span_is_a_soft_limit() {
    let state = SimulationState {
        load_in_c: 90.0,
        ..absorption_hot_water()
    };
    let outcome = simulate(&state).expect("valid state");
    assert!(matches!(
        outcome.soft_limit(),
        Some(SoftLimit::EnthalpySpanTooSmall { .. })
    ));
}

#[test]
fn frozen_air_source_falls_back_to_cop_one() {
    let state = SimulationState {
        source_temp_c: -20.0,
        ..SimulationState::preset(Topology::Parallel, OperatingMode::Water)
    };
    let outcome = simulate(&state).expect("valid state");
    let run = outcome.limited_run().expect("limited run");
    assert!(matches!(run.limit, SoftLimit::EvaporationTooCold { .. }));
    assert_eq!(run.cop.map(|c| c.cop), Some(1.0));
}

#[test]
fn manual_cop_overrides_engine_and_limits() {
    let state = SimulationState {
        source_temp_c: -20.0,
        manual_cop: Some(3.5),
        ..SimulationState::preset(Topology::Parallel, OperatingMode::Water)
    };
    let result = completed(&state);
    assert_eq!(result.cop, 3.5);
    assert!(result.cop_is_manual);
    // 65 - (-20 - 8)
    assert_close("lift", result.lift_k, 93.0, 1e-9);

    let recovery = completed(&SimulationState {
        manual_cop: Some(3.5),
        ..absorption_hot_water()
    });
    assert_eq!(recovery.cop, 3.5);
}

#[test]
fn waste_water_source_runs_full_load() {
    let state = SimulationState::preset(Topology::Coupled, OperatingMode::Water);
    let result = completed(&state);
    // 338.15 / 35 * 0.45
    assert_close("cop", result.cop, 4.35, 1e-9);
    assert_eq!(result.recovered_heat_kw, 2000.0);
    assert_close("power", result.drive_energy_kw, 2000.0 / 4.35, 1e-9);
    assert!(result.limit_reason.is_none());
    assert!(result.source.is_none());
    assert_eq!(result.request.source, SourceKind::WasteWater);
    assert_eq!(result.request.source_out_c, state.source_out_c);
    assert_eq!(result.decision.tier, DecisionTier::Strong);
    let dispatch = result.dispatch.expect("hybrid dispatch");
    assert!(dispatch.cost_per_hour > 0.0);
}

#[test]
fn steam_preheat_recovery_is_sink_limited() {
    let state = SimulationState {
        target: 0.5,
        ..SimulationState::preset(Topology::Recovery, OperatingMode::Steam)
    };
    let result = completed(&state);
    assert_eq!(result.limit_reason, Some(LimitReason::SinkLimited));
    assert_eq!(result.request.load, LoadKind::Preheat);
    assert_eq!(result.request.load_out_c, 90.0);
    // 보충수를 70→90°C 데우는 열량이 상한
    let h_in = estimate_enthalpy(70.0, false);
    let h_steam = estimate_enthalpy(saturation_temperature_from_pressure(0.5), true);
    let mass_flow = 17500.0 / (h_steam - h_in);
    let sink_kw = mass_flow * (estimate_enthalpy(90.0, false) - h_in);
    assert_close("recovered", result.recovered_heat_kw, sink_kw, 1e-6);
    assert!(result.request.source_out_c > state.flue_out_c);
    assert!(result.request.source_out_c < state.flue_in_c);
}

#[test]
fn high_pressure_steam_exceeds_compressor_limit() {
    // 2.5 MPa 포화 온도 + 5 K 는 185°C를 넘는다
    let state = SimulationState::preset(Topology::Recovery, OperatingMode::Steam);
    let outcome = simulate(&state).expect("valid state");
    assert!(matches!(
        outcome.soft_limit(),
        Some(SoftLimit::CondensationTooHot { .. })
    ));
}

#[test]
fn electric_boiler_has_nothing_to_recover() {
    let state = SimulationState {
        fuel_type: FuelType::Electricity,
        fuel_price: 0.7,
        ..absorption_hot_water()
    };
    let result = completed(&state);
    assert_eq!(result.recovered_heat_kw, 0.0);
    assert_eq!(result.annual_saving, 0.0);
    assert_eq!(result.payback_years, 99.0);
    assert_eq!(result.decision.tier, DecisionTier::NotRecommended);
}

#[test]
fn electric_boiler_inputs_are_cleaned_up() {
    let state = SimulationState {
        fuel_type: FuelType::Electricity,
        boiler_eff: 0.5,
        fuel_price: 99.0,
        fuel_co2: Some(Co2Override {
            value: 0.1,
            unit: Co2FactorUnit::PerUnit,
        }),
        ..absorption_hot_water()
    };
    let result = completed(&state);
    // 효율 0.99, 전기 단가, 등록부 배출계수
    assert_close(
        "baseline cost",
        result.baseline_cost_per_hour,
        2000.0 / 0.99 * 0.7,
        1e-6,
    );
    assert_close(
        "baseline co2",
        result.baseline_co2_kg_per_hour,
        2000.0 / 0.99 * 0.58,
        1e-6,
    );
    assert_close(
        "cost per hour",
        result.cost_per_hour,
        result.baseline_cost_per_hour,
        1e-9,
    );
}

#[test]
fn invalid_inputs_are_fatal() {
    let state = SimulationState {
        boiler_eff: 0.0,
        ..absorption_hot_water()
    };
    assert!(matches!(
        simulate(&state),
        Err(EngineError::InvalidState(StateError::OutOfUnitRange {
            field: "boiler_eff",
            ..
        }))
    ));

    let state = SimulationState {
        manual_cop: Some(0.8),
        ..absorption_hot_water()
    };
    assert!(matches!(
        simulate(&state),
        Err(EngineError::InvalidState(StateError::ManualCopTooLow { .. }))
    ));
}

#[test]
fn result_serialises_with_status_tag() {
    let outcome = simulate(&absorption_hot_water()).expect("valid state");
    let json = serde_json::to_value(&outcome).expect("serialise");
    assert_eq!(json["status"], "completed");
    assert_eq!(json["cop"], 1.7);

    let limited = simulate(&SimulationState {
        flue_in_c: 50.0,
        ..absorption_hot_water()
    })
    .expect("valid state");
    let json = serde_json::to_value(&limited).expect("serialise");
    assert_eq!(json["status"], "limited");
    assert_eq!(json["limit"]["kind"], "FLUE_TOO_COLD");
}
