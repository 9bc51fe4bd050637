//! 열원/싱크 열수지와 역열수지 솔버.
use heatpump_recovery_toolbox::boiler::{Boiler, BoilerConfig, FuelType};
use heatpump_recovery_toolbox::heat_pump::{
    BalanceOutcome, BalanceSolver, DivergenceReason, HeatPump, HeatPumpConfig, OperatingMode,
    RecoveryType, SteamStrategy, ThermalDemand,
};
use heatpump_recovery_toolbox::limits::Outcome;
use heatpump_recovery_toolbox::system::{solve_recovery_balance, SimulationState, Topology};
use proptest::prelude::*;

fn pump(manual_cop: Option<f64>) -> HeatPump {
    HeatPump::new(HeatPumpConfig {
        recovery_type: RecoveryType::Mvr,
        mode: OperatingMode::Water,
        strategy: SteamStrategy::Preheat,
        efficiency: 0.45,
        manual_cop,
    })
}

fn gas_boiler(load_kw: f64, flue_out_c: f64) -> Boiler {
    Boiler::new(BoilerConfig {
        fuel_type: FuelType::NaturalGas,
        efficiency: 0.92,
        load_kw,
        flue_in_c: 130.0,
        flue_out_c,
        excess_air: 1.2,
        calorific_override: None,
        co2_override: None,
    })
}

proptest! {
    #[test]
    fn recovered_heat_is_the_smaller_limit(
        load_kw in 100.0f64..5000.0,
        flue_out_c in 35.0f64..90.0,
        mass_flow in 0.05f64..20.0,
        inlet in 10.0f64..60.0,
        cop in 1.1f64..6.0,
    ) {
        let source = gas_boiler(load_kw, flue_out_c).source_potential();
        let demand = ThermalDemand {
            inlet_temp_c: inlet,
            mass_flow_kg_per_s: mass_flow,
            target_temp_c: 90.0,
            target_is_steam: false,
            system_target_temp_c: 90.0,
        };
        let run = pump(Some(cop))
            .simulate(&source, &demand)
            .expect("valid inputs")
            .completed()
            .expect("manual COP never hits a limit");

        prop_assert_eq!(run.recovered_heat_kw, run.source_limit_kw.min(run.sink_limit_kw));
        prop_assert_eq!(run.is_sink_limited, run.recovered_heat_kw < run.source_limit_kw);
        prop_assert!(
            (run.drive_energy_kw * cop - run.recovered_heat_kw).abs()
                <= 1e-9 * run.recovered_heat_kw.max(1.0)
        );
        prop_assert!(run.evaporator_heat_kw <= source.total_kw + 1e-6);
        prop_assert!(run.actual_sink_outlet_c <= 90.0);
        prop_assert!(run.actual_flue_outlet_c >= flue_out_c - 0.051);
        prop_assert!(run.actual_flue_outlet_c <= 130.0);
    }
}

#[test]
fn balance_reports_insufficient_source() {
    let state = SimulationState {
        flue_out_c: 40.0,
        load_in_c: 20.0,
        target: 90.0,
        load_out_c: 90.0,
        recovery_type: RecoveryType::Absorption,
        ..SimulationState::preset(Topology::Recovery, OperatingMode::Water)
    };
    let outcome = solve_recovery_balance(&state, &BalanceSolver::default()).expect("valid state");
    match outcome {
        Outcome::Completed(BalanceOutcome::Diverged {
            reason,
            last_flue_out_c,
            ..
        }) => {
            assert_eq!(reason, DivergenceReason::SourceInsufficient);
            assert_eq!(last_flue_out_c, 30.0);
        }
        other => panic!("expected divergence, got {other:?}"),
    }
}

#[test]
fn balance_converges_with_fixed_cop() {
    let state = SimulationState {
        target: 0.5,
        manual_cop: Some(3.0),
        ..SimulationState::preset(Topology::Recovery, OperatingMode::Steam)
    };
    let outcome = solve_recovery_balance(&state, &BalanceSolver::default()).expect("valid state");
    let balance = outcome.completed().expect("no soft limit");
    let point = balance.point().expect("converged");
    assert_eq!(point.cop, 3.0);
    let needed = point.target_load_kw * (point.cop - 1.0) / point.cop;
    assert!(
        (point.source_total_kw - needed).abs() < 0.7,
        "available {} needed {needed}",
        point.source_total_kw
    );
    // 현열만으로 맞추는 구간(이슬점 위)
    assert!(point.required_flue_out_c > 54.0 && point.required_flue_out_c < 130.0);
}

#[test]
fn balance_honours_flue_gas_limit() {
    let state = SimulationState {
        flue_in_c: 50.0,
        ..SimulationState::preset(Topology::Recovery, OperatingMode::Water)
    };
    let outcome = solve_recovery_balance(&state, &BalanceSolver::default()).expect("valid state");
    assert!(outcome.soft_limit().is_some());
}
