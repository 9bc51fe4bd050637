//! 입력 상태 저장소와 부분 갱신.
use heatpump_recovery_toolbox::boiler::{Co2Override, FuelType};
use heatpump_recovery_toolbox::heat_pump::OperatingMode;
use heatpump_recovery_toolbox::store::{StatePatch, StateStore, DEFAULT_MANUAL_COP};
use heatpump_recovery_toolbox::system::{SimulationState, Topology};
use heatpump_recovery_toolbox::units::Co2FactorUnit;

fn store() -> StateStore {
    StateStore::new(SimulationState::preset(Topology::Recovery, OperatingMode::Water))
}

#[test]
fn patch_reports_only_changed_fields() {
    let mut store = store();
    let change = store.apply(&StatePatch {
        flue_out_c: Some(40.0),
        flue_in_c: Some(130.0),
        ..StatePatch::default()
    });
    assert_eq!(change.changed, vec!["flue_out_c"]);
    assert_eq!(change.revision, 1);
    assert_eq!(store.state().flue_out_c, 40.0);

    let again = store.apply(&StatePatch {
        flue_out_c: Some(40.0),
        ..StatePatch::default()
    });
    assert!(again.is_empty());
    assert_eq!(store.revision(), 1);
}

#[test]
fn changing_fuel_clears_overrides() {
    let mut store = store();
    store.apply(&StatePatch {
        fuel_co2: Some(Co2Override {
            value: 1.9,
            unit: Co2FactorUnit::PerUnit,
        }),
        ..StatePatch::default()
    });
    assert!(store.state().fuel_co2.is_some());

    let change = store.apply(&StatePatch {
        fuel_type: Some(FuelType::Electricity),
        ..StatePatch::default()
    });
    assert!(change.changed.contains(&"fuel_type"));
    assert!(change.changed.contains(&"fuel_co2"));
    assert!(store.state().fuel_co2.is_none());
    assert_eq!(store.state().fuel_price, store.state().elec_price);
}

#[test]
fn manual_cop_toggle() {
    let mut store = store();
    store.apply(&StatePatch {
        is_manual_cop: Some(true),
        ..StatePatch::default()
    });
    assert_eq!(store.state().manual_cop, Some(DEFAULT_MANUAL_COP));

    store.apply(&StatePatch {
        manual_cop: Some(4.2),
        ..StatePatch::default()
    });
    assert_eq!(store.state().manual_cop, Some(4.2));

    let change = store.apply(&StatePatch {
        is_manual_cop: Some(false),
        manual_cop: Some(5.0),
        ..StatePatch::default()
    });
    assert_eq!(change.changed, vec!["manual_cop"]);
    assert_eq!(store.state().manual_cop, None);
}

#[test]
fn patch_parses_from_toml_and_rejects_typos() {
    let patch: StatePatch = toml::from_str(
        r#"
            topology = "PARALLEL"
            source_temp_c = -10.0
            fuel_type = "DIESEL"
        "#,
    )
    .expect("valid patch");
    assert_eq!(patch.topology, Some(Topology::Parallel));
    assert_eq!(patch.fuel_type, Some(FuelType::Diesel));

    assert!(toml::from_str::<StatePatch>("flue_temp = 120.0").is_err());
}

#[test]
fn reset_restores_preset() {
    let mut store = store();
    store.apply(&StatePatch {
        target: Some(85.0),
        ..StatePatch::default()
    });
    let change = store.reset(Topology::Coupled, OperatingMode::Steam);
    assert_eq!(change.revision, 2);
    assert_eq!(
        store.state(),
        &SimulationState::preset(Topology::Coupled, OperatingMode::Steam)
    );
}
