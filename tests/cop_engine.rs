//! COP 엔진 회귀 테스트.
use approx::assert_relative_eq;
use heatpump_recovery_toolbox::heat_pump::{
    calculate_cop, CopInput, OperatingMode, RecoveryType, SteamStrategy,
};
use heatpump_recovery_toolbox::limits::SoftLimit;

fn input(evap: f64, cond: f64) -> CopInput {
    CopInput {
        evap_temp_c: evap,
        cond_temp_c: cond,
        efficiency: 0.45,
        mode: OperatingMode::Water,
        strategy: SteamStrategy::Preheat,
        recovery_type: RecoveryType::Mvr,
    }
}

const MODES: [(OperatingMode, SteamStrategy); 4] = [
    (OperatingMode::Water, SteamStrategy::Preheat),
    (OperatingMode::Water, SteamStrategy::Gen),
    (OperatingMode::Steam, SteamStrategy::Preheat),
    (OperatingMode::Steam, SteamStrategy::Gen),
];

#[test]
fn compression_cop_is_repeatable() {
    let a = calculate_cop(&input(5.0, 65.0));
    let b = calculate_cop(&input(5.0, 65.0));
    assert_eq!(a, b);
    // 338.15 / 60 * 0.45 = 2.536
    assert_relative_eq!(a.cop, 2.54);
    assert_relative_eq!(a.lift_k, 60.0);
    assert!(a.error.is_none());
    assert!(a.pressure_ratio.is_some_and(|r| r > 1.0));
}

#[test]
fn absorption_cop_depends_only_on_steam_generation() {
    for (evap, cond) in [(10.0, 60.0), (35.0, 95.0), (75.0, 160.0)] {
        for (mode, strategy) in MODES {
            let est = calculate_cop(&CopInput {
                mode,
                strategy,
                recovery_type: RecoveryType::Absorption,
                ..input(evap, cond)
            });
            let expected = if mode == OperatingMode::Steam && strategy == SteamStrategy::Gen {
                1.45
            } else {
                1.70
            };
            assert_eq!(est.cop, expected, "{mode:?}/{strategy:?} at {evap}->{cond}");
            assert!(est.pressure_ratio.is_none());
        }
    }
}

#[test]
fn large_lift_penalty_applies_only_to_direct_steam() {
    let gen = |cond: f64, strategy| {
        calculate_cop(&CopInput {
            mode: OperatingMode::Steam,
            strategy,
            ..input(60.0, cond)
        })
        .cop
    };
    let below = gen(139.0, SteamStrategy::Gen);
    let above = gen(141.0, SteamStrategy::Gen);
    assert!(above <= below, "81K={above} 79K={below}");
    // 414.15 / 81 * 0.45 * 0.85
    assert_relative_eq!(above, 1.96);
    // 같은 리프트라도 예열은 감쇠 없음
    assert_relative_eq!(gen(141.0, SteamStrategy::Preheat), 2.30);
}

#[test]
fn soft_limits_return_fallback_values() {
    let cold = calculate_cop(&input(-26.0, 60.0));
    assert_eq!(cold.cop, 1.0);
    assert!(matches!(cold.error, Some(SoftLimit::EvaporationTooCold { .. })));

    let hot = calculate_cop(&input(60.0, 186.0));
    assert_eq!(hot.cop, 1.0);
    assert!(matches!(hot.error, Some(SoftLimit::CondensationTooHot { .. })));

    let flat = calculate_cop(&input(20.0, 25.0));
    assert_eq!(flat.cop, 8.0);
    assert_eq!(flat.lift_k, 5.0);
    assert!(matches!(flat.error, Some(SoftLimit::LiftTooSmall { .. })));
}

#[test]
fn carnot_cap_then_clamp() {
    let est = calculate_cop(&CopInput {
        efficiency: 1.0,
        ..input(60.0, 66.0)
    });
    assert_eq!(est.cop, 8.0);

    let poor = calculate_cop(&CopInput {
        efficiency: 0.05,
        ..input(0.0, 150.0)
    });
    assert_eq!(poor.cop, 1.0);
}
