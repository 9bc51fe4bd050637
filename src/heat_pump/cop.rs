//! 통합 COP 엔진. 결과 화면과 차트가 같은 함수를 쓴다.

use serde::{Deserialize, Serialize};

use crate::limits::{SoftLimit, MAX_COND_TEMP_C, MIN_EVAP_TEMP_C, MIN_LIFT_DELTA_K};
use crate::physics::{r134a_saturation_pressure_mpa, round_to};

/// 카르노 COP 물리 상한
pub const MAX_CARNOT_COP: f64 = 15.0;
/// 최종 COP 하한/상한
pub const MIN_COP: f64 = 1.0;
pub const MAX_COP: f64 = 8.0;
/// 리프트가 너무 작을 때 돌려주는 허용적 폴백 COP
pub const SMALL_LIFT_FALLBACK_COP: f64 = 8.0;
/// 흡수식: 온수 또는 보충수 예열
pub const ABSORPTION_COP: f64 = 1.70;
/// 흡수식: 직접 증기 생산
pub const ABSORPTION_STEAM_GEN_COP: f64 = 1.45;
/// 이 리프트를 넘는 직접 증기 생산은 효율 감쇠를 적용한다 [K]
pub const LARGE_LIFT_THRESHOLD_K: f64 = 80.0;
pub const LARGE_LIFT_PENALTY: f64 = 0.85;

/// 공급 매체.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    /// 온수
    #[default]
    Water,
    /// 증기
    Steam,
}

/// 증기 모드에서의 열펌프 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SteamStrategy {
    /// 보충수 예열
    #[default]
    Preheat,
    /// 직접 증기 생산
    Gen,
}

/// 열펌프 기술.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryType {
    /// 전동 압축식 (MVR)
    #[default]
    Mvr,
    /// 열구동 흡수식
    Absorption,
}

/// COP 엔진 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopInput {
    /// 증발 온도 [°C]
    pub evap_temp_c: f64,
    /// 응축 온도 [°C]
    pub cond_temp_c: f64,
    /// 열역학 완전도 (0~1]
    pub efficiency: f64,
    pub mode: OperatingMode,
    pub strategy: SteamStrategy,
    pub recovery_type: RecoveryType,
}

/// COP 엔진 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CopEstimate {
    pub cop: f64,
    /// 응축-증발 온도차 [K], 0.1 단위 반올림
    pub lift_k: f64,
    /// 압축식일 때 기준 냉매 압축비 추정
    pub pressure_ratio: Option<f64>,
    /// 소프트 한계 위반. 이 경우 `cop`은 폴백 값이다.
    pub error: Option<SoftLimit>,
}

impl CopEstimate {
    fn limited(cop: f64, lift_k: f64, limit: SoftLimit) -> Self {
        Self {
            cop,
            lift_k,
            pressure_ratio: None,
            error: Some(limit),
        }
    }

    /// 수동 고정 COP. 리프트는 온도로부터 계산한다.
    pub fn pinned(cop: f64, evap_temp_c: f64, cond_temp_c: f64) -> Self {
        Self {
            cop,
            lift_k: round_to(cond_temp_c - evap_temp_c, 1),
            pressure_ratio: None,
            error: None,
        }
    }
}

/// 역카르노 난방 COP. 상한 15로 자른다.
pub fn carnot_heating_cop(evap_temp_c: f64, cond_temp_c: f64) -> f64 {
    let t_evap_k = evap_temp_c + 273.15;
    let t_cond_k = cond_temp_c + 273.15;
    (t_cond_k / (t_cond_k - t_evap_k)).min(MAX_CARNOT_COP)
}

/// 증발/응축 온도와 기술 선택으로부터 COP를 계산한다.
///
/// 흡수식은 카르노 계산을 쓰지 않고 기술 고정값을 돌려준다. 압축식은
/// 카르노 × 완전도 × 리프트 감쇠를 [1, 8]로 자르고 소수 둘째 자리로 반올림한다.
pub fn calculate_cop(input: &CopInput) -> CopEstimate {
    let lift = input.cond_temp_c - input.evap_temp_c;
    let lift_k = round_to(lift, 1);

    if input.evap_temp_c < MIN_EVAP_TEMP_C {
        return CopEstimate::limited(
            MIN_COP,
            lift_k,
            SoftLimit::EvaporationTooCold {
                evap_temp_c: input.evap_temp_c,
                min_c: MIN_EVAP_TEMP_C,
            },
        );
    }
    if input.cond_temp_c > MAX_COND_TEMP_C {
        return CopEstimate::limited(
            MIN_COP,
            lift_k,
            SoftLimit::CondensationTooHot {
                cond_temp_c: input.cond_temp_c,
                max_c: MAX_COND_TEMP_C,
            },
        );
    }
    if lift <= MIN_LIFT_DELTA_K {
        return CopEstimate::limited(
            SMALL_LIFT_FALLBACK_COP,
            lift_k,
            SoftLimit::LiftTooSmall {
                lift_k,
                min_k: MIN_LIFT_DELTA_K,
            },
        );
    }

    let direct_steam =
        input.mode == OperatingMode::Steam && input.strategy == SteamStrategy::Gen;

    match input.recovery_type {
        RecoveryType::Absorption => {
            // 직접 증기 생산만 감쇠. 증기 모드라도 예열은 물을 데우는 것과 같다.
            let cop = if direct_steam {
                ABSORPTION_STEAM_GEN_COP
            } else {
                ABSORPTION_COP
            };
            CopEstimate {
                cop,
                lift_k,
                pressure_ratio: None,
                error: None,
            }
        }
        RecoveryType::Mvr => {
            let carnot = carnot_heating_cop(input.evap_temp_c, input.cond_temp_c);
            let penalty = if direct_steam && lift > LARGE_LIFT_THRESHOLD_K {
                LARGE_LIFT_PENALTY
            } else {
                1.0
            };
            let cop = (carnot * input.efficiency * penalty).clamp(MIN_COP, MAX_COP);
            let pressure_ratio = r134a_saturation_pressure_mpa(input.cond_temp_c)
                / r134a_saturation_pressure_mpa(input.evap_temp_c);
            CopEstimate {
                cop: round_to(cop, 2),
                lift_k,
                pressure_ratio: Some(round_to(pressure_ratio, 2)),
                error: None,
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = (OperatingMode, SteamStrategy)> {
        (
            prop_oneof![Just(OperatingMode::Water), Just(OperatingMode::Steam)],
            prop_oneof![Just(SteamStrategy::Preheat), Just(SteamStrategy::Gen)],
        )
    }

    proptest! {
        #[test]
        fn compression_cop_stays_within_clamp(
            evap in -25.0_f64..120.0,
            lift in 5.1_f64..150.0,
            efficiency in 0.05_f64..=1.0,
            (mode, strategy) in mode_strategy(),
        ) {
            let cond = evap + lift;
            prop_assume!(cond <= MAX_COND_TEMP_C);
            let est = calculate_cop(&CopInput {
                evap_temp_c: evap,
                cond_temp_c: cond,
                efficiency,
                mode,
                strategy,
                recovery_type: RecoveryType::Mvr,
            });
            prop_assert!(est.error.is_none());
            prop_assert!((MIN_COP..=MAX_COP).contains(&est.cop), "cop={}", est.cop);
            prop_assert!(carnot_heating_cop(evap, cond) <= MAX_CARNOT_COP);
        }

        #[test]
        fn absorption_cop_ignores_temperatures(
            evap in -25.0_f64..120.0,
            lift in 5.1_f64..150.0,
            efficiency in 0.05_f64..=1.0,
            (mode, strategy) in mode_strategy(),
        ) {
            let cond = evap + lift;
            prop_assume!(cond <= MAX_COND_TEMP_C);
            let est = calculate_cop(&CopInput {
                evap_temp_c: evap,
                cond_temp_c: cond,
                efficiency,
                mode,
                strategy,
                recovery_type: RecoveryType::Absorption,
            });
            let expected = if mode == OperatingMode::Steam && strategy == SteamStrategy::Gen {
                ABSORPTION_STEAM_GEN_COP
            } else {
                ABSORPTION_COP
            };
            prop_assert_eq!(est.cop, expected);
        }
    }
}
