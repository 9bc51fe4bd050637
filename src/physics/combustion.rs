//! 연소 배가스 관련 근사식: 증기톤 환산, 실제 배가스량, 이슬점 보정, 응축수량.

use serde::Serialize;

use super::round_to;
use super::saturation::water_vapor_saturation_pressure_kpa;

/// 1 증기톤(t/h) ≈ 700 kW (업계 경험값)
pub const KW_PER_STEAM_TON: f64 = 700.0;
/// 배가스 체적비열 근사값 [kWh/m³·K]
pub const FLUE_GAS_CP_KWH_PER_M3K: f64 = 0.000_38;
/// 과잉공기비 입력이 없거나 비정상일 때 쓰는 기본값
pub const DEFAULT_EXCESS_AIR: f64 = 1.2;
/// 과잉공기비 0.1 증가당 이슬점 약 1.7°C 하강
const DEW_POINT_DECAY_PER_ALPHA: f64 = 17.0;

const T_STP_K: f64 = 273.15;
const P_STP_KPA: f64 = 101.325;
/// 수증기 기체상수 [kJ/kg·K]
const R_H2O_KJ_PER_KGK: f64 = 0.4615;

/// 증기톤(t/h)을 kW로 환산한다. 0 이하 입력은 0을 돌려준다.
pub fn convert_steam_tons_to_kw(tons: f64) -> f64 {
    if !(tons > 0.0) {
        return 0.0;
    }
    round_to(tons * KW_PER_STEAM_TON, 1)
}

/// kW를 증기톤(t/h)으로 환산한다. 0 이하 입력은 0을 돌려준다.
pub fn convert_kw_to_steam_tons(kw: f64) -> f64 {
    if !(kw > 0.0) {
        return 0.0;
    }
    kw / KW_PER_STEAM_TON
}

/// 과잉공기비를 정리한다. 비정상 값은 기본값, 1 미만은 1로 올린다.
pub fn effective_excess_air(alpha: f64) -> f64 {
    let alpha = if alpha.is_finite() && alpha > 0.0 {
        alpha
    } else {
        DEFAULT_EXCESS_AIR
    };
    alpha.max(1.0)
}

/// 과잉공기를 고려한 실제 배가스 생성 계수.
///
/// `V = V_theo + (alpha - 1) * V_air_theo` (연료 단위당 m³)
pub fn actual_flue_volume_factor(theoretical_gas: f64, theoretical_air: f64, alpha: f64) -> f64 {
    let alpha = effective_excess_air(alpha);
    theoretical_gas.max(0.0) + (alpha - 1.0) * theoretical_air.max(0.0)
}

/// 과잉공기 희석으로 낮아진 배가스 이슬점(°C).
///
/// 기준 이슬점이 0 이하(배가스 없음)면 0을 돌려준다.
pub fn adjusted_dew_point(reference_dew_point_c: f64, alpha: f64) -> f64 {
    if !(reference_dew_point_c > 0.0) {
        return 0.0;
    }
    let alpha = effective_excess_air(alpha);
    round_to(reference_dew_point_c - DEW_POINT_DECAY_PER_ALPHA * (alpha - 1.0), 1)
}

/// 배가스 냉각 중 응축되는 수분량 추정치 [kg/h].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CondensationEstimate {
    /// 응축(석출) 수분량
    pub condensed_kg_per_h: f64,
    /// 냉각 전 수증기량
    pub initial_kg_per_h: f64,
    /// 냉각 후 잔류 수증기량
    pub final_kg_per_h: f64,
}

/// 배가스 출구 온도까지 냉각했을 때의 응축수량을 추정한다.
///
/// 체적유량은 표준상태(m³/h) 기준이다. 출구 온도가 이슬점 이상이거나
/// 유량·수증기 비율이 0 이하면 모두 0이다. 출구 분압은 포화 수증기압으로
/// 제한하며, 응축에 따른 배가스 체적 감소는 무시한다.
pub fn water_condensation(
    flue_out_c: f64,
    flue_gas_flow_m3_per_h: f64,
    h2o_volume_percent: f64,
    dew_point_c: f64,
) -> CondensationEstimate {
    if flue_out_c >= dew_point_c || !(flue_gas_flow_m3_per_h > 0.0) || !(h2o_volume_percent > 0.0)
    {
        return CondensationEstimate::default();
    }
    let fraction = h2o_volume_percent / 100.0;

    let initial_partial_kpa = P_STP_KPA * fraction;
    let final_partial_kpa =
        water_vapor_saturation_pressure_kpa(flue_out_c).min(initial_partial_kpa);

    let to_mass =
        |partial_kpa: f64| partial_kpa * flue_gas_flow_m3_per_h / (R_H2O_KJ_PER_KGK * T_STP_K);
    let initial = to_mass(initial_partial_kpa);
    let remaining = to_mass(final_partial_kpa);

    CondensationEstimate {
        condensed_kg_per_h: round_to((initial - remaining).max(0.0), 2),
        initial_kg_per_h: round_to(initial, 2),
        final_kg_per_h: round_to(remaining, 2),
    }
}
