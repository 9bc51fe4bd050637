//! 단순화된 물/증기 엔탈피 모델.
//!
//! 액상은 정압비열 일정, 증기는 포화증기 기준값에 선형 과열항을 더한다.
//! 증기표 조회가 아닌 근사이므로 수 % 수준의 오차는 정상이다.

/// 물의 정압비열 [kJ/kg·K]
pub const CP_WATER_KJ_PER_KGK: f64 = 4.187;
/// 포화증기 기준 엔탈피 [kJ/kg]
pub const SATURATED_STEAM_ENTHALPY_KJ_PER_KG: f64 = 2676.0;
/// 과열 구간 기울기 [kJ/kg·K]
const SUPERHEAT_SLOPE_KJ_PER_KGK: f64 = 0.5;
/// 과열항 기준 온도 [°C]
const SUPERHEAT_BASE_C: f64 = 100.0;

/// 온도(°C)에서의 비엔탈피(kJ/kg)를 추정한다.
pub fn estimate_enthalpy(temp_c: f64, is_steam: bool) -> f64 {
    if is_steam {
        SATURATED_STEAM_ENTHALPY_KJ_PER_KG
            + SUPERHEAT_SLOPE_KJ_PER_KGK * (temp_c - SUPERHEAT_BASE_C).max(0.0)
    } else {
        CP_WATER_KJ_PER_KGK * temp_c
    }
}

/// 액상 엔탈피로부터 온도를 역산한다.
pub fn liquid_temperature_from_enthalpy(enthalpy_kj_per_kg: f64) -> f64 {
    enthalpy_kj_per_kg / CP_WATER_KJ_PER_KGK
}
