//! 포화 온도/압력 근사식.

use super::round_to;

// Antoine 식 계수 (물, mmHg/°C 기준)
const ANTOINE_A: f64 = 8.07131;
const ANTOINE_B: f64 = 1730.63;
const ANTOINE_C: f64 = 233.426;
const MMHG_PER_MPA: f64 = 7500.62;
const KPA_PER_MMHG: f64 = 0.133322;

/// 압력이 0 이하로 들어왔을 때 돌려주는 포화 온도(°C).
pub const FALLBACK_SATURATION_TEMP_C: f64 = 100.0;

/// 절대압력(MPa)으로부터 포화 온도(°C)를 추정한다.
///
/// Antoine 식의 역함수로, 약 0.05~2 MPa 공학 범위에서만 의미가 있다.
/// 그 밖의 범위에서는 정확도를 보장하지 않는다. 결과는 0.1°C 단위로 반올림한다.
pub fn saturation_temperature_from_pressure(pressure_mpa: f64) -> f64 {
    if !(pressure_mpa > 0.0) {
        return FALLBACK_SATURATION_TEMP_C;
    }
    let p_mmhg = pressure_mpa * MMHG_PER_MPA;
    let t_c = ANTOINE_B / (ANTOINE_A - p_mmhg.log10()) - ANTOINE_C;
    round_to(t_c, 1)
}

/// 기준 냉매(R134a)의 포화 압력(MPa) 지수 근사. 압축비 추정에만 쓴다.
pub fn r134a_saturation_pressure_mpa(temp_c: f64) -> f64 {
    0.2928 * (0.035 * temp_c).exp()
}

/// 물의 포화 수증기압(kPa). Antoine 식 정방향.
pub fn water_vapor_saturation_pressure_kpa(temp_c: f64) -> f64 {
    let log10_p_mmhg = ANTOINE_A - ANTOINE_B / (ANTOINE_C + temp_c);
    10f64.powf(log10_p_mmhg) * KPA_PER_MMHG
}
