//! IAPWS-IF97 기준값. 근사식의 오차를 진단할 때만 쓰며 시뮬레이션 경로에는 들어가지 않는다.
//! 입력: 압력(MPa, 절대), 온도(°C)

use seuif97::{pt, OH};
use serde::Serialize;
use thiserror::Error;

use super::enthalpy::estimate_enthalpy;
use super::saturation::saturation_temperature_from_pressure;

// ---------------- Region 4 (포화) ----------------
const P4_STAR_MPA: f64 = 22.064;
const T4_STAR_K: f64 = 647.096;
const R4_N: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];

/// IF97 기준값 계산 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferenceError {
    #[error("IF97 유효 범위를 벗어났습니다: {0}")]
    OutOfRange(&'static str),
    #[error("IF97 계산 실패(유효 범위 밖이거나 수렴 실패)")]
    NotANumber,
}

fn region4_residual(t_k: f64) -> (f64, f64) {
    let theta = 1.0 - t_k / T4_STAR_K;
    let sum = R4_N[0] * theta
        + R4_N[1] * theta.powf(1.5)
        + R4_N[2] * theta.powi(3)
        + R4_N[3] * theta.powf(3.5)
        + R4_N[4] * theta.powi(4)
        + R4_N[5] * theta.powf(7.5);
    let dsum_dtheta = R4_N[0]
        + 1.5 * R4_N[1] * theta.powf(0.5)
        + 3.0 * R4_N[2] * theta.powi(2)
        + 3.5 * R4_N[3] * theta.powf(2.5)
        + 4.0 * R4_N[4] * theta.powi(3)
        + 7.5 * R4_N[5] * theta.powf(6.5);
    (sum, dsum_dtheta)
}

/// IF97 Region 4 포화 온도(°C). 뉴턴 반복으로 푼다.
pub fn if97_saturation_temperature_c(pressure_mpa: f64) -> Result<f64, ReferenceError> {
    if !(pressure_mpa > 0.0) || pressure_mpa > P4_STAR_MPA {
        return Err(ReferenceError::OutOfRange("포화 압력은 0~22.064 MPa"));
    }
    let target = (pressure_mpa / P4_STAR_MPA).ln();
    let mut t_k = 373.15_f64;
    for _ in 0..30 {
        let (sum, dsum_dtheta) = region4_residual(t_k);
        let f = (T4_STAR_K / t_k) * sum - target;
        let df_dt = -(T4_STAR_K / t_k.powi(2)) * sum - (1.0 / t_k) * dsum_dtheta;
        let delta = f / df_dt;
        t_k -= delta;
        if delta.abs() < 1e-8 {
            break;
        }
    }
    if t_k.is_nan() {
        return Err(ReferenceError::NotANumber);
    }
    Ok(t_k - 273.15)
}

/// IF97 영역 자동 판정 비엔탈피(kJ/kg).
pub fn if97_enthalpy_kj_per_kg(pressure_mpa: f64, temp_c: f64) -> Result<f64, ReferenceError> {
    let h = pt(pressure_mpa, temp_c, OH);
    if h.is_nan() {
        return Err(ReferenceError::NotANumber);
    }
    Ok(h)
}

/// 근사식과 IF97 값을 나란히 담는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproximationCheck {
    pub pressure_mpa: f64,
    pub temperature_c: f64,
    /// Antoine 근사 포화 온도(°C)
    pub approx_saturation_c: f64,
    /// IF97 포화 온도(°C)
    pub if97_saturation_c: f64,
    /// 단순 모델 엔탈피(kJ/kg). 상(相)은 IF97 포화 온도로 판정한다.
    pub approx_enthalpy_kj_per_kg: f64,
    /// IF97 엔탈피(kJ/kg)
    pub if97_enthalpy_kj_per_kg: f64,
}

impl ApproximationCheck {
    pub fn saturation_error_k(&self) -> f64 {
        self.approx_saturation_c - self.if97_saturation_c
    }

    pub fn enthalpy_error_ratio(&self) -> f64 {
        if self.if97_enthalpy_kj_per_kg.abs() > 0.0 {
            (self.approx_enthalpy_kj_per_kg - self.if97_enthalpy_kj_per_kg)
                / self.if97_enthalpy_kj_per_kg
        } else {
            0.0
        }
    }
}

/// 주어진 압력/온도에서 근사식을 IF97과 비교한다.
pub fn compare_with_if97(
    pressure_mpa: f64,
    temp_c: f64,
) -> Result<ApproximationCheck, ReferenceError> {
    let if97_saturation_c = if97_saturation_temperature_c(pressure_mpa)?;
    let is_steam = temp_c >= if97_saturation_c;
    Ok(ApproximationCheck {
        pressure_mpa,
        temperature_c: temp_c,
        approx_saturation_c: saturation_temperature_from_pressure(pressure_mpa),
        if97_saturation_c,
        approx_enthalpy_kj_per_kg: estimate_enthalpy(temp_c, is_steam),
        if97_enthalpy_kj_per_kg: if97_enthalpy_kj_per_kg(pressure_mpa, temp_c)?,
    })
}
