//! 닫힌 형태의 공학 근사식 모음.
//!
//! 물성 테이블이나 상태방정식이 아니라 설계 초기 검토용 근사식이다.
//! 정확도 비교가 필요하면 [`reference`]의 IF97 값과 대조한다.

pub mod combustion;
pub mod enthalpy;
pub mod reference;
pub mod saturation;

pub use combustion::*;
pub use enthalpy::*;
pub use saturation::*;

/// 소수점 `decimals` 자리로 반올림한다.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
