//! 물리 한계값과 두 단계 오류 체계.
//!
//! - [`SoftLimit`]: 물리적으로 비현실적인 입력. 결과와 함께 데이터로 돌려주며
//!   호출자는 메시지를 표시하고 후속 수치 사용을 건너뛴다.
//! - [`EngineError`]: 호출 계약 위반. 계산 실패로 처리해야 한다.

use serde::Serialize;
use thiserror::Error;

use crate::heat_pump::CopEstimate;
use crate::system::StateError;

/// 이보다 낮은 배연 입구 온도는 회수 가치가 없다고 본다 [°C]
pub const MIN_FLUE_TEMP_C: f64 = 70.0;
/// 압축기 기술 한계 응축 온도 [°C]
pub const MAX_COND_TEMP_C: f64 = 185.0;
/// 증발 온도 하한 [°C]
pub const MIN_EVAP_TEMP_C: f64 = -25.0;
/// 최소 리프트(응축-증발) [K]
pub const MIN_LIFT_DELTA_K: f64 = 5.0;
/// 유량 역산에 필요한 최소 엔탈피 차 [kJ/kg]
pub const MIN_ENTHALPY_SPAN_KJ_PER_KG: f64 = 1.0;

/// 표시용 경고로 처리되는 물리 한계 위반.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoftLimit {
    #[error("증발 온도가 너무 낮습니다 ({evap_temp_c:.1}°C < {min_c:.1}°C)")]
    EvaporationTooCold { evap_temp_c: f64, min_c: f64 },
    #[error("응축 온도가 너무 높습니다 ({cond_temp_c:.1}°C > {max_c:.1}°C)")]
    CondensationTooHot { cond_temp_c: f64, max_c: f64 },
    #[error("온도차가 너무 작습니다 (리프트 {lift_k:.1} K ≤ {min_k:.1} K)")]
    LiftTooSmall { lift_k: f64, min_k: f64 },
    #[error("배연 온도가 너무 낮아 회수 가치가 없습니다 ({flue_in_c:.1}°C < {min_c:.1}°C)")]
    FlueTooCold { flue_in_c: f64, min_c: f64 },
    #[error("입출구 엔탈피 차가 너무 작아 유량을 계산할 수 없습니다 ({span_kj_per_kg:.2} kJ/kg)")]
    EnthalpySpanTooSmall { span_kj_per_kg: f64, min_kj_per_kg: f64 },
}

impl SoftLimit {
    /// 언어팩 키.
    pub fn key(&self) -> &'static str {
        use crate::i18n::keys;
        match self {
            SoftLimit::EvaporationTooCold { .. } => keys::LIMIT_EVAP_TOO_COLD,
            SoftLimit::CondensationTooHot { .. } => keys::LIMIT_COND_TOO_HOT,
            SoftLimit::LiftTooSmall { .. } => keys::LIMIT_LIFT_TOO_SMALL,
            SoftLimit::FlueTooCold { .. } => keys::LIMIT_FLUE_TOO_COLD,
            SoftLimit::EnthalpySpanTooSmall { .. } => keys::LIMIT_ENTHALPY_SPAN,
        }
    }

    /// (입력값, 한계값)
    pub fn values(&self) -> (f64, f64) {
        match *self {
            SoftLimit::EvaporationTooCold { evap_temp_c, min_c } => (evap_temp_c, min_c),
            SoftLimit::CondensationTooHot { cond_temp_c, max_c } => (cond_temp_c, max_c),
            SoftLimit::LiftTooSmall { lift_k, min_k } => (lift_k, min_k),
            SoftLimit::FlueTooCold { flue_in_c, min_c } => (flue_in_c, min_c),
            SoftLimit::EnthalpySpanTooSmall {
                span_kj_per_kg,
                min_kj_per_kg,
            } => (span_kj_per_kg, min_kj_per_kg),
        }
    }
}

/// 계산을 중단해야 하는 내부 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("내부 오류: 열원 목표 배연 출구 온도가 없습니다")]
    MissingFlueOutlet,
    #[error("내부 오류: 질량 유량이 양수가 아닙니다 ({mass_flow_kg_per_s} kg/s)")]
    NonPositiveMassFlow { mass_flow_kg_per_s: f64 },
    #[error("입력 오류: {0}")]
    InvalidState(#[from] StateError),
}

/// 한계 위반으로 중단된 실행. 가능한 경우 폴백 COP를 함께 담는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitedRun {
    pub limit: SoftLimit,
    pub cop: Option<CopEstimate>,
}

/// 정상 결과 또는 한계 위반.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Completed(T),
    Limited(LimitedRun),
}

impl<T> Outcome<T> {
    pub(crate) fn limited(limit: SoftLimit, cop: Option<CopEstimate>) -> Self {
        Outcome::Limited(LimitedRun { limit, cop })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Limited(_) => None,
        }
    }

    pub fn as_completed(&self) -> Option<&T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Limited(_) => None,
        }
    }

    pub fn soft_limit(&self) -> Option<&SoftLimit> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Limited(run) => Some(&run.limit),
        }
    }

    pub fn limited_run(&self) -> Option<&LimitedRun> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Limited(run) => Some(run),
        }
    }
}
