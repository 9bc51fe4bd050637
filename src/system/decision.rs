//! 투자 판단, 결합 효율 비교, 하이브리드 운전 순위.

use serde::Serialize;

use crate::heat_pump::RecoveryType;

/// 연간 절감액이 없을 때의 회수기간 [년]
pub const PAYBACK_SENTINEL_YEARS: f64 = 99.0;
/// 이보다 짧으면 적극 추천 [년]
pub const STRONG_PAYBACK_YEARS: f64 = 4.0;
/// 전력 1차 에너지 계수
pub const PEF_ELECTRICITY: f64 = 2.5;
/// 연료 1차 에너지 계수
pub const PEF_FUEL: f64 = 1.05;
/// 이 COP 미만이면 보일러를 우선 운전한다
pub const HYBRID_MIN_COP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    HeatPump,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionTier {
    Strong,
    Consider,
    NotRecommended,
}

impl DecisionTier {
    pub fn key(self) -> &'static str {
        use crate::i18n::keys;
        match self {
            DecisionTier::Strong => keys::DECISION_STRONG,
            DecisionTier::Consider => keys::DECISION_CONSIDER,
            DecisionTier::NotRecommended => keys::DECISION_NOT_RECOMMENDED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub winner: Winner,
    pub tier: DecisionTier,
    pub narrative: String,
}

/// 연간 절감액과 회수기간으로 세 단계 판단을 내린다.
pub fn make_decision(annual_saving: f64, payback_years: f64) -> Decision {
    if !(annual_saving > 0.0) {
        return Decision {
            winner: Winner::Baseline,
            tier: DecisionTier::NotRecommended,
            narrative: "운전비 절감이 없어 기존 보일러 유지가 유리합니다.".to_string(),
        };
    }
    if payback_years < STRONG_PAYBACK_YEARS {
        Decision {
            winner: Winner::HeatPump,
            tier: DecisionTier::Strong,
            narrative: format!(
                "회수기간 {payback_years:.1}년으로 {STRONG_PAYBACK_YEARS:.0}년 미만입니다. 도입을 적극 추천합니다."
            ),
        }
    } else {
        Decision {
            winner: Winner::HeatPump,
            tier: DecisionTier::Consider,
            narrative: format!(
                "운전비는 절감되지만 회수기간이 {payback_years:.1}년입니다. 설비비 조건을 검토하십시오."
            ),
        }
    }
}

/// 열펌프 도입 전후의 현장 효율과 1차 에너지 효율.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouplingData {
    /// [%]
    pub site_efficiency_before: f64,
    /// [%]
    pub site_efficiency_after: f64,
    pub per_before: f64,
    pub per_after: f64,
}

/// 회수 토폴로지의 결합 효율 비교.
///
/// 잔여 보일러 연료와 열펌프 구동 에너지를 합쳐 도입 후 효율을 구한다.
/// 구동 에너지는 압축식이면 전력, 흡수식이면 보일러 연료다.
pub fn coupling_data(
    load_kw: f64,
    boiler_eff: f64,
    recovered_heat_kw: f64,
    drive_site_kw: f64,
    drive_primary_kw: f64,
) -> CouplingData {
    let residual_fuel_kw = (load_kw - recovered_heat_kw).max(0.0) / boiler_eff;
    let site_input_kw = residual_fuel_kw + drive_site_kw;
    let primary_input_kw = residual_fuel_kw * PEF_FUEL + drive_primary_kw;
    CouplingData {
        site_efficiency_before: boiler_eff * 100.0,
        site_efficiency_after: if site_input_kw > 0.0 {
            load_kw / site_input_kw * 100.0
        } else {
            0.0
        },
        per_before: boiler_eff / PEF_FUEL,
        per_after: if primary_input_kw > 0.0 {
            load_kw / primary_input_kw
        } else {
            0.0
        },
    }
}

/// 구동 에너지의 1차 에너지 계수.
pub fn drive_pef(recovery_type: RecoveryType) -> f64 {
    match recovery_type {
        RecoveryType::Mvr => PEF_ELECTRICITY,
        RecoveryType::Absorption => PEF_FUEL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchMode {
    HeatPumpFirst,
    BoilerFirst,
}

/// 하이브리드 운전 시 우선 가동 설비.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HybridDispatch {
    pub mode: DispatchMode,
    /// 우선 설비의 시간당 비용
    pub cost_per_hour: f64,
    /// 열펌프 분담률 [%]
    pub heat_pump_share: f64,
    /// 열펌프 우선일 때의 전력 [kW]
    pub power_kw: f64,
    pub heat_pump_cost_per_hour: f64,
    pub boiler_cost_per_hour: f64,
}

/// COP가 낮거나 열펌프가 더 비싸면 보일러를 먼저 돌린다.
pub fn hybrid_dispatch(
    load_kw: f64,
    cop: f64,
    elec_price: f64,
    boiler_cost_per_hour: f64,
) -> HybridDispatch {
    let power_kw = load_kw / cop;
    let heat_pump_cost_per_hour = power_kw * elec_price;
    if cop < HYBRID_MIN_COP || heat_pump_cost_per_hour > boiler_cost_per_hour {
        HybridDispatch {
            mode: DispatchMode::BoilerFirst,
            cost_per_hour: boiler_cost_per_hour,
            heat_pump_share: 0.0,
            power_kw: 0.0,
            heat_pump_cost_per_hour,
            boiler_cost_per_hour,
        }
    } else {
        HybridDispatch {
            mode: DispatchMode::HeatPumpFirst,
            cost_per_hour: heat_pump_cost_per_hour,
            heat_pump_share: 100.0,
            power_kw,
            heat_pump_cost_per_hour,
            boiler_cost_per_hour,
        }
    }
}
