use serde::Serialize;

use super::decision::{CouplingData, Decision, HybridDispatch};
use super::state::Topology;
use crate::boiler::SourcePotential;

/// 회수 열량을 제한한 쪽.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitReason {
    /// 싱크(부하) 측이 먼저 찼다
    SinkLimited,
    /// 배연 열원이 부족하다
    SourceLimited,
}

/// 증기톤 환산 부하 분담 [t/h].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteamTons {
    pub total: f64,
    pub heat_pump: f64,
    pub boiler: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    AmbientAir,
    WasteWater,
    FlueGas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadKind {
    HotWater,
    Preheat,
    Steam,
}

/// 장비 선정용 요약.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RequestSummary {
    pub source: SourceKind,
    pub source_in_c: f64,
    pub source_out_c: f64,
    pub load: LoadKind,
    pub load_in_c: f64,
    pub load_out_c: f64,
    /// 열펌프 용량 [kW]
    pub capacity_kw: f64,
}

/// 시뮬레이션 결과. 매 호출마다 새로 계산된다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub topology: Topology,
    pub cop: f64,
    pub lift_k: f64,
    pub cop_is_manual: bool,
    pub pressure_ratio: Option<f64>,
    /// 열펌프 공급 열량 [kW]
    pub recovered_heat_kw: f64,
    /// 구동 에너지 [kW]
    pub drive_energy_kw: f64,
    pub annual_saving: f64,
    pub payback_years: f64,
    /// 도입 후 시간당 운전비
    pub cost_per_hour: f64,
    pub baseline_cost_per_hour: f64,
    /// 보일러 단독 운전 시 시간당 CO2 [kg/h]
    pub baseline_co2_kg_per_hour: f64,
    /// [%]
    pub co2_reduction_rate: f64,
    pub primary_energy_ratio: f64,
    pub decision: Decision,
    pub coupling: Option<CouplingData>,
    pub limit_reason: Option<LimitReason>,
    pub steam_tons: SteamTons,
    pub request: RequestSummary,
    /// 회수 토폴로지의 배연 잠재량
    pub source: Option<SourcePotential>,
    /// 표준 토폴로지의 하이브리드 운전 순위
    pub dispatch: Option<HybridDispatch>,
}
