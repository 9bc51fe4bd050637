//! 배열 회수 열펌프의 열수지 모델.

use serde::Serialize;
use tracing::debug;

use super::cop::{calculate_cop, CopEstimate, CopInput, OperatingMode, RecoveryType, SteamStrategy};
use crate::boiler::SourcePotential;
use crate::limits::{EngineError, Outcome};
use crate::physics::{
    estimate_enthalpy, liquid_temperature_from_enthalpy, round_to, FLUE_GAS_CP_KWH_PER_M3K,
};

/// 증발기 접근 온도차: 배연 목표 출구 - 증발 온도 [K]
pub const EVAPORATOR_APPROACH_K: f64 = 5.0;
/// 응축기 접근 온도차: 응축 온도 - 시스템 목표 [K]
pub const CONDENSER_APPROACH_K: f64 = 5.0;
/// 열원 소진 판정 허용 오차 [kW]
const SOURCE_EXHAUSTED_TOLERANCE_KW: f64 = 0.1;

/// 열펌프 설정.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPumpConfig {
    pub recovery_type: RecoveryType,
    pub mode: OperatingMode,
    pub strategy: SteamStrategy,
    /// 열역학 완전도
    pub efficiency: f64,
    /// 수동 고정 COP. `Some`이면 COP 엔진을 건너뛴다.
    pub manual_cop: Option<f64>,
}

/// 부하 측(히트 싱크) 열 수요.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermalDemand {
    /// 싱크 입구 온도 [°C]
    pub inlet_temp_c: f64,
    /// 질량 유량 [kg/s]
    pub mass_flow_kg_per_s: f64,
    /// 싱크를 데울 수 있는 최대 온도 [°C]
    pub target_temp_c: f64,
    /// 목표 상태가 증기인지
    pub target_is_steam: bool,
    /// 시스템 최종 목표 온도. 응축 온도 산정 기준 [°C]
    pub system_target_temp_c: f64,
}

impl ThermalDemand {
    /// 싱크가 목표까지 흡수할 수 있는 최대 열량 [kW].
    pub fn sink_duty_kw(&self) -> f64 {
        let span = estimate_enthalpy(self.target_temp_c, self.target_is_steam)
            - estimate_enthalpy(self.inlet_temp_c, false);
        (self.mass_flow_kg_per_s * span).max(0.0)
    }
}

/// 열수지 시뮬레이션 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatPumpRun {
    pub cop: CopEstimate,
    pub cop_is_manual: bool,
    pub evap_temp_c: f64,
    pub cond_temp_c: f64,
    /// 열원(증발기) 측 한계 출력 [kW]
    pub source_limit_kw: f64,
    /// 싱크 측 한계 출력 [kW]
    pub sink_limit_kw: f64,
    /// 실제 회수(공급) 열량 [kW]
    pub recovered_heat_kw: f64,
    /// 구동 에너지 [kW]
    pub drive_energy_kw: f64,
    /// 증발기에서 흡수한 열량 [kW]
    pub evaporator_heat_kw: f64,
    pub is_sink_limited: bool,
    /// 역산된 싱크 출구 온도 [°C]
    pub actual_sink_outlet_c: f64,
    /// 역산된 배연 출구 온도 [°C]
    pub actual_flue_outlet_c: f64,
}

/// 일회성 열펌프 모델. 시뮬레이션마다 새로 만든다.
#[derive(Debug, Clone)]
pub struct HeatPump {
    config: HeatPumpConfig,
}

impl HeatPump {
    pub fn new(config: HeatPumpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatPumpConfig {
        &self.config
    }

    /// 수동 COP가 있으면 그대로, 없으면 COP 엔진으로 계산한다.
    pub fn estimate_cop(&self, evap_temp_c: f64, cond_temp_c: f64) -> CopEstimate {
        match self.config.manual_cop {
            Some(cop) => CopEstimate::pinned(cop, evap_temp_c, cond_temp_c),
            None => calculate_cop(&CopInput {
                evap_temp_c,
                cond_temp_c,
                efficiency: self.config.efficiency,
                mode: self.config.mode,
                strategy: self.config.strategy,
                recovery_type: self.config.recovery_type,
            }),
        }
    }

    /// 열원 잠재량과 싱크 수요 사이의 열수지를 푼다.
    ///
    /// 회수 열량은 열원 한계와 싱크 한계 중 작은 값이다. 배연 목표 출구가
    /// 없거나 유량이 양수가 아니면 [`EngineError`]로 실패한다.
    pub fn simulate(
        &self,
        source: &SourcePotential,
        demand: &ThermalDemand,
    ) -> Result<Outcome<HeatPumpRun>, EngineError> {
        if !source.flue_out_c.is_finite() {
            return Err(EngineError::MissingFlueOutlet);
        }
        if !(demand.mass_flow_kg_per_s > 0.0) {
            return Err(EngineError::NonPositiveMassFlow {
                mass_flow_kg_per_s: demand.mass_flow_kg_per_s,
            });
        }

        let evap_temp_c = source.flue_out_c - EVAPORATOR_APPROACH_K;
        let cond_temp_c = demand.system_target_temp_c + CONDENSER_APPROACH_K;
        let cop = self.estimate_cop(evap_temp_c, cond_temp_c);
        if let Some(limit) = cop.error {
            return Ok(Outcome::limited(limit, Some(cop)));
        }

        let source_limit_kw = source_side_limit(source.total_kw, cop.cop);
        let sink_limit_kw = demand.sink_duty_kw();

        let recovered_heat_kw = source_limit_kw.min(sink_limit_kw);
        let is_sink_limited = recovered_heat_kw < source_limit_kw;
        let drive_energy_kw = recovered_heat_kw / cop.cop;
        let evaporator_heat_kw = recovered_heat_kw - drive_energy_kw;

        let h_in = estimate_enthalpy(demand.inlet_temp_c, false);
        let actual_sink_outlet_c = liquid_temperature_from_enthalpy(
            h_in + recovered_heat_kw / demand.mass_flow_kg_per_s,
        )
        .min(demand.target_temp_c);

        let actual_flue_outlet_c = back_calculate_flue_outlet(source, evaporator_heat_kw);

        debug!(
            cop = cop.cop,
            source_limit_kw,
            sink_limit_kw,
            recovered_heat_kw,
            is_sink_limited,
            "열펌프 열수지 계산"
        );

        Ok(Outcome::Completed(HeatPumpRun {
            cop,
            cop_is_manual: self.config.manual_cop.is_some(),
            evap_temp_c,
            cond_temp_c,
            source_limit_kw,
            sink_limit_kw,
            recovered_heat_kw,
            drive_energy_kw,
            evaporator_heat_kw,
            is_sink_limited,
            actual_sink_outlet_c: round_to(actual_sink_outlet_c, 1),
            actual_flue_outlet_c: round_to(actual_flue_outlet_c, 1),
        }))
    }
}

/// 증발기 열량으로부터 응축기 측 최대 출력: `Q_src * COP / (COP - 1)`.
///
/// COP가 1 이하이면 증발기 흡열이 없으므로 열원 측 제약이 없다.
fn source_side_limit(source_total_kw: f64, cop: f64) -> f64 {
    if !(source_total_kw > 0.0) {
        return 0.0;
    }
    if cop <= 1.0 {
        return f64::INFINITY;
    }
    source_total_kw * cop / (cop - 1.0)
}

fn back_calculate_flue_outlet(source: &SourcePotential, evaporator_heat_kw: f64) -> f64 {
    if (source.total_kw - evaporator_heat_kw).abs() <= SOURCE_EXHAUSTED_TOLERANCE_KW {
        return source.flue_out_c;
    }
    let capacity_kw_per_k = source.flue_gas_flow_m3_per_h * FLUE_GAS_CP_KWH_PER_M3K;
    if !(capacity_kw_per_k > 0.0) {
        return source.flue_in_c;
    }
    let drop = evaporator_heat_kw / capacity_kw_per_k;
    // 잠열 포함 열량이면 현열 환산 강하가 목표를 넘을 수 있다
    (source.flue_in_c - drop).max(source.flue_out_c).min(source.flue_in_c)
}
