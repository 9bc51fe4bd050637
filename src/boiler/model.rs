//! 기준 보일러 모델: 연료 소비, 비용, CO2, 배연 회수 잠재량.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fuel::{FuelProfile, FuelType};
use crate::physics::{
    actual_flue_volume_factor, adjusted_dew_point, effective_excess_air, water_condensation,
    CondensationEstimate, FLUE_GAS_CP_KWH_PER_M3K,
};
use crate::units::{calorific_to_mj, Co2FactorUnit, EnergyUnit};

/// kWh -> MJ
const MJ_PER_KWH: f64 = 3.6;
/// 잠열 회수율이 100%가 되는 배연 온도 [°C]
const FULL_LATENT_RECOVERY_C: f64 = 5.0;
/// 사용자 CO2 계수가 기본값의 이 비율 미만이면 kWh 기준 값으로 본다
const CO2_SUSPICIOUS_RATIO: f64 = 0.3;

/// 발열량 보정값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalorificOverride {
    pub value: f64,
    pub unit: EnergyUnit,
}

/// CO2 배출계수 보정값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Co2Override {
    pub value: f64,
    #[serde(default)]
    pub unit: Co2FactorUnit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoilerConfig {
    pub fuel_type: FuelType,
    /// 보일러 효율 (0~1]
    pub efficiency: f64,
    /// 보일러 출력 부하 [kW]
    pub load_kw: f64,
    /// 배연 입구 온도 [°C]
    pub flue_in_c: f64,
    /// 목표 배연 출구 온도 [°C]
    pub flue_out_c: f64,
    /// 과잉공기비
    pub excess_air: f64,
    pub calorific_override: Option<CalorificOverride>,
    pub co2_override: Option<Co2Override>,
}

/// 기준 보일러의 시간당 소비/비용/배출.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineCost {
    /// 연료 투입 열량 [kW]
    pub input_kw: f64,
    /// 연료 소비량 [unit/h]
    pub fuel_rate_per_h: f64,
    pub cost_per_hour: f64,
    pub co2_kg_per_hour: f64,
}

/// 배연 회수 잠재량.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourcePotential {
    pub sensible_kw: f64,
    pub latent_kw: f64,
    pub total_kw: f64,
    /// 실제 배가스량 [m³/h]
    pub flue_gas_flow_m3_per_h: f64,
    /// 과잉공기 보정 이슬점 [°C]
    pub dew_point_c: f64,
    pub flue_in_c: f64,
    pub flue_out_c: f64,
    pub condensation: Option<CondensationEstimate>,
}

impl SourcePotential {
    fn empty(flue_in_c: f64, flue_out_c: f64) -> Self {
        Self {
            sensible_kw: 0.0,
            latent_kw: 0.0,
            total_kw: 0.0,
            flue_gas_flow_m3_per_h: 0.0,
            dew_point_c: 0.0,
            flue_in_c,
            flue_out_c,
            condensation: None,
        }
    }
}

/// 시뮬레이션마다 새로 만드는 보일러 모델.
#[derive(Debug, Clone)]
pub struct Boiler {
    config: BoilerConfig,
    fuel: FuelProfile,
}

impl Boiler {
    /// 레지스트리 사본에 사용자 보정을 적용해 보일러를 만든다.
    pub fn new(config: BoilerConfig) -> Self {
        let mut fuel = config.fuel_type.profile();

        if let Some(cal) = config.calorific_override {
            let mj = calorific_to_mj(cal.value, cal.unit);
            if mj.is_finite() && mj > 0.0 {
                fuel.calorific_mj_per_unit = mj;
            }
        }

        if let Some(co2) = config.co2_override {
            if co2.value.is_finite() {
                fuel.co2_kg_per_unit = resolve_co2_factor(co2, &fuel);
            }
        }

        debug!(
            fuel = fuel.name,
            calorific_mj_per_unit = fuel.calorific_mj_per_unit,
            co2_kg_per_unit = fuel.co2_kg_per_unit,
            "보일러 연료 데이터"
        );
        Self { config, fuel }
    }

    pub fn fuel(&self) -> &FuelProfile {
        &self.fuel
    }

    pub fn config(&self) -> &BoilerConfig {
        &self.config
    }

    /// 연료 투입 열량 [kW]
    pub fn input_kw(&self) -> f64 {
        self.config.load_kw / self.config.efficiency
    }

    /// 열량 [kW]에 해당하는 연료 소비량 [unit/h]
    pub fn fuel_rate_per_h(&self, kw: f64) -> f64 {
        kw * MJ_PER_KWH / self.fuel.calorific_mj_per_unit
    }

    pub fn calculate_baseline(&self, fuel_price: f64) -> BaselineCost {
        let input_kw = self.input_kw();
        let fuel_rate_per_h = self.fuel_rate_per_h(input_kw);
        BaselineCost {
            input_kw,
            fuel_rate_per_h,
            cost_per_hour: fuel_rate_per_h * fuel_price,
            co2_kg_per_hour: fuel_rate_per_h * self.fuel.co2_kg_per_unit,
        }
    }

    /// 설정된 목표 출구 온도에서의 회수 잠재량.
    pub fn source_potential(&self) -> SourcePotential {
        self.source_potential_at(self.config.flue_out_c)
    }

    /// 임의 출구 온도에서의 회수 잠재량. 역열수지 솔버가 반복 호출한다.
    ///
    /// 잠열은 출구가 이슬점 아래일 때만 생기며, 이슬점에서 0%, 5°C에서 100%로
    /// 선형 증가한다.
    pub fn source_potential_at(&self, flue_out_c: f64) -> SourcePotential {
        let flue_in_c = self.config.flue_in_c;
        let stoich = match (self.config.fuel_type, self.fuel.flue) {
            (FuelType::Electricity, _) | (_, None) => {
                return SourcePotential::empty(flue_in_c, flue_out_c)
            }
            (_, Some(stoich)) => stoich,
        };

        let alpha = effective_excess_air(self.config.excess_air);
        let factor =
            actual_flue_volume_factor(stoich.theoretical_gas_m3, stoich.theoretical_air_m3, alpha);
        let input_kw = self.input_kw();
        let flow_m3_per_h = self.fuel_rate_per_h(input_kw) * factor;

        let sensible_kw = flow_m3_per_h * FLUE_GAS_CP_KWH_PER_M3K * (flue_in_c - flue_out_c);

        let dew_point_c = adjusted_dew_point(stoich.reference_dew_point_c, alpha);
        let (latent_kw, condensation) = if flue_out_c < dew_point_c {
            let fraction = ((dew_point_c - flue_out_c) / (dew_point_c - FULL_LATENT_RECOVERY_C))
                .clamp(0.0, 1.0);
            let latent = input_kw * self.fuel.max_latent_ratio * fraction;
            let h2o_percent = self.config.fuel_type.water_vapor_volume_percent(factor);
            let water = water_condensation(flue_out_c, flow_m3_per_h, h2o_percent, dew_point_c);
            (latent, Some(water))
        } else {
            (0.0, None)
        };

        SourcePotential {
            sensible_kw,
            latent_kw,
            total_kw: sensible_kw + latent_kw,
            flue_gas_flow_m3_per_h: flow_m3_per_h,
            dew_point_c,
            flue_in_c,
            flue_out_c,
            condensation,
        }
    }
}

/// 사용자 CO2 계수의 단위를 추정해 kgCO2/unit으로 맞춘다.
///
/// kWh 기준으로 선언됐거나, 값이 1 미만이면서 기본값의 30%에도 못 미치면
/// kWh 기준 값이 잘못 표기된 것으로 보고 `값 × (발열량 MJ / 3.6)`으로 환산한다.
/// 입력 화면의 단위 표기를 믿을 수 없어서 쓰는 추정이며 항상 맞지는 않는다.
fn resolve_co2_factor(co2: Co2Override, fuel: &FuelProfile) -> f64 {
    let default = fuel.fuel_type.profile().co2_kg_per_unit;
    let suspicious = co2.value < 1.0 && co2.value < default * CO2_SUSPICIOUS_RATIO;
    if co2.unit == Co2FactorUnit::PerKwh || suspicious {
        let converted = co2.value * fuel.calorific_mj_per_unit / MJ_PER_KWH;
        info!(
            input = co2.value,
            converted,
            declared = ?co2.unit,
            "CO2 계수를 kWh 기준으로 보고 환산"
        );
        converted
    } else {
        co2.value
    }
}
