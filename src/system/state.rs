//! 시뮬레이션 입력 레코드, 토폴로지별 기본값, 입력 검증.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boiler::{CalorificOverride, Co2Override, FuelType};
use crate::heat_pump::{OperatingMode, RecoveryType, SteamStrategy};
use crate::physics::saturation_temperature_from_pressure;
use crate::units::LoadUnit;

/// 설비 구성.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Topology {
    /// A: 공기열원 열펌프를 보일러와 병렬 운전
    Parallel,
    /// B: 폐수 열원 열펌프
    Coupled,
    /// C: 보일러 배연 심층 회수
    #[default]
    Recovery,
}

impl Topology {
    pub fn is_recovery(self) -> bool {
        self == Topology::Recovery
    }

    /// 표준 토폴로지의 열원-증발 온도차 [K]. 공기는 8 K, 폐수는 5 K.
    pub fn evaporator_approach_k(self) -> f64 {
        match self {
            Topology::Parallel => 8.0,
            Topology::Coupled | Topology::Recovery => 5.0,
        }
    }
}

/// 시뮬레이션 한 번의 전체 입력.
///
/// `target`은 온수 모드에서 공급 온도 [°C], 증기 모드에서 포화 압력 [MPa]이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationState {
    pub topology: Topology,
    pub mode: OperatingMode,
    pub steam_strategy: SteamStrategy,
    pub recovery_type: RecoveryType,
    /// 과잉공기비
    pub excess_air: f64,

    /// A/B: 외기 또는 폐수 입구 온도 [°C]
    pub source_temp_c: f64,
    /// B: 폐수 출구 온도 [°C]
    pub source_out_c: f64,
    /// C: 배연 입구 온도 [°C]
    pub flue_in_c: f64,
    /// C: 목표 배연 출구 온도 [°C]
    pub flue_out_c: f64,

    /// 시스템 최종 목표 (°C 또는 MPa)
    pub target: f64,
    /// 싱크(회수/보충수) 입구 온도 [°C]
    pub load_in_c: f64,
    /// C: 열펌프 출구(예열 목표) 온도 [°C]
    pub load_out_c: f64,

    pub load_value: f64,
    pub load_unit: LoadUnit,
    /// 열역학 완전도 (0~1]
    pub perfection_degree: f64,

    /// 수동 고정 COP. 있으면 자동 계산을 대신한다.
    #[serde(default)]
    pub manual_cop: Option<f64>,

    pub fuel_type: FuelType,
    #[serde(default)]
    pub fuel_calorific: Option<CalorificOverride>,
    #[serde(default)]
    pub fuel_co2: Option<Co2Override>,

    /// 연료 단가 [원/unit]
    pub fuel_price: f64,
    /// 전력 단가 [원/kWh]
    pub elec_price: f64,
    /// 연간 운전 시간 [h]
    pub annual_hours: f64,
    pub boiler_eff: f64,
    /// 열펌프 단위 설비비 [원/kW]
    pub capex_hp: f64,
    /// 보일러 단위 설비비 [원/kW]
    pub capex_base: f64,
}

/// 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("{field} 값이 숫자가 아닙니다")]
    NotFinite { field: &'static str },
    #[error("{field} 값은 0보다 커야 합니다 (입력: {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} 값은 0 초과 1 이하여야 합니다 (입력: {value})")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("{field} 값은 음수일 수 없습니다 (입력: {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("수동 COP는 1보다 커야 합니다 (입력: {value})")]
    ManualCopTooLow { value: f64 },
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::preset(Topology::Recovery, OperatingMode::Steam)
    }
}

impl SimulationState {
    /// 토폴로지와 공급 매체별 기본 입력.
    pub fn preset(topology: Topology, mode: OperatingMode) -> Self {
        let mut state = Self {
            topology,
            mode,
            steam_strategy: SteamStrategy::Preheat,
            recovery_type: RecoveryType::Mvr,
            excess_air: 1.2,
            source_temp_c: 35.0,
            source_out_c: 30.0,
            flue_in_c: 130.0,
            flue_out_c: 80.0,
            target: 60.0,
            load_in_c: 50.0,
            load_out_c: 90.0,
            load_value: 2000.0,
            load_unit: LoadUnit::Kw,
            perfection_degree: 0.45,
            manual_cop: None,
            fuel_type: FuelType::NaturalGas,
            fuel_calorific: None,
            fuel_co2: None,
            fuel_price: 4.0,
            elec_price: 0.7,
            annual_hours: 6000.0,
            boiler_eff: 0.92,
            capex_hp: 2500.0,
            capex_base: 200.0,
        };

        match (topology, mode) {
            (Topology::Parallel | Topology::Coupled, OperatingMode::Water) => {
                state.load_in_c = 50.0;
                state.target = 60.0;
                state.load_out_c = 60.0;
            }
            (Topology::Parallel | Topology::Coupled, OperatingMode::Steam) => {
                state.load_in_c = 20.0;
                state.target = 0.5;
                state.load_value = 4.0;
                state.load_unit = LoadUnit::Ton;
            }
            (Topology::Recovery, OperatingMode::Water) => {
                state.load_in_c = 50.0;
                state.load_out_c = 70.0;
                state.target = 70.0;
            }
            (Topology::Recovery, OperatingMode::Steam) => {
                state.load_in_c = 70.0;
                state.load_out_c = 90.0;
                state.target = 2.5;
                state.load_value = 25.0;
                state.load_unit = LoadUnit::Ton;
            }
        }
        if topology == Topology::Parallel {
            state.source_temp_c = -5.0;
        }
        state
    }

    /// 설계 부하 [kW]
    pub fn load_kw(&self) -> f64 {
        self.load_unit.to_kw(self.load_value)
    }

    /// 시스템 최종 목표 온도 [°C]. 증기 모드는 압력에서 포화 온도를 구한다.
    pub fn system_target_temp_c(&self) -> f64 {
        match self.mode {
            OperatingMode::Water => self.target,
            OperatingMode::Steam => saturation_temperature_from_pressure(self.target),
        }
    }

    pub fn validate(&self) -> Result<(), StateError> {
        let finite = [
            ("excess_air", self.excess_air),
            ("source_temp_c", self.source_temp_c),
            ("source_out_c", self.source_out_c),
            ("flue_in_c", self.flue_in_c),
            ("flue_out_c", self.flue_out_c),
            ("target", self.target),
            ("load_in_c", self.load_in_c),
            ("load_out_c", self.load_out_c),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(StateError::NotFinite { field });
            }
        }

        positive("load_value", self.load_value)?;
        if self.mode == OperatingMode::Steam {
            positive("target", self.target)?;
        }
        unit_range("boiler_eff", self.boiler_eff)?;
        unit_range("perfection_degree", self.perfection_degree)?;

        for (field, value) in [
            ("fuel_price", self.fuel_price),
            ("elec_price", self.elec_price),
            ("annual_hours", self.annual_hours),
            ("capex_hp", self.capex_hp),
            ("capex_base", self.capex_base),
        ] {
            non_negative(field, value)?;
        }

        if let Some(cop) = self.manual_cop {
            if !cop.is_finite() {
                return Err(StateError::NotFinite { field: "manual_cop" });
            }
            if cop <= 1.0 {
                return Err(StateError::ManualCopTooLow { value: cop });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), StateError> {
    if !value.is_finite() {
        return Err(StateError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(StateError::NotPositive { field, value });
    }
    Ok(())
}

fn unit_range(field: &'static str, value: f64) -> Result<(), StateError> {
    if !value.is_finite() {
        return Err(StateError::NotFinite { field });
    }
    if !(value > 0.0 && value <= 1.0) {
        return Err(StateError::OutOfUnitRange { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), StateError> {
    if !value.is_finite() {
        return Err(StateError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(StateError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for topology in [Topology::Parallel, Topology::Coupled, Topology::Recovery] {
            for mode in [OperatingMode::Water, OperatingMode::Steam] {
                assert_eq!(SimulationState::preset(topology, mode).validate(), Ok(()));
            }
        }
    }

    #[test]
    fn steam_preset_load_is_in_tons() {
        let state = SimulationState::preset(Topology::Recovery, OperatingMode::Steam);
        assert_eq!(state.load_kw(), 17_500.0);
    }

    #[test]
    fn manual_cop_must_exceed_one() {
        let mut state = SimulationState::default();
        state.manual_cop = Some(1.0);
        assert_eq!(state.validate(), Err(StateError::ManualCopTooLow { value: 1.0 }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut text = toml::to_string(&SimulationState::default()).unwrap();
        text.push_str("\nmystery = 1\n");
        assert!(toml::from_str::<SimulationState>(&text).is_err());
    }
}
