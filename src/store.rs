//! 현재 입력 상태를 보관하고 부분 갱신(패치)을 병합한다.
//!
//! 갱신 결과는 바뀐 필드 목록으로 돌려주며, 호출자가 이를 보고 다시 계산한다.

use serde::{Deserialize, Serialize};

use crate::boiler::{CalorificOverride, Co2Override, FuelType};
use crate::heat_pump::{OperatingMode, RecoveryType, SteamStrategy};
use crate::system::{SimulationState, Topology};
use crate::units::LoadUnit;

/// 수동 COP를 켰지만 값이 없을 때 쓰는 값
pub const DEFAULT_MANUAL_COP: f64 = 3.5;

/// 부분 갱신. 주어진 필드만 덮어쓴다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatePatch {
    pub topology: Option<Topology>,
    pub mode: Option<OperatingMode>,
    pub steam_strategy: Option<SteamStrategy>,
    pub recovery_type: Option<RecoveryType>,
    pub excess_air: Option<f64>,
    pub source_temp_c: Option<f64>,
    pub source_out_c: Option<f64>,
    pub flue_in_c: Option<f64>,
    pub flue_out_c: Option<f64>,
    pub target: Option<f64>,
    pub load_in_c: Option<f64>,
    pub load_out_c: Option<f64>,
    pub load_value: Option<f64>,
    pub load_unit: Option<LoadUnit>,
    pub perfection_degree: Option<f64>,
    /// `false`면 수동 COP를 끈다
    pub is_manual_cop: Option<bool>,
    pub manual_cop: Option<f64>,
    pub fuel_type: Option<FuelType>,
    pub fuel_calorific: Option<CalorificOverride>,
    pub fuel_co2: Option<Co2Override>,
    pub fuel_price: Option<f64>,
    pub elec_price: Option<f64>,
    pub annual_hours: Option<f64>,
    pub boiler_eff: Option<f64>,
    pub capex_hp: Option<f64>,
    pub capex_base: Option<f64>,
}

/// 패치 적용 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub revision: u64,
    pub changed: Vec<&'static str>,
}

impl StateChange {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

macro_rules! merge_fields {
    ($state:expr, $patch:expr, $changed:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                if $state.$field != value {
                    $state.$field = value;
                    $changed.push(stringify!($field));
                }
            }
        )+
    };
}

impl StatePatch {
    /// 상태에 병합하고 바뀐 필드 이름을 돌려준다.
    pub fn apply_to(&self, state: &mut SimulationState) -> Vec<&'static str> {
        let mut changed = Vec::new();
        merge_fields!(state, self, changed;
            topology, mode, steam_strategy, recovery_type, excess_air,
            source_temp_c, source_out_c, flue_in_c, flue_out_c,
            target, load_in_c, load_out_c, load_value, load_unit, perfection_degree,
            fuel_price, elec_price, annual_hours, boiler_eff, capex_hp, capex_base,
        );

        let manual_cop = match (self.is_manual_cop, self.manual_cop) {
            (Some(false), _) => None,
            (_, Some(cop)) => Some(cop),
            (Some(true), None) => Some(state.manual_cop.unwrap_or(DEFAULT_MANUAL_COP)),
            (None, None) => state.manual_cop,
        };
        if state.manual_cop != manual_cop {
            state.manual_cop = manual_cop;
            changed.push("manual_cop");
        }

        // 연료를 바꾸면 이전 연료용 보정값은 의미가 없다
        if let Some(fuel) = self.fuel_type {
            if state.fuel_type != fuel {
                state.fuel_type = fuel;
                changed.push("fuel_type");
                if state.fuel_calorific.take().is_some() {
                    changed.push("fuel_calorific");
                }
                if state.fuel_co2.take().is_some() {
                    changed.push("fuel_co2");
                }
                if fuel == FuelType::Electricity && state.fuel_price != state.elec_price {
                    state.fuel_price = state.elec_price;
                    changed.push("fuel_price");
                }
            }
        }
        if let Some(cal) = self.fuel_calorific {
            if state.fuel_calorific != Some(cal) {
                state.fuel_calorific = Some(cal);
                push_unique(&mut changed, "fuel_calorific");
            }
        }
        if let Some(co2) = self.fuel_co2 {
            if state.fuel_co2 != Some(co2) {
                state.fuel_co2 = Some(co2);
                push_unique(&mut changed, "fuel_co2");
            }
        }
        changed
    }
}

fn push_unique(changed: &mut Vec<&'static str>, field: &'static str) {
    if !changed.contains(&field) {
        changed.push(field);
    }
}

/// 현재 입력 상태와 갱신 횟수.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: SimulationState,
    revision: u64,
}

impl StateStore {
    pub fn new(state: SimulationState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 패치를 병합한다. 실제로 바뀐 필드가 있을 때만 리비전이 올라간다.
    pub fn apply(&mut self, patch: &StatePatch) -> StateChange {
        let changed = patch.apply_to(&mut self.state);
        if !changed.is_empty() {
            self.revision += 1;
        }
        StateChange {
            revision: self.revision,
            changed,
        }
    }

    /// 토폴로지/모드 기본값으로 되돌린다.
    pub fn reset(&mut self, topology: Topology, mode: OperatingMode) -> StateChange {
        self.state = SimulationState::preset(topology, mode);
        self.revision += 1;
        StateChange {
            revision: self.revision,
            changed: vec!["*"],
        }
    }
}
