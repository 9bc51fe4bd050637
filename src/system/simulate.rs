//! 토폴로지별 시뮬레이션.

use tracing::{debug, info};

use super::decision::{
    coupling_data, drive_pef, hybrid_dispatch, make_decision, PAYBACK_SENTINEL_YEARS,
    PEF_ELECTRICITY,
};
use super::result::{
    LimitReason, LoadKind, RequestSummary, SimulationResult, SourceKind, SteamTons,
};
use super::state::{SimulationState, Topology};
use crate::boiler::{Boiler, BoilerConfig, Co2Override, FuelType};
use crate::heat_pump::model::CONDENSER_APPROACH_K;
use crate::heat_pump::{
    BalanceOutcome, BalanceSolver, HeatPump, HeatPumpConfig, HeatPumpRun, OperatingMode,
    RecoveryType, SteamStrategy, ThermalDemand,
};
use crate::limits::{
    EngineError, Outcome, SoftLimit, MIN_ENTHALPY_SPAN_KJ_PER_KG, MIN_FLUE_TEMP_C,
};
use crate::physics::{convert_kw_to_steam_tons, estimate_enthalpy};

/// 공기열원 출구 온도 추정용 강하 [K]
const AIR_SOURCE_DROP_K: f64 = 5.0;

/// 전기 보일러 CO2 보정값이 이보다 작으면 잘못된 입력으로 본다 [kg/kWh]
const ELECTRIC_CO2_FLOOR: f64 = 0.3;
/// 전기 보일러 효율이 이보다 낮으면 잘못된 입력으로 본다
const ELECTRIC_EFF_FLOOR: f64 = 0.9;
const ELECTRIC_BOILER_EFF: f64 = 0.99;

type SimulationOutcome = Outcome<Box<SimulationResult>>;

/// 입력 하나로 전체 시뮬레이션을 실행한다.
///
/// 물리 한계 위반은 `Ok(Outcome::Limited)`, 입력 계약 위반은 `Err`로 돌려준다.
pub fn simulate(state: &SimulationState) -> Result<SimulationOutcome, EngineError> {
    state.validate()?;
    info!(topology = ?state.topology, mode = ?state.mode, load_kw = state.load_kw(), "시뮬레이션 시작");

    let outcome = match state.topology {
        Topology::Recovery => run_recovery(state)?,
        Topology::Parallel | Topology::Coupled => run_standard(state),
    };

    match &outcome {
        Outcome::Completed(result) => info!(
            cop = result.cop,
            recovered_heat_kw = result.recovered_heat_kw,
            annual_saving = result.annual_saving,
            payback_years = result.payback_years,
            "시뮬레이션 완료"
        ),
        Outcome::Limited(run) => info!(limit = %run.limit, "물리 한계로 계산 중단"),
    }
    Ok(outcome)
}

/// 회수 토폴로지에서 목표 부하를 맞추는 배연 출구 온도를 역산한다.
pub fn solve_recovery_balance(
    state: &SimulationState,
    solver: &BalanceSolver,
) -> Result<Outcome<BalanceOutcome>, EngineError> {
    state.validate()?;
    let plant = match RecoveryPlant::build(state) {
        Ok(plant) => plant,
        Err(limit) => return Ok(Outcome::limited(limit, None)),
    };
    Ok(Outcome::Completed(solver.solve(
        &plant.boiler,
        &plant.demand,
        &plant.pump,
    )))
}

/// 전기 보일러 입력 정리 후의 유효 경제 변수.
struct EffectiveInputs {
    fuel_price: f64,
    boiler_eff: f64,
    co2_override: Option<Co2Override>,
}

impl EffectiveInputs {
    fn for_recovery(state: &SimulationState) -> Self {
        let mut inputs = Self {
            fuel_price: state.fuel_price,
            boiler_eff: state.boiler_eff,
            co2_override: state.fuel_co2,
        };
        if state.fuel_type != FuelType::Electricity {
            return inputs;
        }
        inputs.fuel_price = state.elec_price;
        if inputs
            .co2_override
            .is_some_and(|co2| co2.value < ELECTRIC_CO2_FLOOR)
        {
            debug!("전기 보일러 CO2 계수가 비정상이라 기본값 사용");
            inputs.co2_override = None;
        }
        if inputs.boiler_eff < ELECTRIC_EFF_FLOOR {
            debug!(input = inputs.boiler_eff, "전기 보일러 효율 보정");
            inputs.boiler_eff = ELECTRIC_BOILER_EFF;
        }
        inputs
    }
}

/// 회수 토폴로지의 보일러, 싱크 수요, 열펌프 묶음.
struct RecoveryPlant {
    inputs: EffectiveInputs,
    boiler: Boiler,
    demand: ThermalDemand,
    pump: HeatPump,
}

impl RecoveryPlant {
    fn build(state: &SimulationState) -> Result<Self, SoftLimit> {
        if state.flue_in_c < MIN_FLUE_TEMP_C {
            return Err(SoftLimit::FlueTooCold {
                flue_in_c: state.flue_in_c,
                min_c: MIN_FLUE_TEMP_C,
            });
        }

        let inputs = EffectiveInputs::for_recovery(state);
        let load_kw = state.load_kw();
        let boiler = Boiler::new(BoilerConfig {
            fuel_type: state.fuel_type,
            efficiency: inputs.boiler_eff,
            load_kw,
            flue_in_c: state.flue_in_c,
            flue_out_c: state.flue_out_c,
            excess_air: state.excess_air,
            calorific_override: state.fuel_calorific,
            co2_override: inputs.co2_override,
        });

        let system_target_c = state.system_target_temp_c();
        let is_steam = state.mode == OperatingMode::Steam;
        let span = estimate_enthalpy(system_target_c, is_steam)
            - estimate_enthalpy(state.load_in_c, false);
        if span < MIN_ENTHALPY_SPAN_KJ_PER_KG {
            return Err(SoftLimit::EnthalpySpanTooSmall {
                span_kj_per_kg: span,
                min_kj_per_kg: MIN_ENTHALPY_SPAN_KJ_PER_KG,
            });
        }
        let mass_flow_kg_per_s = load_kw / span;

        // 보충수 예열은 load_out 까지만 데운다
        let (target_temp_c, target_is_steam) =
            if is_steam && state.steam_strategy == SteamStrategy::Preheat {
                (state.load_out_c, false)
            } else {
                (system_target_c, is_steam)
            };

        let demand = ThermalDemand {
            inlet_temp_c: state.load_in_c,
            mass_flow_kg_per_s,
            target_temp_c,
            target_is_steam,
            system_target_temp_c: system_target_c,
        };
        let pump = HeatPump::new(HeatPumpConfig {
            recovery_type: state.recovery_type,
            mode: state.mode,
            strategy: state.steam_strategy,
            efficiency: state.perfection_degree,
            manual_cop: state.manual_cop,
        });

        debug!(mass_flow_kg_per_s, target_temp_c, system_target_c, "싱크 수요 산정");
        Ok(Self {
            inputs,
            boiler,
            demand,
            pump,
        })
    }
}

/// 구동 에너지의 비용/배출/1차 에너지.
struct DriveEconomics {
    cost_per_hour: f64,
    co2_kg_per_hour: f64,
    primary_kw: f64,
    site_kw: f64,
}

fn drive_economics(
    state: &SimulationState,
    plant: &RecoveryPlant,
    drive_energy_kw: f64,
) -> DriveEconomics {
    match state.recovery_type {
        RecoveryType::Mvr => DriveEconomics {
            cost_per_hour: drive_energy_kw * state.elec_price,
            co2_kg_per_hour: drive_energy_kw * FuelType::Electricity.profile().co2_kg_per_unit,
            primary_kw: drive_energy_kw * drive_pef(RecoveryType::Mvr),
            site_kw: drive_energy_kw,
        },
        RecoveryType::Absorption => {
            // 흡수식 구동열은 같은 보일러 연료로 만든다
            let input_kw = drive_energy_kw / plant.inputs.boiler_eff;
            let fuel_units = plant.boiler.fuel_rate_per_h(input_kw);
            DriveEconomics {
                cost_per_hour: fuel_units * plant.inputs.fuel_price,
                co2_kg_per_hour: fuel_units * plant.boiler.fuel().co2_kg_per_unit,
                primary_kw: input_kw * drive_pef(RecoveryType::Absorption),
                site_kw: input_kw,
            }
        }
    }
}

fn run_recovery(state: &SimulationState) -> Result<SimulationOutcome, EngineError> {
    let plant = match RecoveryPlant::build(state) {
        Ok(plant) => plant,
        Err(limit) => return Ok(Outcome::limited(limit, None)),
    };
    let baseline = plant.boiler.calculate_baseline(plant.inputs.fuel_price);
    let source = plant.boiler.source_potential();

    let run: HeatPumpRun = match plant.pump.simulate(&source, &plant.demand)? {
        Outcome::Completed(run) => run,
        Outcome::Limited(limited) => return Ok(Outcome::Limited(limited)),
    };

    let load_kw = state.load_kw();
    let recovered = run.recovered_heat_kw;

    // 회수 열량을 보일러 효율로 나눠 연료 물리 단위로 환산한다
    let saved_fuel_units = plant.boiler.fuel_rate_per_h(recovered / plant.inputs.boiler_eff);
    let saved_cost = saved_fuel_units * plant.inputs.fuel_price;
    let saved_co2 = saved_fuel_units * plant.boiler.fuel().co2_kg_per_unit;

    let drive = drive_economics(state, &plant, run.drive_energy_kw);

    let hourly_saving = saved_cost - drive.cost_per_hour;
    let annual_saving = hourly_saving * state.annual_hours;
    let investment = recovered * state.capex_hp;
    let payback_years = if annual_saving > 0.0 {
        investment / annual_saving
    } else {
        PAYBACK_SENTINEL_YEARS
    };

    let current_co2 = baseline.co2_kg_per_hour - saved_co2 + drive.co2_kg_per_hour;
    let co2_reduction_rate = reduction_percent(baseline.co2_kg_per_hour, current_co2);
    let primary_energy_ratio = if drive.primary_kw > 0.0 {
        recovered / drive.primary_kw
    } else {
        0.0
    };

    debug!(
        saved_fuel_units,
        saved_cost,
        drive_cost = drive.cost_per_hour,
        hourly_saving,
        "회수 경제성"
    );

    let load = match (state.mode, state.steam_strategy) {
        (OperatingMode::Water, _) => LoadKind::HotWater,
        (OperatingMode::Steam, SteamStrategy::Preheat) => LoadKind::Preheat,
        (OperatingMode::Steam, SteamStrategy::Gen) => LoadKind::Steam,
    };

    let result = SimulationResult {
        topology: state.topology,
        cop: run.cop.cop,
        lift_k: run.cop.lift_k,
        cop_is_manual: run.cop_is_manual,
        pressure_ratio: run.cop.pressure_ratio,
        recovered_heat_kw: recovered,
        drive_energy_kw: run.drive_energy_kw,
        annual_saving,
        payback_years,
        cost_per_hour: baseline.cost_per_hour - hourly_saving,
        baseline_cost_per_hour: baseline.cost_per_hour,
        baseline_co2_kg_per_hour: baseline.co2_kg_per_hour,
        co2_reduction_rate,
        primary_energy_ratio,
        decision: make_decision(annual_saving, payback_years),
        coupling: Some(coupling_data(
            load_kw,
            plant.inputs.boiler_eff,
            recovered,
            drive.site_kw,
            drive.primary_kw,
        )),
        limit_reason: Some(if run.is_sink_limited {
            LimitReason::SinkLimited
        } else {
            LimitReason::SourceLimited
        }),
        steam_tons: SteamTons {
            total: convert_kw_to_steam_tons(load_kw),
            heat_pump: convert_kw_to_steam_tons(recovered),
            boiler: convert_kw_to_steam_tons(load_kw - recovered),
        },
        request: RequestSummary {
            source: SourceKind::FlueGas,
            source_in_c: state.flue_in_c,
            source_out_c: run.actual_flue_outlet_c,
            load,
            load_in_c: state.load_in_c,
            load_out_c: plant.demand.target_temp_c,
            capacity_kw: recovered,
        },
        source: Some(source),
        dispatch: None,
    };
    Ok(Outcome::Completed(Box::new(result)))
}

fn run_standard(state: &SimulationState) -> SimulationOutcome {
    let (source_kind, source_out_c) = match state.topology {
        Topology::Parallel => (
            SourceKind::AmbientAir,
            state.source_temp_c - AIR_SOURCE_DROP_K,
        ),
        _ => (SourceKind::WasteWater, state.source_out_c),
    };
    let system_target_c = state.system_target_temp_c();
    let evap_temp_c = state.source_temp_c - state.topology.evaporator_approach_k();
    let cond_temp_c = system_target_c + CONDENSER_APPROACH_K;

    // 표준 토폴로지는 항상 전동 압축식이다
    let pump = HeatPump::new(HeatPumpConfig {
        recovery_type: RecoveryType::Mvr,
        mode: state.mode,
        strategy: state.steam_strategy,
        efficiency: state.perfection_degree,
        manual_cop: state.manual_cop,
    });
    let cop = pump.estimate_cop(evap_temp_c, cond_temp_c);
    if let Some(limit) = cop.error {
        return Outcome::limited(limit, Some(cop));
    }

    let boiler = Boiler::new(BoilerConfig {
        fuel_type: state.fuel_type,
        efficiency: state.boiler_eff,
        load_kw: state.load_kw(),
        flue_in_c: state.flue_in_c,
        flue_out_c: state.flue_out_c,
        excess_air: state.excess_air,
        calorific_override: state.fuel_calorific,
        co2_override: state.fuel_co2,
    });
    let baseline = boiler.calculate_baseline(state.fuel_price);

    let load_kw = state.load_kw();
    let power_kw = load_kw / cop.cop;
    let hp_cost = power_kw * state.elec_price;
    let hp_co2 = power_kw * FuelType::Electricity.profile().co2_kg_per_unit;
    let primary_kw = power_kw * PEF_ELECTRICITY;
    let primary_energy_ratio = if primary_kw > 0.0 {
        load_kw / primary_kw
    } else {
        0.0
    };

    let hourly_saving = baseline.cost_per_hour - hp_cost;
    let annual_saving = hourly_saving * state.annual_hours;
    let capex_diff = (load_kw * (state.capex_hp - state.capex_base)).max(0.0);
    let payback_years = if annual_saving > 0.0 {
        capex_diff / annual_saving
    } else {
        PAYBACK_SENTINEL_YEARS
    };

    let tons = convert_kw_to_steam_tons(load_kw);
    let result = SimulationResult {
        topology: state.topology,
        cop: cop.cop,
        lift_k: cop.lift_k,
        cop_is_manual: state.manual_cop.is_some(),
        pressure_ratio: cop.pressure_ratio,
        recovered_heat_kw: load_kw,
        drive_energy_kw: power_kw,
        annual_saving,
        payback_years,
        cost_per_hour: hp_cost,
        baseline_cost_per_hour: baseline.cost_per_hour,
        baseline_co2_kg_per_hour: baseline.co2_kg_per_hour,
        co2_reduction_rate: reduction_percent(baseline.co2_kg_per_hour, hp_co2),
        primary_energy_ratio,
        decision: make_decision(annual_saving, payback_years),
        coupling: Some(coupling_data(
            load_kw,
            state.boiler_eff,
            load_kw,
            power_kw,
            primary_kw,
        )),
        limit_reason: None,
        steam_tons: SteamTons {
            total: tons,
            heat_pump: tons,
            boiler: 0.0,
        },
        request: RequestSummary {
            source: source_kind,
            source_in_c: state.source_temp_c,
            source_out_c,
            load: match state.mode {
                OperatingMode::Water => LoadKind::HotWater,
                OperatingMode::Steam => LoadKind::Steam,
            },
            load_in_c: state.load_in_c,
            load_out_c: system_target_c,
            capacity_kw: load_kw,
        },
        source: None,
        dispatch: Some(hybrid_dispatch(
            load_kw,
            cop.cop,
            state.elec_price,
            baseline.cost_per_hour,
        )),
    };
    Outcome::Completed(Box::new(result))
}

fn reduction_percent(baseline: f64, current: f64) -> f64 {
    if baseline > 0.0 {
        (baseline - current) / baseline * 100.0
    } else {
        0.0
    }
}
