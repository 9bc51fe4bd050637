//! 역방향 열수지 솔버.
//!
//! 싱크 목표 열량을 정확히 채우는 배연 출구 온도를 찾는다. 증발기가 필요로 하는
//! 열량 `Q_sink (COP-1)/COP`와 그 출구 온도에서 배연이 내놓는 열량이 같아질
//! 때까지 출구 온도를 불균형에 비례해 움직인다.

use serde::Serialize;
use tracing::{debug, warn};

use super::model::{HeatPump, ThermalDemand, CONDENSER_APPROACH_K, EVAPORATOR_APPROACH_K};
use crate::boiler::Boiler;
use crate::physics::round_to;

const START_FLUE_OUT_C: f64 = 60.0;
const MIN_FLUE_OUT_C: f64 = 30.0;
/// 입구 온도와의 최소 간격 [K]
const INLET_MARGIN_K: f64 = 0.1;
/// 불균형 1 kW당 출구 온도 이동량 [K]
const STEP_GAIN_K_PER_KW: f64 = 0.01;
const LOG_EVERY: usize = 50;
const LOG_NEAR_KW: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSolver {
    pub tolerance_kw: f64,
    pub max_iterations: usize,
}

impl Default for BalanceSolver {
    fn default() -> Self {
        Self {
            tolerance_kw: 0.5,
            max_iterations: 1000,
        }
    }
}

/// 수렴한 운전점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancePoint {
    pub iterations: usize,
    /// 목표 부하를 맞추기 위한 배연 출구 온도 [°C]
    pub required_flue_out_c: f64,
    pub cop: f64,
    pub target_load_kw: f64,
    pub source_total_kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceReason {
    /// 출구 하한까지 내려도 열원이 부족하다
    SourceInsufficient,
    MaxIterations,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "balance", rename_all = "snake_case")]
pub enum BalanceOutcome {
    Converged(BalancePoint),
    Diverged {
        iterations: usize,
        last_flue_out_c: f64,
        reason: DivergenceReason,
    },
}

impl BalanceOutcome {
    pub fn point(&self) -> Option<&BalancePoint> {
        match self {
            BalanceOutcome::Converged(point) => Some(point),
            BalanceOutcome::Diverged { .. } => None,
        }
    }
}

impl BalanceSolver {
    pub fn solve(
        &self,
        boiler: &Boiler,
        demand: &ThermalDemand,
        pump: &HeatPump,
    ) -> BalanceOutcome {
        let target_load_kw = demand.sink_duty_kw();
        let flue_in_c = boiler.config().flue_in_c;
        let upper_c = flue_in_c - INLET_MARGIN_K;
        let cond_temp_c = demand.system_target_temp_c + CONDENSER_APPROACH_K;

        let mut flue_out_c = START_FLUE_OUT_C.min(upper_c);
        let mut diff = 0.0;

        for i in 0..self.max_iterations {
            let cop = pump.estimate_cop(flue_out_c - EVAPORATOR_APPROACH_K, cond_temp_c).cop;
            let needed_kw = if cop > 1.0 {
                target_load_kw * (cop - 1.0) / cop
            } else {
                0.0
            };
            let available_kw = boiler.source_potential_at(flue_out_c).total_kw;
            diff = available_kw - needed_kw;

            if i % LOG_EVERY == 0 || diff.abs() < LOG_NEAR_KW {
                debug!(
                    iteration = i,
                    flue_out_c, available_kw, needed_kw, diff, "역열수지 반복"
                );
            }

            if diff.abs() < self.tolerance_kw {
                debug!(iterations = i + 1, flue_out_c, "역열수지 수렴");
                return BalanceOutcome::Converged(BalancePoint {
                    iterations: i + 1,
                    required_flue_out_c: round_to(flue_out_c, 2),
                    cop,
                    target_load_kw: round_to(target_load_kw, 1),
                    source_total_kw: round_to(available_kw, 1),
                });
            }

            flue_out_c += diff * STEP_GAIN_K_PER_KW;
            if flue_out_c >= flue_in_c {
                flue_out_c = upper_c;
            }
            if flue_out_c < MIN_FLUE_OUT_C {
                flue_out_c = MIN_FLUE_OUT_C;
            }
        }

        let reason = if flue_out_c <= MIN_FLUE_OUT_C && diff < 0.0 {
            DivergenceReason::SourceInsufficient
        } else {
            DivergenceReason::MaxIterations
        };
        warn!(?reason, flue_out_c, "역열수지 수렴 실패");
        BalanceOutcome::Diverged {
            iterations: self.max_iterations,
            last_flue_out_c: round_to(flue_out_c, 2),
            reason,
        }
    }
}
