//! COP 곡선 데이터 생성.
//!
//! 입력 한 축을 훑으며 COP 엔진을 반복 호출한다. 물리적으로 불가능한 점은
//! `cop: None`으로 남기며, 그리는 쪽은 이를 보간하지 않고 끊어서 표시해야 한다.

use serde::Serialize;

use crate::heat_pump::model::{CONDENSER_APPROACH_K, EVAPORATOR_APPROACH_K};
use crate::heat_pump::{calculate_cop, CopInput, OperatingMode, RecoveryType};
use crate::physics::saturation_temperature_from_pressure;
use crate::system::SimulationState;

/// 훑는 축.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SweepAxis {
    /// 회수: 목표 배연 출구 온도 [°C]
    TargetFlueOutlet,
    /// 표준 증기: 포화 압력 [MPa]
    SaturationPressure,
    /// 표준 온수: 열원 온도 [°C]
    SourceTemperature,
}

impl SweepAxis {
    /// 운전점과 가장 가까운 표본을 찾을 때의 허용 폭.
    pub fn tolerance(self) -> f64 {
        match self {
            SweepAxis::SaturationPressure => 0.05,
            SweepAxis::TargetFlueOutlet | SweepAxis::SourceTemperature => 2.5,
        }
    }

    pub fn key(self) -> &'static str {
        use crate::i18n::keys;
        match self {
            SweepAxis::TargetFlueOutlet => keys::AXIS_FLUE_OUTLET,
            SweepAxis::SaturationPressure => keys::AXIS_PRESSURE,
            SweepAxis::SourceTemperature => keys::AXIS_SOURCE_TEMP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub cop: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopChart {
    pub axis: SweepAxis,
    /// x 오름차순
    pub points: Vec<ChartPoint>,
    /// 실제 운전점 (곡선과 별개로 표시)
    pub operating_point: ChartPoint,
}

impl CopChart {
    /// 운전점에 가장 가까운 곡선 표본.
    pub fn nearest_to_operating_point(&self) -> Option<&ChartPoint> {
        nearest_sample(&self.points, self.operating_point.x, self.axis.tolerance())
    }
}

/// 입력 상태에 맞는 축으로 COP 곡선을 만든다.
///
/// `actual_cop`이 있으면 운전점 y값으로 쓰고, 없으면 운전점에서 새로 계산한다.
pub fn generate(state: &SimulationState, actual_cop: Option<f64>) -> CopChart {
    let system_target_c = state.system_target_temp_c();
    let sample = |evap_temp_c: f64, cond_temp_c: f64, recovery_type: RecoveryType| {
        let est = calculate_cop(&CopInput {
            evap_temp_c,
            cond_temp_c,
            efficiency: state.perfection_degree,
            mode: state.mode,
            strategy: state.steam_strategy,
            recovery_type,
        });
        est.error.is_none().then_some(est.cop)
    };

    let (axis, points, operating_x) = if state.topology.is_recovery() {
        let cond = system_target_c + CONDENSER_APPROACH_K;
        let points = (30..=80)
            .step_by(5)
            .map(|x| {
                let x = f64::from(x);
                ChartPoint {
                    x,
                    cop: sample(x - EVAPORATOR_APPROACH_K, cond, state.recovery_type),
                }
            })
            .collect();
        (SweepAxis::TargetFlueOutlet, points, state.flue_out_c)
    } else {
        let evap = state.source_temp_c - state.topology.evaporator_approach_k();
        match state.mode {
            OperatingMode::Steam => {
                let points = (1..=12)
                    .map(|i| {
                        let p = f64::from(i) / 10.0;
                        let cond = saturation_temperature_from_pressure(p) + CONDENSER_APPROACH_K;
                        ChartPoint {
                            x: p,
                            cop: sample(evap, cond, RecoveryType::Mvr),
                        }
                    })
                    .collect();
                (SweepAxis::SaturationPressure, points, state.target)
            }
            OperatingMode::Water => {
                let cond = system_target_c + CONDENSER_APPROACH_K;
                let approach = state.topology.evaporator_approach_k();
                let points = (-20..=40)
                    .step_by(5)
                    .map(|x| {
                        let x = f64::from(x);
                        ChartPoint {
                            x,
                            cop: sample(x - approach, cond, RecoveryType::Mvr),
                        }
                    })
                    .collect();
                (SweepAxis::SourceTemperature, points, state.source_temp_c)
            }
        }
    };

    let operating_cop = actual_cop.or_else(|| operating_cop(state, system_target_c));
    CopChart {
        axis,
        points,
        operating_point: ChartPoint {
            x: operating_x,
            cop: operating_cop,
        },
    }
}

fn operating_cop(state: &SimulationState, system_target_c: f64) -> Option<f64> {
    let (evap, recovery_type) = if state.topology.is_recovery() {
        (state.flue_out_c - EVAPORATOR_APPROACH_K, state.recovery_type)
    } else {
        (
            state.source_temp_c - state.topology.evaporator_approach_k(),
            RecoveryType::Mvr,
        )
    };
    let est = calculate_cop(&CopInput {
        evap_temp_c: evap,
        cond_temp_c: system_target_c + CONDENSER_APPROACH_K,
        efficiency: state.perfection_degree,
        mode: state.mode,
        strategy: state.steam_strategy,
        recovery_type,
    });
    est.error.is_none().then_some(est.cop)
}

/// 허용 폭 안에서 x가 가장 가까운 표본을 선형 탐색으로 찾는다.
pub fn nearest_sample(points: &[ChartPoint], x: f64, tolerance: f64) -> Option<&ChartPoint> {
    points
        .iter()
        .map(|p| (p, (p.x - x).abs()))
        .filter(|(_, d)| *d <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_respects_tolerance() {
        let points = [
            ChartPoint { x: 30.0, cop: Some(3.0) },
            ChartPoint { x: 35.0, cop: None },
        ];
        assert_eq!(nearest_sample(&points, 33.0, 2.5).map(|p| p.x), Some(35.0));
        assert_eq!(nearest_sample(&points, 31.0, 2.5).map(|p| p.x), Some(30.0));
        assert!(nearest_sample(&points, 40.0, 2.5).is_none());
    }
}
