//! 열펌프 계산: COP 엔진, 열수지 모델, 역방향 열수지 솔버.

pub mod balance;
pub mod cop;
pub mod model;

pub use balance::{BalanceOutcome, BalancePoint, BalanceSolver, DivergenceReason};
pub use cop::{
    calculate_cop, carnot_heating_cop, CopEstimate, CopInput, OperatingMode, RecoveryType,
    SteamStrategy,
};
pub use model::{HeatPump, HeatPumpConfig, HeatPumpRun, ThermalDemand};
