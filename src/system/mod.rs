//! 시스템 오케스트레이터: 토폴로지별로 보일러와 열펌프를 엮고 경제성을 판단한다.

pub mod decision;
pub mod result;
pub mod simulate;
pub mod state;

pub use decision::{
    coupling_data, hybrid_dispatch, make_decision, CouplingData, Decision, DecisionTier,
    DispatchMode, HybridDispatch, Winner,
};
pub use result::{
    LimitReason, LoadKind, RequestSummary, SimulationResult, SourceKind, SteamTons,
};
pub use simulate::{simulate, solve_recovery_balance};
pub use state::{SimulationState, StateError, Topology};
