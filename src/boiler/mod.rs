//! 기준 보일러: 연료 데이터와 배연 열원 잠재량.

pub mod fuel;
pub mod model;

pub use fuel::{FlueGasStoichiometry, FuelProfile, FuelType};
pub use model::{
    BaselineCost, Boiler, BoilerConfig, CalorificOverride, Co2Override, SourcePotential,
};
