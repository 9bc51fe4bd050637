//! 입력 단위 정의 및 환산.

pub mod emission;
pub mod energy;
pub mod load;

pub use emission::Co2FactorUnit;
pub use energy::{calorific_to_mj, convert_energy, EnergyUnit};
pub use load::LoadUnit;
