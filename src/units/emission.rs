use serde::{Deserialize, Serialize};

/// CO2 배출계수 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Co2FactorUnit {
    /// kgCO2 / 연료 물리 단위 (m³, kg, L ...)
    #[default]
    #[serde(rename = "kgCO2/unit")]
    #[value(name = "kgCO2/unit")]
    PerUnit,
    /// kgCO2 / kWh (에너지 환산 기준)
    #[serde(rename = "kgCO2/kWh")]
    #[value(name = "kgCO2/kWh")]
    PerKwh,
}
