use serde::{Deserialize, Serialize};

/// 에너지 단위. 내부 기준은 kWh이며 발열량은 MJ/연료단위로 정규화한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum EnergyUnit {
    #[serde(rename = "kWh")]
    #[value(name = "kWh")]
    KilowattHour,
    #[serde(rename = "MJ")]
    #[value(name = "MJ")]
    Megajoule,
    #[serde(rename = "kJ")]
    #[value(name = "kJ")]
    Kilojoule,
    #[serde(rename = "kcal")]
    #[value(name = "kcal")]
    KiloCalorie,
    #[serde(rename = "GJ")]
    #[value(name = "GJ")]
    Gigajoule,
}

/// 1 kWh에 해당하는 각 단위의 값.
fn per_kwh(unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::KilowattHour => 1.0,
        EnergyUnit::Megajoule => 3.6,
        EnergyUnit::Kilojoule => 3600.0,
        EnergyUnit::KiloCalorie => 860.0,
        EnergyUnit::Gigajoule => 0.0036,
    }
}

/// 에너지를 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    value / per_kwh(from) * per_kwh(to)
}

/// 연료 단위당 발열량을 MJ/연료단위로 정규화한다.
pub fn calorific_to_mj(value: f64, unit: EnergyUnit) -> f64 {
    convert_energy(value, unit, EnergyUnit::Megajoule)
}
