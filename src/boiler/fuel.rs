//! 연료 물성 레지스트리.
//!
//! 레지스트리는 불변 상수이며 [`FuelType::profile`]은 매번 새 사본을 돌려준다.
//! 사용자 보정은 사본에만 적용된다.

use serde::{Deserialize, Serialize};

/// 연료 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    #[default]
    NaturalGas,
    Electricity,
    Coal,
    Diesel,
    Biomass,
    SteamPipe,
}

/// 이론 연소 계수 (연료 단위당).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlueGasStoichiometry {
    /// alpha = 1 일 때의 이론 배가스량 [m³/unit]
    pub theoretical_gas_m3: f64,
    /// 이론 공기량 [m³/unit]
    pub theoretical_air_m3: f64,
    /// alpha = 1 기준 수분 이슬점 [°C]
    pub reference_dew_point_c: f64,
}

/// 연료 물성 사본.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelProfile {
    pub fuel_type: FuelType,
    pub name: &'static str,
    /// 저위발열량 [MJ/unit]
    pub calorific_mj_per_unit: f64,
    /// 대표 연소 효율
    pub efficiency: f64,
    /// 물리 단위 표기
    pub unit: &'static str,
    /// [kgCO2/unit]
    pub co2_kg_per_unit: f64,
    /// 배가스가 없는 연료(전기, 배관 증기)는 `None`
    pub flue: Option<FlueGasStoichiometry>,
    /// 투입 열량 대비 최대 회수 잠열 비율
    pub max_latent_ratio: f64,
}

const fn flue(gas: f64, air: f64, dew: f64) -> Option<FlueGasStoichiometry> {
    Some(FlueGasStoichiometry {
        theoretical_gas_m3: gas,
        theoretical_air_m3: air,
        reference_dew_point_c: dew,
    })
}

const NATURAL_GAS: FuelProfile = FuelProfile {
    fuel_type: FuelType::NaturalGas,
    name: "천연가스",
    calorific_mj_per_unit: 36.0,
    efficiency: 0.92,
    unit: "m³",
    co2_kg_per_unit: 2.02,
    flue: flue(9.2, 9.0, 57.0),
    max_latent_ratio: 0.11,
};

const ELECTRICITY: FuelProfile = FuelProfile {
    fuel_type: FuelType::Electricity,
    name: "산업용 전력",
    calorific_mj_per_unit: 3.6,
    efficiency: 0.98,
    unit: "kWh",
    co2_kg_per_unit: 0.58,
    flue: None,
    max_latent_ratio: 0.0,
};

const COAL: FuelProfile = FuelProfile {
    fuel_type: FuelType::Coal,
    name: "유연탄",
    calorific_mj_per_unit: 25.2,
    efficiency: 0.75,
    unit: "kg",
    co2_kg_per_unit: 2.38,
    flue: flue(7.35, 7.0, 45.0),
    max_latent_ratio: 0.0,
};

const DIESEL: FuelProfile = FuelProfile {
    fuel_type: FuelType::Diesel,
    name: "경유",
    calorific_mj_per_unit: 37.08,
    efficiency: 0.88,
    unit: "L",
    co2_kg_per_unit: 2.781,
    flue: flue(10.3, 9.888, 47.0),
    max_latent_ratio: 0.0,
};

const BIOMASS: FuelProfile = FuelProfile {
    fuel_type: FuelType::Biomass,
    name: "바이오매스 펠릿",
    calorific_mj_per_unit: 17.28,
    efficiency: 0.85,
    unit: "kg",
    co2_kg_per_unit: 0.24,
    flue: flue(5.52, 5.04, 55.0),
    max_latent_ratio: 0.08,
};

const STEAM_PIPE: FuelProfile = FuelProfile {
    fuel_type: FuelType::SteamPipe,
    name: "배관 증기",
    calorific_mj_per_unit: 2700.0,
    efficiency: 0.98,
    unit: "t",
    co2_kg_per_unit: 262.5,
    flue: None,
    max_latent_ratio: 0.0,
};

impl FuelType {
    pub const ALL: [FuelType; 6] = [
        FuelType::NaturalGas,
        FuelType::Electricity,
        FuelType::Coal,
        FuelType::Diesel,
        FuelType::Biomass,
        FuelType::SteamPipe,
    ];

    /// 레지스트리 항목의 사본.
    pub fn profile(self) -> FuelProfile {
        match self {
            FuelType::NaturalGas => NATURAL_GAS,
            FuelType::Electricity => ELECTRICITY,
            FuelType::Coal => COAL,
            FuelType::Diesel => DIESEL,
            FuelType::Biomass => BIOMASS,
            FuelType::SteamPipe => STEAM_PIPE,
        }
    }

    /// 배가스 중 수증기 체적 비율 [%].
    ///
    /// 천연가스는 CH4 + 2 O2 -> CO2 + 2 H2O 에서 연료 1 m³당 수증기 2 m³로
    /// 계산하고, 나머지는 대표값을 쓴다.
    pub fn water_vapor_volume_percent(self, actual_flue_factor: f64) -> f64 {
        match self {
            FuelType::NaturalGas if actual_flue_factor > 0.0 => 2.0 / actual_flue_factor * 100.0,
            FuelType::Coal => 8.0,
            FuelType::Diesel => 12.0,
            _ => 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_copies_are_independent() {
        let mut copy = FuelType::NaturalGas.profile();
        copy.calorific_mj_per_unit = 1.0;
        assert_eq!(FuelType::NaturalGas.profile().calorific_mj_per_unit, 36.0);
    }

    #[test]
    fn only_combustion_fuels_have_flue_gas() {
        for fuel in FuelType::ALL {
            let has_flue = fuel.profile().flue.is_some();
            let expected = !matches!(fuel, FuelType::Electricity | FuelType::SteamPipe);
            assert_eq!(has_flue, expected, "{fuel:?}");
        }
    }

    #[test]
    fn natural_gas_vapor_fraction_is_stoichiometric() {
        let pct = FuelType::NaturalGas.water_vapor_volume_percent(11.0);
        assert!((pct - 18.18).abs() < 0.01);
        assert_eq!(FuelType::Coal.water_vapor_volume_percent(9.0), 8.0);
    }
}
