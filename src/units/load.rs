use serde::{Deserialize, Serialize};

use crate::physics::convert_steam_tons_to_kw;

/// 열부하 입력 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadUnit {
    /// kW
    #[default]
    Kw,
    /// 증기톤 (t/h)
    Ton,
}

impl LoadUnit {
    /// 부하 값을 kW로 환산한다.
    pub fn to_kw(self, value: f64) -> f64 {
        match self {
            LoadUnit::Kw => value,
            LoadUnit::Ton => convert_steam_tons_to_kw(value),
        }
    }
}
