use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::heat_pump::OperatingMode;
use crate::system::Topology;

const CONFIG_FILE: &str = "config.toml";

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `auto` | `ko` | `en` | `zh`
    pub language: String,
    /// 언어팩 디렉터리. 없으면 `locales/`를 찾는다.
    pub locale_dir: Option<String>,
    pub output: OutputFormat,
    /// 시나리오 파일이 없을 때 쓰는 기본 구성
    pub default_topology: Topology,
    pub default_mode: OperatingMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            locale_dir: None,
            output: OutputFormat::Text,
            default_topology: Topology::Recovery,
            default_mode: OperatingMode::Water,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 작업 디렉터리의 config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

/// 지정한 경로의 설정을 읽는다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: Config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), ?cfg, "설정 로드");
    Ok(cfg)
}

impl Config {
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("language = \"en\"\noutput = \"json\"\n").unwrap();
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(cfg.default_topology, Topology::Recovery);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), Config::default());
    }

    #[test]
    fn saved_file_loads_back() {
        let path = std::env::temp_dir()
            .join(format!("heatpump_recovery_config_{}.toml", std::process::id()));
        let cfg = Config {
            language: "zh".to_string(),
            output: OutputFormat::Json,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        let loaded = load_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("heatpump_recovery_config_missing.toml");
        assert!(matches!(load_from(&path), Err(ConfigError::Io { .. })));
    }
}
