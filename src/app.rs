use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::chart;
use crate::config::{Config, ConfigError, OutputFormat};
use crate::heat_pump::{
    calculate_cop, BalanceSolver, CopInput, OperatingMode, RecoveryType, SteamStrategy,
};
use crate::i18n::{self, Translator};
use crate::limits::EngineError;
use crate::physics::reference::{compare_with_if97, ReferenceError};
use crate::store::{StatePatch, StateStore};
use crate::system::{self, SimulationState, Topology};
use crate::ui_cli;

/// 열펌프 배열 회수 vs 보일러 비교 계산기.
#[derive(Debug, Parser)]
#[command(name = "heatpump_recovery_toolbox", version, about)]
pub struct Cli {
    /// 출력 언어 (auto, ko, en, zh)
    #[arg(long, global = true, default_value = "auto")]
    pub lang: String,
    /// 결과를 JSON으로 출력
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 전체 시뮬레이션
    Simulate(ScenarioArgs),
    /// 증발/응축 온도로 COP만 계산
    Cop(CopArgs),
    /// COP 곡선 데이터
    Chart(ScenarioArgs),
    /// 목표 부하를 맞추는 배연 출구 온도 역산 (회수 구성 전용)
    Balance(ScenarioArgs),
    /// 기본 입력을 시나리오 파일 형식으로 출력
    Preset {
        #[arg(long, value_enum)]
        topology: Option<Topology>,
        #[arg(long, value_enum)]
        mode: Option<OperatingMode>,
    },
    /// 근사 물성식을 IF97과 비교
    Physics {
        /// 절대 압력 [MPa]
        #[arg(long)]
        pressure: f64,
        /// 온도 [°C]
        #[arg(long)]
        temperature: f64,
    },
}

#[derive(Debug, Args)]
pub struct ScenarioArgs {
    #[arg(long, value_enum)]
    pub topology: Option<Topology>,
    #[arg(long, value_enum)]
    pub mode: Option<OperatingMode>,
    /// 기본값 위에 덮어쓸 시나리오 파일 (.toml 또는 .json)
    #[arg(long, short)]
    pub scenario: Option<PathBuf>,
    /// COP를 이 값으로 고정
    #[arg(long)]
    pub manual_cop: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CopArgs {
    /// 증발 온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    pub evap: f64,
    /// 응축 온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    pub cond: f64,
    /// 열역학 완전도
    #[arg(long, default_value_t = 0.45)]
    pub efficiency: f64,
    #[arg(long, value_enum, default_value_t)]
    pub mode: OperatingMode,
    #[arg(long, value_enum, default_value_t)]
    pub strategy: SteamStrategy,
    #[arg(long, value_enum, default_value_t)]
    pub recovery_type: RecoveryType,
}

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("시나리오 파일을 읽을 수 없습니다 ({path}): {source}")]
    ScenarioIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("시나리오 TOML 오류: {0}")]
    ScenarioToml(#[from] toml::de::Error),
    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML 출력 오류: {0}")]
    TomlOutput(#[from] toml::ser::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("IF97 비교 실패: {0}")]
    Reference(#[from] ReferenceError),
}

/// 시나리오 패치 파일을 읽는다. 확장자가 .json이면 JSON, 나머지는 TOML.
pub fn load_patch(path: &Path) -> Result<StatePatch, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::ScenarioIo {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let patch = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(patch)
}

/// 기본값 → 시나리오 파일 → 명령행 순으로 입력 상태를 만든다.
pub fn build_state(args: &ScenarioArgs, cfg: &Config) -> Result<SimulationState, AppError> {
    let patch = match &args.scenario {
        Some(path) => load_patch(path)?,
        None => StatePatch::default(),
    };
    let topology = args
        .topology
        .or(patch.topology)
        .unwrap_or(cfg.default_topology);
    let mode = args.mode.or(patch.mode).unwrap_or(cfg.default_mode);

    let mut store = StateStore::new(SimulationState::preset(topology, mode));
    let change = store.apply(&patch);
    tracing::debug!(changed = ?change.changed, "시나리오 병합");

    let cli_patch = StatePatch {
        topology: args.topology,
        mode: args.mode,
        manual_cop: args.manual_cop,
        ..StatePatch::default()
    };
    store.apply(&cli_patch);
    Ok(store.state().clone())
}

fn emit_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 명령 하나를 실행한다.
pub fn run(cli: Cli, cfg: &Config) -> Result<(), AppError> {
    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, cfg.locale_dir.as_deref());
    let json = cli.json || cfg.output == OutputFormat::Json;

    match cli.command {
        Command::Simulate(args) => {
            let state = build_state(&args, cfg)?;
            let outcome = system::simulate(&state)?;
            if json {
                emit_json(&outcome)?;
            } else {
                ui_cli::print_simulation(&tr, &outcome);
            }
        }
        Command::Cop(args) => {
            let est = calculate_cop(&CopInput {
                evap_temp_c: args.evap,
                cond_temp_c: args.cond,
                efficiency: args.efficiency,
                mode: args.mode,
                strategy: args.strategy,
                recovery_type: args.recovery_type,
            });
            if json {
                emit_json(&est)?;
            } else {
                ui_cli::print_cop(&tr, &est);
            }
        }
        Command::Chart(args) => {
            let state = build_state(&args, cfg)?;
            let actual_cop = system::simulate(&state)?
                .as_completed()
                .map(|result| result.cop);
            let chart = chart::generate(&state, actual_cop);
            if json {
                emit_json(&chart)?;
            } else {
                ui_cli::print_chart(&tr, &chart);
            }
        }
        Command::Balance(mut args) => {
            args.topology = Some(Topology::Recovery);
            let state = build_state(&args, cfg)?;
            let outcome = system::solve_recovery_balance(&state, &BalanceSolver::default())?;
            if json {
                emit_json(&outcome)?;
            } else {
                ui_cli::print_balance(&tr, &outcome);
            }
        }
        Command::Preset { topology, mode } => {
            let state = SimulationState::preset(
                topology.unwrap_or(cfg.default_topology),
                mode.unwrap_or(cfg.default_mode),
            );
            if json {
                emit_json(&state)?;
            } else {
                print!("{}", toml::to_string_pretty(&state)?);
            }
        }
        Command::Physics {
            pressure,
            temperature,
        } => {
            let check = compare_with_if97(pressure, temperature)?;
            if json {
                emit_json(&check)?;
            } else {
                ui_cli::print_physics(&tr, &check);
            }
        }
    }
    Ok(())
}
