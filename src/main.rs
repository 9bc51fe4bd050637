use clap::Parser;
use tracing_subscriber::EnvFilter;

use heatpump_recovery_toolbox::{app, config};

/// 프로그램의 엔트리 포인트. 로그를 설정하고 설정 파일을 읽은 뒤 명령을 실행한다.
fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = app::Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: app::Cli) -> Result<(), app::AppError> {
    let cfg = config::load_or_default()?;
    app::run(cli, &cfg)
}
