//! 산업용 열펌프 배열 회수와 보일러 단독 운전을 비교하는 계산 엔진.
//! 계산 로직은 라이브러리에 두고 CLI는 입출력만 담당한다.

pub mod app;
pub mod boiler;
pub mod chart;
pub mod config;
pub mod heat_pump;
pub mod i18n;
pub mod limits;
pub mod physics;
pub mod store;
pub mod system;
pub mod ui_cli;
pub mod units;
