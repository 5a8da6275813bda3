//! CLI 인터페이스 모듈 묶음.
//! 입력 파싱/결과 출력/조립을 한 네임스페이스로 관리한다.

pub mod command;
pub mod composition;
pub mod report;

pub use command::{Cli, CliAction, Command};
pub use composition::AppComposition;
pub use report::{ErrorClass, classify_error, print_outcome, report_error};
