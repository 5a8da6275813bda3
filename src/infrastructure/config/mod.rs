//! JSON 설정 파일 로딩 모듈.
//! 파일이 없거나 읽을 수 없으면 빈 설정으로 계속 진행한다.

mod loader;
mod utils;

pub use loader::{JsonConfigRepository, load_config_file};
pub use utils::expand_home;
