//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod environment;
mod prompter;
mod reporter;
mod token_provider;
mod user_confirmer;

pub use environment::ProcessEnvironment;
pub use prompter::StdinPrompter;
pub use reporter::ConsoleReporter;
pub use token_provider::{AmbientTokenProvider, DEFAULT_TOKEN_COMMAND, TOKEN_ENV_VARS};
pub use user_confirmer::StdinConfirmer;
