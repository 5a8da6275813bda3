//! 명령 결과와 오류를 사용자에게 보고하는 모듈.

use std::io::Write;

use anyhow::Result;

use crate::application::usecases::CommandOutcome;
use crate::error::RegistrarError;
use crate::infrastructure::adapters::ConsoleReporter;
use crate::infrastructure::render::{OutputFormat, render};

/// 오류 진단 접두어 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    Operation,
    Unexpected,
}

impl ErrorClass {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Configuration => "Configuration error:",
            Self::Operation => "Operation failed:",
            Self::Unexpected => "Unexpected error:",
        }
    }
}

/// 컨텍스트로 감싸진 경우까지 체인을 따라 `RegistrarError`를 찾는다.
pub fn classify_error(err: &anyhow::Error) -> ErrorClass {
    let typed = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<RegistrarError>());
    match typed {
        Some(kind) if kind.is_configuration() => ErrorClass::Configuration,
        Some(_) => ErrorClass::Operation,
        None => ErrorClass::Unexpected,
    }
}

/// 결과는 `out`(stdout)에, 상태 줄은 stderr에 쓴다.
pub fn print_outcome(
    outcome: &CommandOutcome,
    format: OutputFormat,
    out: &mut dyn Write,
    reporter: &ConsoleReporter,
) -> Result<()> {
    match outcome {
        CommandOutcome::Completed { result, message } => {
            if !result.is_null() {
                writeln!(out, "{}", render(result, format)?)?;
            }
            if let Some(message) = message {
                reporter.success(message);
            }
        }
        CommandOutcome::Cancelled => reporter.plain("Operation cancelled."),
    }
    Ok(())
}

/// 오류를 접두어와 함께 출력한다. 분류되지 않은 오류는 전체 체인을 로그로 남긴다.
pub fn report_error(err: &anyhow::Error, reporter: &ConsoleReporter) {
    let class = classify_error(err);
    if class == ErrorClass::Unexpected {
        tracing::error!(error = ?err, "unexpected failure");
    }
    reporter.error(&format!("{} {err:#}", class.prefix()));
}
