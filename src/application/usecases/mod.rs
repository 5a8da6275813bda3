//! 명령 단위 유스케이스 모음.

pub mod authorization;
pub mod engine;
pub mod inspect_config;
pub mod registry;

use anyhow::Result;
use serde_json::Value;

use crate::application::ports::UserConfirmer;

/// 명령 실행 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// 출력할 JSON 결과와 선택적 성공 메시지
    Completed {
        result: Value,
        message: Option<String>,
    },
    /// 사용자가 확인 단계에서 취소함(네트워크 호출 없음)
    Cancelled,
}

impl CommandOutcome {
    pub fn completed(result: Value) -> Self {
        Self::Completed {
            result,
            message: None,
        }
    }

    pub fn with_message(result: Value, message: impl Into<String>) -> Self {
        Self::Completed {
            result,
            message: Some(message.into()),
        }
    }
}

/// `--force`가 아니면 사용자 확인을 받는다.
pub(crate) fn confirm_destructive(
    confirmer: &dyn UserConfirmer,
    force: bool,
    message: &str,
) -> Result<bool> {
    if force {
        return Ok(true);
    }
    confirmer.confirm(message)
}

/// 삭제 응답 본문이 비어 있으면 안내 메시지 객체로 대체한다.
pub(crate) fn deletion_result(response: Value, message: String) -> Value {
    match response {
        Value::Null => serde_json::json!({ "message": message }),
        Value::Object(ref map) if map.is_empty() => serde_json::json!({ "message": message }),
        other => other,
    }
}
