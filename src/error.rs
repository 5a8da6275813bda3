//! 사용자에게 그대로 노출되는 오류 종류.
//!
//! 유스케이스는 `anyhow::Result`로 전파하고, CLI 계층은 downcast로 종류를 구분한다.

/// 레지스트라 명령 실행 중 발생하는 분류된 오류.
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    /// 설정 값이 잘못되었거나 읽을 수 없음
    #[error("{0}")]
    Configuration(String),

    /// 필수 파라미터가 어떤 소스에서도 해석되지 않음
    #[error(
        "parameter '{name}' is required but was not provided via CLI, config file, environment, or prompt"
    )]
    MissingParameter { name: String },

    /// 액세스 토큰 획득 실패
    #[error("failed to obtain access token: {0}")]
    Authentication(String),

    /// 원격 호출 실패(HTTP 상태/본문 포함)
    #[error("{}{body}", format_status(*.status))]
    Service { status: Option<u16>, body: String },

    /// 세션(SDK) 초기화 실패
    #[error("failed to initialize Agent Engine session: {0}")]
    Initialization(String),

    /// 사용자 입력 검증 실패
    #[error("{0}")]
    Validation(String),
}

impl RegistrarError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn service(status: u16, body: impl Into<String>) -> Self {
        Self::Service {
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Service {
            status: None,
            body: message.into(),
        }
    }

    /// 설정 계열 오류(잘못된 값/누락 파라미터) 여부.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::MissingParameter { .. })
    }
}

fn format_status(status: Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP error {code}: "),
        None => "request failed: ".to_string(),
    }
}
