//! 파라미터 해석 규칙(사양/소스/값)을 표현하는 값 객체.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 환경변수 이름 변환에 사용하는 네임스페이스 접두어.
pub const ENV_PREFIX: &str = "AGENTSPACE_";

/// 하나의 설정 값을 해석하는 방법.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub prompt: Option<String>,
    pub required: bool,
    pub default: Option<ParamValue>,
    /// 로그/진단 출력에서 값을 가려야 하는지 여부
    pub secret: bool,
}

impl ParameterSpec {
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prompt: None,
            required: false,
            default: None,
            secret: false,
        }
    }

    pub fn required(name: &str) -> Self {
        Self {
            required: true,
            ..Self::optional(name)
        }
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }

    pub fn with_default(mut self, default: impl Into<ParamValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_default_opt(mut self, default: Option<String>) -> Self {
        self.default = default.map(ParamValue::Text);
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// 네임스페이스가 붙은 환경변수 이름 (`project_id` -> `AGENTSPACE_PROJECT_ID`).
    pub fn env_var_name(&self) -> String {
        env_var_name(&self.name)
    }
}

pub fn env_var_name(name: &str) -> String {
    let upper: String = name
        .chars()
        .map(|c| match c {
            '-' | '.' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect();
    format!("{ENV_PREFIX}{upper}")
}

/// 네임스페이스 변수 다음에 조회하는 잘 알려진 환경변수.
pub fn well_known_env_vars(name: &str) -> &'static [&'static str] {
    match name {
        "project_id" => &["GOOGLE_CLOUD_PROJECT"],
        "location" => &["GOOGLE_CLOUD_LOCATION"],
        "oauth_client_id" => &["OAUTH_CLIENT_ID"],
        "oauth_client_secret" => &["OAUTH_CLIENT_SECRET"],
        _ => &[],
    }
}

/// 값이 어느 단계에서 해석되었는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Cli,
    ConfigFile,
    Environment,
    Prompt,
    Default,
}

impl SourceKind {
    /// 고정된 해석 순서. 어떤 파라미터도 이 순서를 바꾸지 않는다.
    pub const ORDER: [SourceKind; 5] = [
        SourceKind::Cli,
        SourceKind::ConfigFile,
        SourceKind::Environment,
        SourceKind::Prompt,
        SourceKind::Default,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Cli => "cli",
            SourceKind::ConfigFile => "config_file",
            SourceKind::Environment => "environment",
            SourceKind::Prompt => "prompt",
            SourceKind::Default => "default",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 타입을 해석하지 않는 파라미터 값(문자열 또는 문자열 목록).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn into_text(self) -> String {
        match self {
            ParamValue::Text(text) => text,
            ParamValue::List(items) => items.join(","),
        }
    }

    /// 텍스트는 쉼표/공백 기준으로 분리한다.
    pub fn into_list(self) -> Vec<String> {
        match self {
            ParamValue::List(items) => items,
            ParamValue::Text(text) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

/// 해석 결과와 출처.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: ParamValue,
    pub source: SourceKind,
}
