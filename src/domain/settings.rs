//! 서비스별 설정 구조체와 명령 1회분의 해석 결과 모음.

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::parameter::SourceKind;

pub const DEFAULT_API_LOCATION: &str = "global";
pub const DEFAULT_RE_LOCATION: &str = "global";
pub const DEFAULT_ENGINE_LOCATION: &str = "us-central1";
pub const DEFAULT_AUTH_LOCATION: &str = "us";
pub const DEFAULT_SCOPES: &[&str] = &["email"];

/// Agent Registry(갤러리) 호출 대상.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryConfig {
    pub project_id: String,
    pub app_id: String,
    /// Discovery Engine API 위치
    pub api_location: String,
    /// Reasoning Engine 위치
    pub re_location: String,
}

/// Agent Engine(배포 레지스트리) 호출 대상.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    pub project_id: String,
    pub location: String,
}

/// 갤러리에 등록할 에이전트 정의.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentConfig {
    pub display_name: String,
    pub description: String,
    pub tool_description: String,
    pub adk_deployment_id: String,
    pub auth_id: Option<String>,
    pub icon_uri: Option<String>,
}

/// Authorization 호출 대상.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationConfig {
    pub project_id: String,
    pub location: String,
}

/// server-side OAuth2 클라이언트 자격 증명.
#[derive(Debug)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: SecretString,
}

/// 명령 1회 동안만 존재하는, 삽입 순서를 유지하는 이름-값 모음.
///
/// JSON으로는 평평한 문자열 객체로 직렬화되며 출처 정보는 포함하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: IndexMap<String, String>,
    #[serde(skip)]
    sources: IndexMap<String, SourceKind>,
}

impl ResolvedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: String, source: SourceKind) {
        self.values.insert(name.to_string(), value);
        self.sources.insert(name.to_string(), source);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn source(&self, name: &str) -> Option<SourceKind> {
        self.sources.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 값과 출처를 함께 노출하는 진단용 뷰.
    pub fn with_sources(&self) -> IndexMap<String, ResolvedEntry> {
        self.values
            .iter()
            .map(|(name, value)| {
                (
                    name.clone(),
                    ResolvedEntry {
                        value: value.clone(),
                        source: self.sources.get(name).copied(),
                    },
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEntry {
    pub value: String,
    pub source: Option<SourceKind>,
}
