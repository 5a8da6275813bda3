//! 명령들이 공유하는 파라미터 사양 목록.

use crate::domain::parameter::ParameterSpec;
use crate::domain::settings::{
    DEFAULT_API_LOCATION, DEFAULT_AUTH_LOCATION, DEFAULT_ENGINE_LOCATION, DEFAULT_RE_LOCATION,
    DEFAULT_SCOPES,
};

pub fn project_id() -> ParameterSpec {
    ParameterSpec::required("project_id").with_prompt("Enter Google Cloud Project ID")
}

pub fn app_id() -> ParameterSpec {
    ParameterSpec::required("app_id").with_prompt("Enter App ID")
}

pub fn api_location() -> ParameterSpec {
    ParameterSpec::optional("api_location").with_default(DEFAULT_API_LOCATION)
}

pub fn re_location() -> ParameterSpec {
    ParameterSpec::optional("re_location").with_default(DEFAULT_RE_LOCATION)
}

pub fn engine_location() -> ParameterSpec {
    ParameterSpec::optional("location").with_default(DEFAULT_ENGINE_LOCATION)
}

/// 엔진 리전(`location`)과 분리된 키. 설정 파일/환경변수의 `location`은 여기로 흘러들지 않는다.
pub fn auth_location() -> ParameterSpec {
    ParameterSpec::optional("auth_location").with_default(DEFAULT_AUTH_LOCATION)
}

pub fn display_name() -> ParameterSpec {
    ParameterSpec::required("display_name").with_prompt("Enter agent display name")
}

pub fn description() -> ParameterSpec {
    ParameterSpec::required("description").with_prompt("Enter agent description")
}

pub fn tool_description() -> ParameterSpec {
    ParameterSpec::required("tool_description").with_prompt("Enter tool description")
}

pub fn adk_deployment_id() -> ParameterSpec {
    ParameterSpec::required("adk_deployment_id").with_prompt("Enter ADK deployment ID")
}

pub fn auth_id() -> ParameterSpec {
    ParameterSpec::optional("auth_id")
}

pub fn icon_uri() -> ParameterSpec {
    ParameterSpec::optional("icon_uri")
}

pub fn agent_id() -> ParameterSpec {
    ParameterSpec::required("agent_id").with_prompt("Enter Agent ID")
}

pub fn resource_id() -> ParameterSpec {
    ParameterSpec::required("resource_id").with_prompt("Enter resource ID of the agent")
}

pub fn resource_name() -> ParameterSpec {
    ParameterSpec::required("resource_name").with_prompt(
        "Enter resource name of the agent (projects/PROJECT_ID/locations/LOCATION/reasoningEngines/ID)",
    )
}

pub fn engine_display_name() -> ParameterSpec {
    ParameterSpec::required("re_display_name").with_prompt("Enter display name of the agent")
}

pub fn authorization_id() -> ParameterSpec {
    ParameterSpec::optional("authorization_id")
}

pub fn existing_authorization_id() -> ParameterSpec {
    ParameterSpec::required("authorization_id").with_prompt("Enter authorization ID")
}

pub fn old_auth_id() -> ParameterSpec {
    ParameterSpec::required("old_auth_id").with_prompt("Enter authorization ID to replace")
}

pub fn new_auth_id() -> ParameterSpec {
    ParameterSpec::optional("new_auth_id")
}

pub fn scopes() -> ParameterSpec {
    ParameterSpec::optional("scopes").with_default(
        DEFAULT_SCOPES
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
    )
}

pub fn oauth_client_id() -> ParameterSpec {
    ParameterSpec::required("oauth_client_id")
}

pub fn oauth_client_secret() -> ParameterSpec {
    ParameterSpec::required("oauth_client_secret").secret()
}

/// "현재 값 유지" 업데이트용 사양: 현재 값을 기본값으로, 빈 입력은 유지.
pub fn keep_current(name: &str, label: &str, current: Option<String>) -> ParameterSpec {
    ParameterSpec::optional(name)
        .with_prompt(&format!("Enter new {label} (leave blank to keep current)"))
        .with_default_opt(current)
}
