//! 갤러리 에이전트 요청 본문과 부분 업데이트(field mask) 규칙.

use serde_json::{Map, Value, json};

use super::settings::{AgentConfig, RegistryConfig};

pub const MASK_DISPLAY_NAME: &str = "displayName";
pub const MASK_DESCRIPTION: &str = "description";
pub const MASK_TOOL_DESCRIPTION: &str = "adk_agent_definition.tool_settings.tool_description";
pub const MASK_REASONING_ENGINE: &str =
    "adk_agent_definition.provisioned_reasoning_engine.reasoning_engine";
pub const MASK_AUTHORIZATIONS: &str = "adk_agent_definition.authorizations";
pub const MASK_ICON_URI: &str = "icon.uri";

pub fn reasoning_engine_name(project_id: &str, location: &str, engine_id: &str) -> String {
    format!("projects/{project_id}/locations/{location}/reasoningEngines/{engine_id}")
}

pub fn authorization_name(project_id: &str, location: &str, auth_id: &str) -> String {
    format!("projects/{project_id}/locations/{location}/authorizations/{auth_id}")
}

/// 리소스 이름의 마지막 세그먼트(ID)를 돌려준다.
pub fn resource_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// 에이전트 생성 요청 본문.
pub fn create_agent_body(registry: &RegistryConfig, agent: &AgentConfig) -> Value {
    let authorizations: Vec<String> = agent
        .auth_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(|id| authorization_name(&registry.project_id, &registry.api_location, id))
        .into_iter()
        .collect();

    let mut body = json!({
        "displayName": agent.display_name,
        "description": agent.description,
        "adk_agent_definition": {
            "tool_settings": {
                "tool_description": agent.tool_description,
            },
            "provisioned_reasoning_engine": {
                "reasoning_engine": reasoning_engine_name(
                    &registry.project_id,
                    &registry.re_location,
                    &agent.adk_deployment_id,
                ),
            },
            "authorizations": authorizations,
        },
    });

    if let Some(uri) = agent.icon_uri.as_deref().filter(|uri| !uri.is_empty()) {
        body["icon"] = json!({ "uri": uri });
    }

    body
}

/// 부분 업데이트 대상 필드. `None`은 "변경하지 않음".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPatch {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub tool_description: Option<String>,
    pub adk_deployment_id: Option<String>,
    pub auth_id: Option<String>,
    pub icon_uri: Option<String>,
}

/// PATCH 본문과 `updateMask` 쿼리 값.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRequest {
    pub body: Value,
    pub update_mask: String,
}

impl AgentPatch {
    pub fn is_empty(&self) -> bool {
        self.field_mask().is_empty()
    }

    pub fn field_mask(&self) -> Vec<&'static str> {
        let mut mask = Vec::new();
        if self.display_name.is_some() {
            mask.push(MASK_DISPLAY_NAME);
        }
        if self.description.is_some() {
            mask.push(MASK_DESCRIPTION);
        }
        if self.tool_description.is_some() {
            mask.push(MASK_TOOL_DESCRIPTION);
        }
        if self.adk_deployment_id.is_some() {
            mask.push(MASK_REASONING_ENGINE);
        }
        if self.auth_id.is_some() {
            mask.push(MASK_AUTHORIZATIONS);
        }
        if self.icon_uri.is_some() {
            mask.push(MASK_ICON_URI);
        }
        mask
    }

    /// 현재 값과 같은 필드를 제거한다("현재 값 유지" 흐름).
    pub fn without_unchanged(self, current: &AgentPatch) -> AgentPatch {
        fn keep(next: Option<String>, current: &Option<String>) -> Option<String> {
            next.filter(|value| Some(value) != current.as_ref())
        }

        AgentPatch {
            display_name: keep(self.display_name, &current.display_name),
            description: keep(self.description, &current.description),
            tool_description: keep(self.tool_description, &current.tool_description),
            adk_deployment_id: keep(self.adk_deployment_id, &current.adk_deployment_id),
            auth_id: keep(self.auth_id, &current.auth_id),
            icon_uri: keep(self.icon_uri, &current.icon_uri),
        }
    }

    /// 변경 필드만 담은 중첩 JSON 본문과 dotted-path field mask를 만든다.
    /// 변경 필드가 없으면 `None`.
    pub fn to_request(&self, registry: &RegistryConfig) -> Option<PatchRequest> {
        let mask = self.field_mask();
        if mask.is_empty() {
            return None;
        }

        let mut body = Map::new();
        let mut definition = Map::new();

        if let Some(name) = &self.display_name {
            body.insert("displayName".into(), json!(name));
        }
        if let Some(description) = &self.description {
            body.insert("description".into(), json!(description));
        }
        if let Some(tool_description) = &self.tool_description {
            definition.insert(
                "tool_settings".into(),
                json!({ "tool_description": tool_description }),
            );
        }
        if let Some(engine_id) = &self.adk_deployment_id {
            definition.insert(
                "provisioned_reasoning_engine".into(),
                json!({
                    "reasoning_engine": reasoning_engine_name(
                        &registry.project_id,
                        &registry.re_location,
                        engine_id,
                    )
                }),
            );
        }
        if let Some(auth_id) = &self.auth_id {
            let authorizations: Vec<String> = if auth_id.is_empty() {
                Vec::new()
            } else {
                vec![authorization_name(
                    &registry.project_id,
                    &registry.api_location,
                    auth_id,
                )]
            };
            definition.insert("authorizations".into(), json!(authorizations));
        }
        if !definition.is_empty() {
            body.insert("adk_agent_definition".into(), Value::Object(definition));
        }
        if let Some(uri) = &self.icon_uri {
            body.insert("icon".into(), json!({ "uri": uri }));
        }

        Some(PatchRequest {
            body: Value::Object(body),
            update_mask: mask.join(","),
        })
    }

    /// 서버가 돌려준 에이전트 JSON에서 현재 값을 추출한다.
    /// 응답은 camelCase/snake_case가 섞여 올 수 있어 둘 다 조회한다.
    pub fn from_agent(agent: &Value) -> AgentPatch {
        let definition = field(agent, &["adkAgentDefinition", "adk_agent_definition"]);

        AgentPatch {
            display_name: text(field(agent, &["displayName", "display_name"])),
            description: text(field(agent, &["description"])),
            tool_description: definition
                .and_then(|d| field(d, &["toolSettings", "tool_settings"]))
                .and_then(|s| text(field(s, &["toolDescription", "tool_description"]))),
            adk_deployment_id: definition
                .and_then(|d| {
                    field(d, &["provisionedReasoningEngine", "provisioned_reasoning_engine"])
                })
                .and_then(|e| text(field(e, &["reasoningEngine", "reasoning_engine"])))
                .map(|name| resource_id(&name).to_string()),
            auth_id: definition
                .and_then(|d| field(d, &["authorizations"]))
                .and_then(Value::as_array)
                .and_then(|items| items.first())
                .and_then(Value::as_str)
                .map(|name| resource_id(name).to_string()),
            icon_uri: field(agent, &["icon"]).and_then(|icon| text(field(icon, &["uri"]))),
        }
    }
}

fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| value.get(*key))
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(ToString::to_string)
}
