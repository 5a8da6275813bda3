//! Agent Engine(배포 레지스트리) 응답 요약 모델.

use serde::Serialize;
use serde_json::Value;

use super::agent::resource_id;

/// 배포된 에이전트 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedAgent {
    /// 리소스 ID(이름의 마지막 세그먼트)
    pub name: String,
    pub display_name: Option<String>,
    pub resource_name: String,
    pub create_time: Option<String>,
}

impl DeployedAgent {
    /// reasoningEngine REST 응답을 요약한다. `name`이 없으면 `None`.
    pub fn from_api(value: &Value) -> Option<Self> {
        let resource_name = value.get("name").and_then(Value::as_str)?.to_string();
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(ToString::to_string);

        Some(Self {
            name: resource_id(&resource_name).to_string(),
            display_name: text("displayName"),
            create_time: text("createTime"),
            resource_name,
        })
    }
}

pub fn display_name_filter(display_name: &str) -> String {
    format!("display_name=\"{display_name}\"")
}
