//! Discovery Engine 갤러리(Agent Registry) 게이트웨이.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::transport::{ApiTransport, endpoint};
use crate::application::ports::AgentRegistryGateway;
use crate::domain::agent::{PatchRequest, create_agent_body};
use crate::domain::settings::{AgentConfig, RegistryConfig};
use crate::error::RegistrarError;

const API_HOST: &str = "discoveryengine.googleapis.com";
const API_VERSION: &str = "v1alpha";
const COLLECTION: &str = "default_collection";
const ASSISTANT: &str = "default_assistant";

/// 갤러리 에이전트 컬렉션(또는 단일 에이전트) URL.
/// `global`이 아닌 위치는 `{location}-` 접두 호스트를 쓴다.
pub fn agents_url(registry: &RegistryConfig, agent_id: Option<&str>) -> Result<Url, RegistrarError> {
    let host = if registry.api_location == "global" {
        API_HOST.to_string()
    } else {
        format!("{}-{API_HOST}", registry.api_location)
    };

    let segments = [
        API_VERSION,
        "projects",
        registry.project_id.as_str(),
        "locations",
        registry.api_location.as_str(),
        "collections",
        COLLECTION,
        "engines",
        registry.app_id.as_str(),
        "assistants",
        ASSISTANT,
        "agents",
    ];
    endpoint(&host, segments.into_iter().chain(agent_id))
}

pub struct AgentRegistryClient {
    transport: Arc<ApiTransport>,
}

impl AgentRegistryClient {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    async fn list_with_filter(
        &self,
        registry: &RegistryConfig,
        filter: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut url = agents_url(registry, None)?;
        if let Some(filter) = filter {
            url.query_pairs_mut().append_pair("filter", filter);
        }
        let response = self
            .transport
            .send_json(Method::GET, url, &registry.project_id, None)
            .await?;
        Ok(agents_of(response))
    }
}

/// 목록 응답에서 `agents` 배열을 꺼낸다. 키가 없으면 빈 목록.
fn agents_of(response: Value) -> Vec<Value> {
    match response {
        Value::Object(mut map) => match map.remove("agents") {
            Some(Value::Array(agents)) => agents,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[async_trait]
impl AgentRegistryGateway for AgentRegistryClient {
    async fn create_agent(&self, registry: &RegistryConfig, agent: &AgentConfig) -> Result<Value> {
        let url = agents_url(registry, None)?;
        let body = create_agent_body(registry, agent);
        let created = self
            .transport
            .send_json(Method::POST, url, &registry.project_id, Some(&body))
            .await?;
        info!(display_name = %agent.display_name, "agent created");
        Ok(created)
    }

    async fn list_agents(&self, registry: &RegistryConfig) -> Result<Vec<Value>> {
        self.list_with_filter(registry, None).await
    }

    async fn get_agent(&self, registry: &RegistryConfig, agent_id: &str) -> Result<Value> {
        let url = agents_url(registry, Some(agent_id))?;
        self.transport
            .send_json(Method::GET, url, &registry.project_id, None)
            .await
    }

    async fn update_agent(
        &self,
        registry: &RegistryConfig,
        agent_id: &str,
        patch: &PatchRequest,
    ) -> Result<Value> {
        let mut url = agents_url(registry, Some(agent_id))?;
        url.query_pairs_mut()
            .append_pair("updateMask", &patch.update_mask);
        self.transport
            .send_json(Method::PATCH, url, &registry.project_id, Some(&patch.body))
            .await
    }

    async fn find_agents_by_display_name(
        &self,
        registry: &RegistryConfig,
        display_name: &str,
    ) -> Result<Vec<Value>> {
        let filter = format!("displayName=\"{display_name}\"");
        self.list_with_filter(registry, Some(&filter)).await
    }

    async fn delete_agent(&self, registry: &RegistryConfig, agent_id: &str) -> Result<Value> {
        let url = agents_url(registry, Some(agent_id))?;
        let response = self
            .transport
            .send_json(Method::DELETE, url, &registry.project_id, None)
            .await?;
        info!(agent_id, "agent deleted");
        Ok(response)
    }
}
