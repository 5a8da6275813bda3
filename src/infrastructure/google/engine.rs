//! Vertex AI reasoning engine(배포 레지스트리) 게이트웨이.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::transport::{ApiTransport, endpoint};
use crate::application::ports::{AgentEngineGateway, EngineSession};
use crate::domain::engine::DeployedAgent;
use crate::domain::settings::EngineConfig;
use crate::error::RegistrarError;

const API_VERSION: &str = "v1";
/// 페이지 수 상한. 서버가 같은 토큰을 계속 돌려주는 경우를 막는다.
const MAX_PAGES: usize = 1000;

fn api_host(location: &str) -> String {
    format!("{location}-aiplatform.googleapis.com")
}

/// reasoning engine 컬렉션 URL.
pub fn reasoning_engines_url(config: &EngineConfig) -> Result<Url, RegistrarError> {
    endpoint(
        &api_host(&config.location),
        [
            API_VERSION,
            "projects",
            config.project_id.as_str(),
            "locations",
            config.location.as_str(),
            "reasoningEngines",
        ],
    )
}

/// 단일 reasoning engine URL. 전체 리소스 이름(`projects/...`)과 ID 모두 받는다.
/// 전체 이름이면 호스트 리전도 이름 안의 `locations/{loc}`를 따른다.
pub fn reasoning_engine_url(config: &EngineConfig, id_or_name: &str) -> Result<Url, RegistrarError> {
    if id_or_name.contains('/') {
        let name = id_or_name.trim_matches('/');
        let location = location_of(name).unwrap_or(&config.location);
        return endpoint(
            &api_host(location),
            std::iter::once(API_VERSION).chain(name.split('/')),
        );
    }

    endpoint(
        &api_host(&config.location),
        [
            API_VERSION,
            "projects",
            config.project_id.as_str(),
            "locations",
            config.location.as_str(),
            "reasoningEngines",
            id_or_name,
        ],
    )
}

/// `.../locations/{loc}/...` 형태 이름에서 리전을 꺼낸다.
fn location_of(name: &str) -> Option<&str> {
    let mut segments = name.split('/');
    segments
        .by_ref()
        .find(|segment| *segment == "locations")?;
    segments.next().filter(|location| !location.is_empty())
}

/// 세션 생성만 담당하는 게이트웨이.
pub struct ReasoningEngineClient {
    transport: Arc<ApiTransport>,
}

impl ReasoningEngineClient {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AgentEngineGateway for ReasoningEngineClient {
    async fn initialize(&self, config: &EngineConfig) -> Result<Box<dyn EngineSession>> {
        if config.project_id.trim().is_empty() {
            return Err(RegistrarError::Initialization("project ID cannot be empty".into()).into());
        }
        if config.location.trim().is_empty() {
            return Err(RegistrarError::Initialization("location cannot be empty".into()).into());
        }
        // 호스트 이름이 유효한지 미리 확인한다.
        reasoning_engines_url(config)
            .map_err(|err| RegistrarError::Initialization(err.to_string()))?;

        info!(project = %config.project_id, location = %config.location, "Agent Engine session initialized");
        Ok(Box::new(ReasoningEngineSession {
            config: config.clone(),
            transport: self.transport.clone(),
        }))
    }
}

struct ReasoningEngineSession {
    config: EngineConfig,
    transport: Arc<ApiTransport>,
}

impl ReasoningEngineSession {
    async fn call(&self, method: Method, url: Url) -> Result<Value> {
        self.transport
            .send_json(method, url, &self.config.project_id, None)
            .await
    }
}

#[async_trait]
impl EngineSession for ReasoningEngineSession {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `nextPageToken`이 없어질 때까지 모든 페이지를 따라간다.
    async fn list_agents(&self, filter: Option<&str>) -> Result<Vec<DeployedAgent>> {
        let mut agents = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0..MAX_PAGES {
            let mut url = reasoning_engines_url(&self.config)?;
            {
                let mut query = url.query_pairs_mut();
                if let Some(filter) = filter {
                    query.append_pair("filter", filter);
                }
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }
            if url.query() == Some("") {
                url.set_query(None);
            }

            let response = self.call(Method::GET, url).await?;
            let (items, next) = engines_page(&response);
            debug!(page, count = items.len(), "fetched reasoning engine page");
            agents.extend(items);

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(count = agents.len(), "listed reasoning engines");
        Ok(agents)
    }

    async fn get_agent(&self, resource_id: &str) -> Result<DeployedAgent> {
        let url = reasoning_engine_url(&self.config, resource_id)?;
        let response = self
            .call(Method::GET, url)
            .await
            .with_context(|| format!("failed to get agent {resource_id}"))?;
        DeployedAgent::from_api(&response).ok_or_else(|| {
            RegistrarError::transport(format!("response for agent {resource_id} has no name")).into()
        })
    }

    async fn delete_agent(&self, resource_name: &str) -> Result<()> {
        let url = reasoning_engine_url(&self.config, resource_name)?;
        self.call(Method::DELETE, url).await?;
        info!(resource_name, "reasoning engine deleted");
        Ok(())
    }
}

/// 목록 응답 한 페이지를 요약과 다음 페이지 토큰으로 나눈다.
fn engines_page(response: &Value) -> (Vec<DeployedAgent>, Option<String>) {
    let items = response
        .get("reasoningEngines")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(DeployedAgent::from_api).collect())
        .unwrap_or_default();
    let next = response
        .get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string);
    (items, next)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config() -> EngineConfig {
        EngineConfig {
            project_id: "proj".into(),
            location: "us-central1".into(),
        }
    }

    #[test]
    fn collection_url_uses_regional_host() {
        assert_eq!(
            reasoning_engines_url(&config()).unwrap().as_str(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/proj/locations/us-central1/reasoningEngines"
        );
    }

    #[test]
    fn item_url_accepts_id_or_full_name() {
        let by_id = reasoning_engine_url(&config(), "123").unwrap();
        let by_name = reasoning_engine_url(
            &config(),
            "projects/proj/locations/us-central1/reasoningEngines/123",
        )
        .unwrap();
        assert_eq!(by_id, by_name);
        assert!(by_id.as_str().ends_with("/reasoningEngines/123"));
    }

    #[test]
    fn full_name_in_other_region_uses_its_own_host() {
        let url = reasoning_engine_url(
            &config(),
            "projects/p/locations/europe-west1/reasoningEngines/1",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("europe-west1-aiplatform.googleapis.com"));
        assert_eq!(
            url.path(),
            "/v1/projects/p/locations/europe-west1/reasoningEngines/1"
        );
    }

    #[test]
    fn name_without_location_falls_back_to_config_region() {
        assert_eq!(location_of("projects/p/reasoningEngines/1"), None);
        let url = reasoning_engine_url(&config(), "projects/p/reasoningEngines/1").unwrap();
        assert_eq!(url.host_str(), Some("us-central1-aiplatform.googleapis.com"));
    }

    #[test]
    fn page_split_reads_items_and_token() {
        let response = json!({
            "reasoningEngines": [
                { "name": "projects/p/locations/l/reasoningEngines/1", "displayName": "a" },
                { "displayName": "nameless" }
            ],
            "nextPageToken": "abc"
        });
        let (items, next) = engines_page(&response);
        assert_eq!(items.len(), 1);
        assert_eq!(next.as_deref(), Some("abc"));

        let (items, next) = engines_page(&json!({ "nextPageToken": "" }));
        assert!(items.is_empty());
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn empty_project_fails_initialization() {
        struct NoTokens;

        #[async_trait]
        impl crate::application::ports::AccessTokenProvider for NoTokens {
            async fn access_token(&self) -> Result<secrecy::SecretString, RegistrarError> {
                Err(RegistrarError::Authentication("unused".into()))
            }
        }

        let transport = Arc::new(ApiTransport::new(
            super::super::build_api_client(),
            Arc::new(NoTokens),
        ));
        let client = ReasoningEngineClient::new(transport);
        let config = EngineConfig {
            project_id: String::new(),
            location: "us-central1".into(),
        };

        let err = match client.initialize(&config).await {
            Ok(_) => panic!("expected initialization failure"),
            Err(err) => err,
        };
        assert!(matches!(
            err.downcast_ref::<RegistrarError>(),
            Some(RegistrarError::Initialization(_))
        ));
    }
}
