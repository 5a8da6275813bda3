//! Discovery Engine OAuth authorization 게이트웨이.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::transport::{ApiTransport, endpoint};
use crate::application::ports::AuthorizationGateway;
use crate::domain::authorization::create_authorization_body;
use crate::domain::settings::{AuthorizationConfig, OAuthClient};
use crate::error::RegistrarError;

fn api_host(location: &str) -> &'static str {
    if location.starts_with("us") {
        "us-discoveryengine.googleapis.com"
    } else if location.starts_with("eu") {
        "eu-discoveryengine.googleapis.com"
    } else {
        "discoveryengine.googleapis.com"
    }
}

/// authorization 컬렉션(또는 단일 authorization) URL.
pub fn authorizations_url(
    config: &AuthorizationConfig,
    authorization_id: Option<&str>,
) -> Result<Url, RegistrarError> {
    let segments = [
        "v1alpha",
        "projects",
        config.project_id.as_str(),
        "locations",
        config.location.as_str(),
        "authorizations",
    ];
    endpoint(
        api_host(&config.location),
        segments.into_iter().chain(authorization_id),
    )
}

pub struct AuthorizationClient {
    transport: Arc<ApiTransport>,
}

impl AuthorizationClient {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AuthorizationGateway for AuthorizationClient {
    async fn create_authorization(
        &self,
        config: &AuthorizationConfig,
        authorization_id: &str,
        client: &OAuthClient,
        scopes: &[String],
    ) -> Result<Value> {
        let mut url = authorizations_url(config, None)?;
        url.query_pairs_mut()
            .append_pair("authorizationId", authorization_id);
        let body = create_authorization_body(config, authorization_id, client, scopes);

        let created = self
            .transport
            .send_json(Method::POST, url, &config.project_id, Some(&body))
            .await?;
        info!(authorization_id, "authorization created");
        Ok(created)
    }

    async fn list_authorizations(&self, config: &AuthorizationConfig) -> Result<Vec<Value>> {
        let url = authorizations_url(config, None)?;
        let response = self
            .transport
            .send_json(Method::GET, url, &config.project_id, None)
            .await?;
        Ok(response
            .get("authorizations")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_authorization(
        &self,
        config: &AuthorizationConfig,
        authorization_id: &str,
    ) -> Result<Value> {
        let url = authorizations_url(config, Some(authorization_id))?;
        let response = self
            .transport
            .send_json(Method::DELETE, url, &config.project_id, None)
            .await?;
        info!(authorization_id, "authorization deleted");
        Ok(response)
    }
}
