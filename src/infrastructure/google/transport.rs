//! 인증 헤더와 상태 코드 처리를 공통화한 HTTP 전송 계층.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::application::ports::AccessTokenProvider;
use crate::error::RegistrarError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client() -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("agentspace-registrar/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// 모든 게이트웨이가 공유하는 전송 객체.
pub struct ApiTransport {
    client: Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl ApiTransport {
    pub fn new(client: Client, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { client, tokens }
    }

    /// 공통 헤더/인증을 적용한다.
    async fn request(
        &self,
        method: Method,
        url: Url,
        quota_project: &str,
    ) -> Result<RequestBuilder, RegistrarError> {
        let token = self.tokens.access_token().await?;
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(token.expose_secret())
            .header("Content-Type", "application/json")
            .header("X-Goog-User-Project", quota_project))
    }

    /// JSON 요청을 보내고 응답을 파싱한다.
    /// 2xx가 아니면 `Service { status, body }`, 빈 본문(204 등)은 `Value::Null`.
    pub async fn send_json(
        &self,
        method: Method,
        url: Url,
        quota_project: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        debug!(%method, %url, "sending request");
        let mut request = self.request(method.clone(), url, quota_project).await?;
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| RegistrarError::transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| RegistrarError::transport(format!("failed to read response body: {err}")))?;
        debug!(%method, status = status.as_u16(), bytes = text.len(), "received response");
        interpret_response(status, text)
    }
}

/// 2xx가 아니면 상태 코드와 본문을 그대로 담은 `Service` 오류.
fn interpret_response(status: StatusCode, text: String) -> Result<Value> {
    if !status.is_success() {
        return Err(RegistrarError::service(status.as_u16(), text).into());
    }
    parse_body(&text)
}

fn parse_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|err| RegistrarError::transport(format!("invalid JSON response: {err}")).into())
}

/// 경로 세그먼트에서 그대로 두는 문자(RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `https://{host}/` 뒤에 경로 세그먼트를 붙인다. 각 세그먼트는 percent-encoding된다.
pub(super) fn endpoint<'a>(
    host: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, RegistrarError> {
    let path = segments
        .into_iter()
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");
    Url::parse(&format!("https://{host}/{path}"))
        .map_err(|err| RegistrarError::Configuration(format!("invalid API endpoint for '{host}': {err}")))
}
