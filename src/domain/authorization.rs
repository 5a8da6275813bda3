//! OAuth authorization 리소스 요청 규칙.

use secrecy::ExposeSecret;
use serde_json::{Value, json};
use url::Url;

use super::agent::authorization_name;
use super::settings::{AuthorizationConfig, OAuthClient};

pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// 사용자 동의 화면 URI를 만든다.
pub fn authorization_uri(client_id: &str, scopes: &[String]) -> String {
    let scope = scopes.join(" ");
    match Url::parse_with_params(
        GOOGLE_AUTH_URI,
        &[
            ("client_id", client_id),
            ("scope", scope.as_str()),
            ("include_granted_scopes", "true"),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    ) {
        Ok(url) => url.to_string(),
        Err(_) => GOOGLE_AUTH_URI.to_string(),
    }
}

/// authorization 생성 요청 본문.
pub fn create_authorization_body(
    config: &AuthorizationConfig,
    authorization_id: &str,
    client: &OAuthClient,
    scopes: &[String],
) -> Value {
    json!({
        "name": authorization_name(&config.project_id, &config.location, authorization_id),
        "serverSideOauth2": {
            "clientId": client.client_id,
            "clientSecret": client.client_secret.expose_secret(),
            "authorizationUri": authorization_uri(&client.client_id, scopes),
            "tokenUri": GOOGLE_TOKEN_URI,
        },
    })
}
