//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::io;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;

use crate::application::config::FileConfig;
use crate::domain::agent::PatchRequest;
use crate::domain::engine::DeployedAgent;
use crate::domain::settings::{
    AgentConfig, AuthorizationConfig, EngineConfig, OAuthClient, RegistryConfig,
};
use crate::error::RegistrarError;

/// 설정 파일 로딩 포트. 파일이 없거나 깨져 있으면 빈 설정을 돌려준다.
pub trait ConfigRepository: Send + Sync {
    fn load(&self, path: &Path) -> LoadedConfig;
}

/// 설정 파일 로딩 결과.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: FileConfig,
    /// 실제로 읽은 경로(없거나 실패하면 `None`)
    pub loaded_path: Option<String>,
}

/// 프로세스 환경변수 조회 포트.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// 대화형 한 줄 입력 포트. 빈 입력/EOF는 `None`.
pub trait Prompter: Send + Sync {
    fn prompt(&self, message: &str) -> io::Result<Option<String>>;
}

/// 파괴적 작업 전 yes/no 확인 포트.
pub trait UserConfirmer: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// 사용자에게 보여줄 경고/안내 상태 줄 출력 포트.
pub trait Reporter: Send + Sync {
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
}

/// ambient 자격 증명에서 bearer 토큰을 얻는 포트.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<SecretString, RegistrarError>;
}

/// Agent Registry(갤러리) 연동 포트.
#[async_trait]
pub trait AgentRegistryGateway: Send + Sync {
    async fn create_agent(&self, registry: &RegistryConfig, agent: &AgentConfig) -> Result<Value>;
    async fn list_agents(&self, registry: &RegistryConfig) -> Result<Vec<Value>>;
    async fn get_agent(&self, registry: &RegistryConfig, agent_id: &str) -> Result<Value>;
    async fn update_agent(
        &self,
        registry: &RegistryConfig,
        agent_id: &str,
        patch: &PatchRequest,
    ) -> Result<Value>;
    async fn find_agents_by_display_name(
        &self,
        registry: &RegistryConfig,
        display_name: &str,
    ) -> Result<Vec<Value>>;
    /// 응답 본문이 비어 있으면 `Value::Null`.
    async fn delete_agent(&self, registry: &RegistryConfig, agent_id: &str) -> Result<Value>;
}

/// Agent Engine 연동 포트. 세션은 초기화 성공 후에만 존재한다.
#[async_trait]
pub trait AgentEngineGateway: Send + Sync {
    async fn initialize(&self, config: &EngineConfig) -> Result<Box<dyn EngineSession>>;
}

/// 초기화된 Agent Engine 세션.
#[async_trait]
pub trait EngineSession: Send + Sync {
    fn config(&self) -> &EngineConfig;
    async fn list_agents(&self, filter: Option<&str>) -> Result<Vec<DeployedAgent>>;
    async fn get_agent(&self, resource_id: &str) -> Result<DeployedAgent>;
    async fn delete_agent(&self, resource_name: &str) -> Result<()>;
}

/// OAuth authorization 연동 포트.
#[async_trait]
pub trait AuthorizationGateway: Send + Sync {
    async fn create_authorization(
        &self,
        config: &AuthorizationConfig,
        authorization_id: &str,
        client: &OAuthClient,
        scopes: &[String],
    ) -> Result<Value>;
    async fn list_authorizations(&self, config: &AuthorizationConfig) -> Result<Vec<Value>>;
    /// 응답 본문이 비어 있으면 `Value::Null`.
    async fn delete_authorization(
        &self,
        config: &AuthorizationConfig,
        authorization_id: &str,
    ) -> Result<Value>;
}
