//! 유스케이스/해석기 테스트용 가짜 포트.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{
    AgentEngineGateway, AgentRegistryGateway, AuthorizationGateway, EngineSession, Environment,
    Prompter, Reporter, UserConfirmer,
};
use crate::domain::agent::PatchRequest;
use crate::domain::engine::DeployedAgent;
use crate::domain::settings::{
    AgentConfig, AuthorizationConfig, EngineConfig, OAuthClient, RegistryConfig,
};
use crate::error::RegistrarError;

#[derive(Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// 상태 줄을 `warning:`/`info:` 접두어와 함께 기록한다.
#[derive(Default)]
pub struct FakeReporter {
    lines: Mutex<Vec<String>>,
}

impl FakeReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for FakeReporter {
    fn warning(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("warning:{message}"));
    }

    fn info(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("info:{message}"));
    }
}

/// 미리 정한 답을 순서대로 돌려주고 질문을 기록한다.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, message: &str) -> io::Result<Option<String>> {
        self.asked.lock().unwrap().push(message.to_string());
        Ok(self.answers.lock().unwrap().pop_front().flatten())
    }
}

pub struct FakeConfirmer {
    answer: bool,
    asked: Mutex<usize>,
}

impl FakeConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        *self.asked.lock().unwrap()
    }
}

impl UserConfirmer for FakeConfirmer {
    fn confirm(&self, _message: &str) -> Result<bool> {
        *self.asked.lock().unwrap() += 1;
        Ok(self.answer)
    }
}

/// 호출을 `"verb:id[:mask]"` 형태로 기록하는 갤러리 게이트웨이.
#[derive(Default)]
pub struct FakeRegistry {
    agent: Value,
    calls: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn with_agent(agent: Value) -> Self {
        Self {
            agent,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AgentRegistryGateway for FakeRegistry {
    async fn create_agent(&self, _registry: &RegistryConfig, agent: &AgentConfig) -> Result<Value> {
        self.record(format!("create:{}", agent.display_name));
        Ok(json!({ "name": "agents/new", "displayName": agent.display_name }))
    }

    async fn list_agents(&self, _registry: &RegistryConfig) -> Result<Vec<Value>> {
        self.record("list".into());
        Ok(vec![json!({ "name": "agents/1" })])
    }

    async fn get_agent(&self, _registry: &RegistryConfig, agent_id: &str) -> Result<Value> {
        self.record(format!("get:{agent_id}"));
        Ok(self.agent.clone())
    }

    async fn update_agent(
        &self,
        _registry: &RegistryConfig,
        agent_id: &str,
        patch: &PatchRequest,
    ) -> Result<Value> {
        self.record(format!("update:{agent_id}:{}", patch.update_mask));
        Ok(patch.body.clone())
    }

    async fn find_agents_by_display_name(
        &self,
        _registry: &RegistryConfig,
        display_name: &str,
    ) -> Result<Vec<Value>> {
        self.record(format!("find:{display_name}"));
        Ok(Vec::new())
    }

    async fn delete_agent(&self, _registry: &RegistryConfig, agent_id: &str) -> Result<Value> {
        self.record(format!("delete:{agent_id}"));
        Ok(Value::Null)
    }
}

/// 고정된 배포 목록을 가진 Agent Engine 게이트웨이.
#[derive(Default)]
pub struct FakeEngine {
    agents: Vec<DeployedAgent>,
    calls: std::sync::Arc<Mutex<Vec<String>>>,
}

impl FakeEngine {
    pub fn with_agents(agents: Vec<DeployedAgent>) -> Self {
        Self {
            agents,
            calls: Default::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentEngineGateway for FakeEngine {
    async fn initialize(&self, config: &EngineConfig) -> Result<Box<dyn EngineSession>> {
        self.calls.lock().unwrap().push("initialize".into());
        Ok(Box::new(FakeSession {
            config: config.clone(),
            agents: self.agents.clone(),
            calls: self.calls.clone(),
        }))
    }
}

struct FakeSession {
    config: EngineConfig,
    agents: Vec<DeployedAgent>,
    calls: std::sync::Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl EngineSession for FakeSession {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn list_agents(&self, filter: Option<&str>) -> Result<Vec<DeployedAgent>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("list:{}", filter.unwrap_or("")));
        Ok(self.agents.clone())
    }

    async fn get_agent(&self, resource_id: &str) -> Result<DeployedAgent> {
        self.calls.lock().unwrap().push(format!("get:{resource_id}"));
        match self.agents.iter().find(|a| a.name == resource_id) {
            Some(agent) => Ok(agent.clone()),
            None => Err(RegistrarError::service(404, "not found").into()),
        }
    }

    async fn delete_agent(&self, resource_name: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete:{resource_name}"));
        Ok(())
    }
}

/// authorization 게이트웨이. `fail_delete`이면 삭제가 404로 실패한다.
#[derive(Default)]
pub struct FakeAuthorizations {
    pub fail_delete: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeAuthorizations {
    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationGateway for FakeAuthorizations {
    async fn create_authorization(
        &self,
        config: &AuthorizationConfig,
        authorization_id: &str,
        _client: &OAuthClient,
        scopes: &[String],
    ) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{authorization_id}:{}", scopes.join(" ")));
        Ok(json!({
            "name": format!(
                "projects/{}/locations/{}/authorizations/{authorization_id}",
                config.project_id, config.location
            )
        }))
    }

    async fn list_authorizations(&self, _config: &AuthorizationConfig) -> Result<Vec<Value>> {
        self.calls.lock().unwrap().push("list".into());
        Ok(Vec::new())
    }

    async fn delete_authorization(
        &self,
        _config: &AuthorizationConfig,
        authorization_id: &str,
    ) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete:{authorization_id}"));
        if self.fail_delete {
            bail!(RegistrarError::service(404, "authorization not found"));
        }
        Ok(Value::Null)
    }
}
