//! 파라미터 해석기.
//!
//! 고정 순서: CLI 인자 -> 설정 파일 -> 환경변수 -> 대화형 입력 -> 기본값.
//! 한 단계에서 값이 나오면 그 아래 단계는 조회하지 않는다.

pub mod specs;

use indexmap::IndexMap;
use tracing::debug;

use crate::application::config::FileConfig;
use crate::application::ports::{Environment, Prompter};
use crate::domain::parameter::{ParamValue, ParameterSpec, Resolved, SourceKind, well_known_env_vars};
use crate::domain::settings::{
    AgentConfig, AuthorizationConfig, EngineConfig, OAuthClient, RegistryConfig, ResolvedConfig,
};
use crate::error::RegistrarError;

/// 명령줄에서 실제로 지정된 값만 담는다.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    values: IndexMap<String, ParamValue>,
}

impl CliArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None`은 "지정되지 않음"이므로 기록하지 않는다. 빈 문자열은 명시적 값이다.
    pub fn set(&mut self, name: &str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.values.insert(name.to_string(), ParamValue::Text(value));
        }
        self
    }

    /// 반복 플래그는 하나도 주어지지 않았을 때 "지정되지 않음"이다.
    pub fn set_list(&mut self, name: &str, values: Vec<String>) -> &mut Self {
        if !values.is_empty() {
            self.values.insert(name.to_string(), ParamValue::List(values));
        }
        self
    }

    pub fn with(mut self, name: &str, value: Option<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }
}

/// 네 가지 입력 소스와 선택적 대화형 입력으로 파라미터를 해석한다.
pub struct ParameterResolver<'a> {
    cli: &'a CliArgs,
    file: &'a FileConfig,
    env: &'a dyn Environment,
    prompter: Option<&'a dyn Prompter>,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(
        cli: &'a CliArgs,
        file: &'a FileConfig,
        env: &'a dyn Environment,
        prompter: Option<&'a dyn Prompter>,
    ) -> Self {
        Self {
            cli,
            file,
            env,
            prompter,
        }
    }

    /// 대화형 입력을 끈 해석기(진단용).
    pub fn without_prompts(&self) -> ParameterResolver<'a> {
        ParameterResolver {
            prompter: None,
            ..*self
        }
    }

    /// 한 파라미터를 해석한다.
    /// 필수 파라미터가 기본값까지 모두 비어 있으면 `MissingParameter`.
    pub fn resolve(&self, spec: &ParameterSpec) -> Result<Option<Resolved>, RegistrarError> {
        for source in SourceKind::ORDER {
            if let Some(value) = self.lookup(source, spec)? {
                if spec.secret {
                    debug!(parameter = %spec.name, %source, "resolved parameter");
                } else {
                    debug!(parameter = %spec.name, %source, value = ?value, "resolved parameter");
                }
                return Ok(Some(Resolved { value, source }));
            }
        }

        if spec.required {
            return Err(RegistrarError::missing(&spec.name));
        }
        debug!(parameter = %spec.name, "parameter not provided");
        Ok(None)
    }

    pub fn text(&self, spec: &ParameterSpec) -> Result<Option<String>, RegistrarError> {
        Ok(self.resolve(spec)?.map(|r| r.value.into_text()))
    }

    pub fn require_text(&self, spec: &ParameterSpec) -> Result<String, RegistrarError> {
        self.text(spec)?
            .ok_or_else(|| RegistrarError::missing(&spec.name))
    }

    pub fn list(&self, spec: &ParameterSpec) -> Result<Vec<String>, RegistrarError> {
        Ok(self
            .resolve(spec)?
            .map(|r| r.value.into_list())
            .unwrap_or_default())
    }

    /// 해석된 값을 출처와 함께 `ResolvedConfig`에 기록한다.
    pub fn collect(
        &self,
        specs: &[ParameterSpec],
        out: &mut ResolvedConfig,
    ) -> Result<(), RegistrarError> {
        for spec in specs {
            if let Some(resolved) = self.resolve(spec)? {
                let value = if spec.secret {
                    "********".to_string()
                } else {
                    resolved.value.into_text()
                };
                out.insert(&spec.name, value, resolved.source);
            }
        }
        Ok(())
    }

    pub fn engine_config(&self) -> Result<EngineConfig, RegistrarError> {
        Ok(EngineConfig {
            project_id: self.require_text(&specs::project_id())?,
            location: self.require_text(&specs::engine_location())?,
        })
    }

    pub fn registry_config(&self) -> Result<RegistryConfig, RegistrarError> {
        Ok(RegistryConfig {
            project_id: self.require_text(&specs::project_id())?,
            app_id: self.require_text(&specs::app_id())?,
            api_location: self.require_text(&specs::api_location())?,
            re_location: self.require_text(&specs::re_location())?,
        })
    }

    pub fn agent_config(&self) -> Result<AgentConfig, RegistrarError> {
        Ok(AgentConfig {
            display_name: self.require_text(&specs::display_name())?,
            description: self.require_text(&specs::description())?,
            tool_description: self.require_text(&specs::tool_description())?,
            adk_deployment_id: self.require_text(&specs::adk_deployment_id())?,
            auth_id: self.text(&specs::auth_id())?,
            icon_uri: self.text(&specs::icon_uri())?,
        })
    }

    pub fn authorization_config(&self) -> Result<AuthorizationConfig, RegistrarError> {
        Ok(AuthorizationConfig {
            project_id: self.require_text(&specs::project_id())?,
            location: self.require_text(&specs::auth_location())?,
        })
    }

    pub fn oauth_client(&self) -> Result<OAuthClient, RegistrarError> {
        Ok(OAuthClient {
            client_id: self.require_text(&specs::oauth_client_id())?,
            client_secret: self.require_text(&specs::oauth_client_secret())?.into(),
        })
    }

    pub fn scopes(&self) -> Result<Vec<String>, RegistrarError> {
        self.list(&specs::scopes())
    }

    fn lookup(
        &self,
        source: SourceKind,
        spec: &ParameterSpec,
    ) -> Result<Option<ParamValue>, RegistrarError> {
        match source {
            SourceKind::Cli => Ok(self.cli.get(&spec.name).cloned()),
            SourceKind::ConfigFile => Ok(self.file.lookup(&spec.name)),
            SourceKind::Environment => Ok(self.lookup_env(spec)),
            SourceKind::Prompt => self.lookup_prompt(spec),
            SourceKind::Default => Ok(spec.default.clone()),
        }
    }

    fn lookup_env(&self, spec: &ParameterSpec) -> Option<ParamValue> {
        // 네임스페이스 변수 우선, 그다음 잘 알려진 변수.
        std::iter::once(spec.env_var_name())
            .chain(well_known_env_vars(&spec.name).iter().map(ToString::to_string))
            .find_map(|name| self.env.var(&name))
            .map(ParamValue::Text)
    }

    fn lookup_prompt(&self, spec: &ParameterSpec) -> Result<Option<ParamValue>, RegistrarError> {
        let (Some(prompter), Some(message)) = (self.prompter, spec.prompt.as_deref()) else {
            return Ok(None);
        };

        let answer = prompter.prompt(message).map_err(|err| {
            RegistrarError::Configuration(format!(
                "failed to read input for parameter '{}': {err}",
                spec.name
            ))
        })?;

        Ok(answer
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(ParamValue::Text))
    }
}
