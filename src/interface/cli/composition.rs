//! 애플리케이션 조립(composition root) 모듈.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::Result;

use super::command::{CliAction, Command};
use crate::application::ports::{ConfigRepository, LoadedConfig, Prompter, UserConfirmer};
use crate::application::resolver::ParameterResolver;
use crate::application::usecases::CommandOutcome;
use crate::application::usecases::authorization::AuthorizationUseCase;
use crate::application::usecases::engine::EngineUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::registry::RegistryUseCase;
use crate::infrastructure::adapters::{
    AmbientTokenProvider, ConsoleReporter, ProcessEnvironment, StdinConfirmer, StdinPrompter,
};
use crate::infrastructure::config::JsonConfigRepository;
use crate::infrastructure::google::{
    AgentRegistryClient, ApiTransport, AuthorizationClient, ReasoningEngineClient,
    build_api_client,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    loaded: LoadedConfig,
    env: ProcessEnvironment,
    prompter: Option<StdinPrompter>,
    confirmer: Box<dyn UserConfirmer>,
    registry: AgentRegistryClient,
    engine: ReasoningEngineClient,
    authorizations: AuthorizationClient,
    reporter: ConsoleReporter,
}

impl AppComposition {
    /// 설정 파일을 읽고 게이트웨이를 조립한다.
    /// stdin이 터미널이고 `--no-input`이 아닐 때만 대화형 입력을 켠다.
    pub fn new(action: &CliAction) -> Self {
        let interactive = !action.no_input && io::stdin().is_terminal();
        Self::with_confirmer(action, interactive, Box::new(StdinConfirmer))
    }

    /// 확인 어댑터를 외부에서 주입한다.
    pub fn with_confirmer(
        action: &CliAction,
        interactive: bool,
        confirmer: Box<dyn UserConfirmer>,
    ) -> Self {
        let loaded = JsonConfigRepository.load(&action.config_path);
        let env = ProcessEnvironment::load();

        let token_command = loaded
            .config
            .lookup("token_command")
            .map(|value| value.into_list());
        let tokens = Arc::new(AmbientTokenProvider::new(&env, token_command));
        let transport = Arc::new(ApiTransport::new(build_api_client(), tokens));

        Self {
            loaded,
            env,
            prompter: interactive.then_some(StdinPrompter),
            confirmer,
            registry: AgentRegistryClient::new(transport.clone()),
            engine: ReasoningEngineClient::new(transport.clone()),
            authorizations: AuthorizationClient::new(transport),
            reporter: ConsoleReporter::new(),
        }
    }

    /// 명령 1회분 해석기를 만든다.
    pub fn resolver<'a>(&'a self, action: &'a CliAction) -> ParameterResolver<'a> {
        ParameterResolver::new(
            &action.args,
            &self.loaded.config,
            &self.env,
            self.prompter.as_ref().map(|p| p as &dyn Prompter),
        )
    }

    pub fn registry_usecase(&self) -> RegistryUseCase<'_> {
        RegistryUseCase {
            gateway: &self.registry,
            confirmer: self.confirmer.as_ref(),
        }
    }

    pub fn engine_usecase(&self) -> EngineUseCase<'_> {
        EngineUseCase {
            gateway: &self.engine,
            confirmer: self.confirmer.as_ref(),
        }
    }

    pub fn authorization_usecase(&self) -> AuthorizationUseCase<'_> {
        AuthorizationUseCase {
            gateway: &self.authorizations,
            confirmer: self.confirmer.as_ref(),
            reporter: &self.reporter,
        }
    }

    pub fn inspect_config_usecase<'a>(&'a self, action: &'a CliAction) -> InspectConfigUseCase<'a> {
        InspectConfigUseCase {
            loaded: &self.loaded,
            requested_path: action.config_path.to_str().unwrap_or("config.json"),
        }
    }

    /// 파싱된 명령을 해당 유스케이스로 보낸다.
    pub async fn execute(&self, action: &CliAction) -> Result<CommandOutcome> {
        let resolver = self.resolver(action);
        match action.command {
            Command::RegistryCreate => self.registry_usecase().create(&resolver).await,
            Command::RegistryList => self.registry_usecase().list(&resolver).await,
            Command::RegistryGet => self.registry_usecase().get(&resolver).await,
            Command::RegistryUpdate { keep_current } => {
                self.registry_usecase().update(&resolver, keep_current).await
            }
            Command::RegistryGetByName => {
                self.registry_usecase().get_by_display_name(&resolver).await
            }
            Command::RegistryDelete { force } => {
                self.registry_usecase().delete(&resolver, force).await
            }
            Command::EngineList => self.engine_usecase().list(&resolver).await,
            Command::EngineGet => self.engine_usecase().get(&resolver).await,
            Command::EngineListByName => self.engine_usecase().list_by_name(&resolver).await,
            Command::EngineUndeploy { force } => {
                self.engine_usecase().undeploy(&resolver, force).await
            }
            Command::AuthCreate => self.authorization_usecase().create(&resolver).await,
            Command::AuthList => self.authorization_usecase().list(&resolver).await,
            Command::AuthDelete { force } => {
                self.authorization_usecase().delete(&resolver, force).await
            }
            Command::AuthRefresh => self.authorization_usecase().refresh(&resolver).await,
            Command::ConfigShow => self.inspect_config_usecase(action).execute(&resolver),
        }
    }
}
