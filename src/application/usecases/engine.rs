//! Agent Engine(배포 레지스트리) 명령 유스케이스.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use crate::application::ports::{AgentEngineGateway, EngineSession, UserConfirmer};
use crate::application::resolver::{ParameterResolver, specs};
use crate::domain::engine::display_name_filter;

use super::{CommandOutcome, confirm_destructive};

pub struct EngineUseCase<'a> {
    pub gateway: &'a dyn AgentEngineGateway,
    pub confirmer: &'a dyn UserConfirmer,
}

impl<'a> EngineUseCase<'a> {
    pub async fn list(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let session = self.session(resolver).await?;
        let agents = session.list_agents(None).await?;
        let config = session.config();
        info!(
            project = %config.project_id,
            location = %config.location,
            count = agents.len(),
            "listed deployed agents"
        );
        Ok(CommandOutcome::completed(json!({ "agents": agents })))
    }

    pub async fn get(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let resource_id = resolver.require_text(&specs::resource_id())?;
        let session = self.session(resolver).await?;
        let agent = session.get_agent(&resource_id).await?;
        Ok(CommandOutcome::completed(serde_json::to_value(agent)?))
    }

    pub async fn list_by_name(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let display_name = resolver.require_text(&specs::engine_display_name())?;
        let session = self.session(resolver).await?;
        let filter = display_name_filter(&display_name);
        let agents = session.list_agents(Some(&filter)).await?;
        info!(count = agents.len(), display_name = %display_name, "listed deployed agents by name");
        Ok(CommandOutcome::completed(json!({ "agents": agents })))
    }

    pub async fn undeploy(
        &self,
        resolver: &ParameterResolver<'_>,
        force: bool,
    ) -> Result<CommandOutcome> {
        let resource_name = resolver.require_text(&specs::resource_name())?;
        let question = format!("Are you sure you want to delete agent '{resource_name}'?");
        if !confirm_destructive(self.confirmer, force, &question)? {
            return Ok(CommandOutcome::Cancelled);
        }

        let session = self.session(resolver).await?;
        session
            .delete_agent(&resource_name)
            .await
            .with_context(|| format!("failed to delete agent {resource_name}"))?;

        let message = format!("Agent with resource name {resource_name} deleted successfully");
        Ok(CommandOutcome::with_message(
            json!({ "message": message }),
            message,
        ))
    }

    async fn session(&self, resolver: &ParameterResolver<'_>) -> Result<Box<dyn EngineSession>> {
        let config = resolver.engine_config()?;
        self.gateway.initialize(&config).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::config::FileConfig;
    use crate::application::fakes::{FakeConfirmer, FakeEngine, MapEnv};
    use crate::application::resolver::CliArgs;
    use crate::domain::engine::DeployedAgent;

    fn deployed(id: &str, display_name: &str) -> DeployedAgent {
        DeployedAgent {
            name: id.to_string(),
            display_name: Some(display_name.to_string()),
            resource_name: format!("projects/p/locations/us-central1/reasoningEngines/{id}"),
            create_time: None,
        }
    }

    #[tokio::test]
    async fn list_summarizes_every_agent() {
        let gateway = FakeEngine::with_agents(vec![deployed("1", "a"), deployed("2", "b")]);
        let confirmer = FakeConfirmer::answering(true);
        let usecase = EngineUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = CliArgs::new().with("project_id", Some("p".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let CommandOutcome::Completed { result, .. } = usecase.list(&resolver).await.unwrap()
        else {
            panic!("expected completed outcome");
        };
        assert_eq!(result["agents"][1]["name"], "2");
        assert_eq!(result["agents"][0]["display_name"], "a");
        assert_eq!(gateway.calls(), vec!["initialize", "list:"]);
    }

    #[tokio::test]
    async fn list_by_name_passes_display_name_filter() {
        let gateway = FakeEngine::default();
        let confirmer = FakeConfirmer::answering(true);
        let usecase = EngineUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = CliArgs::new()
            .with("project_id", Some("p".into()))
            .with("re_display_name", Some("weather".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let outcome = usecase.list_by_name(&resolver).await.unwrap();
        assert_eq!(outcome, CommandOutcome::completed(json!({ "agents": [] })));
        assert_eq!(
            gateway.calls(),
            vec!["initialize", "list:display_name=\"weather\""]
        );
    }

    #[tokio::test]
    async fn missing_project_fails_before_initialization() {
        let gateway = FakeEngine::default();
        let confirmer = FakeConfirmer::answering(true);
        let usecase = EngineUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = CliArgs::new();
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        assert!(usecase.list(&resolver).await.is_err());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn cancelled_undeploy_never_initializes() {
        let gateway = FakeEngine::default();
        let confirmer = FakeConfirmer::answering(false);
        let usecase = EngineUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = CliArgs::new().with("resource_name", Some("projects/p/x".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let outcome = usecase.undeploy(&resolver, false).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn forced_undeploy_reports_resource_name() {
        let gateway = FakeEngine::default();
        let confirmer = FakeConfirmer::answering(false);
        let usecase = EngineUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let name = "projects/p/locations/us-central1/reasoningEngines/9";
        let cli = CliArgs::new()
            .with("project_id", Some("p".into()))
            .with("resource_name", Some(name.into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let outcome = usecase.undeploy(&resolver, true).await.unwrap();
        let expected = format!("Agent with resource name {name} deleted successfully");
        assert_eq!(
            outcome,
            CommandOutcome::with_message(json!({ "message": expected }), expected.clone())
        );
        assert_eq!(gateway.calls(), vec!["initialize".to_string(), format!("delete:{name}")]);
    }
}
