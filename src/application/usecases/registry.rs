//! Agent Registry(갤러리) 명령 유스케이스.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::application::ports::{AgentRegistryGateway, UserConfirmer};
use crate::application::resolver::{ParameterResolver, specs};
use crate::domain::agent::AgentPatch;
use crate::domain::parameter::ParameterSpec;
use crate::error::RegistrarError;

use super::{CommandOutcome, confirm_destructive, deletion_result};

/// 갤러리 에이전트 생성/조회/수정/삭제를 조율한다.
pub struct RegistryUseCase<'a> {
    pub gateway: &'a dyn AgentRegistryGateway,
    pub confirmer: &'a dyn UserConfirmer,
}

impl<'a> RegistryUseCase<'a> {
    pub async fn create(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let registry = resolver.registry_config()?;
        let agent = resolver.agent_config()?;

        info!(display_name = %agent.display_name, "creating agent");
        let created = self.gateway.create_agent(&registry, &agent).await?;
        Ok(CommandOutcome::completed(created))
    }

    pub async fn list(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let registry = resolver.registry_config()?;
        let agents = self.gateway.list_agents(&registry).await?;
        info!(count = agents.len(), "listed agents");
        Ok(CommandOutcome::completed(json!({ "agents": agents })))
    }

    pub async fn get(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let agent_id = resolver.require_text(&specs::agent_id())?;
        let registry = resolver.registry_config()?;
        let agent = self.gateway.get_agent(&registry, &agent_id).await?;
        Ok(CommandOutcome::completed(agent))
    }

    /// 지정된 필드만 갱신한다.
    /// `keep_current`이면 현재 값을 먼저 읽어 기본값으로 쓰고, 바뀐 필드만 보낸다.
    pub async fn update(
        &self,
        resolver: &ParameterResolver<'_>,
        keep_current: bool,
    ) -> Result<CommandOutcome> {
        let agent_id = resolver.require_text(&specs::agent_id())?;
        let registry = resolver.registry_config()?;

        let patch = if keep_current {
            let current_agent = self.gateway.get_agent(&registry, &agent_id).await?;
            let current = AgentPatch::from_agent(&current_agent);
            resolve_patch_keeping(resolver, &current)?.without_unchanged(&current)
        } else {
            resolve_patch(resolver)?
        };

        let Some(request) = patch.to_request(&registry) else {
            return Err(RegistrarError::Validation("No fields to update".to_string()).into());
        };

        info!(agent_id = %agent_id, update_mask = %request.update_mask, "updating agent");
        let updated = self
            .gateway
            .update_agent(&registry, &agent_id, &request)
            .await?;
        Ok(CommandOutcome::completed(updated))
    }

    pub async fn get_by_display_name(
        &self,
        resolver: &ParameterResolver<'_>,
    ) -> Result<CommandOutcome> {
        let display_name = resolver.require_text(&specs::display_name())?;
        let registry = resolver.registry_config()?;
        let agents = self
            .gateway
            .find_agents_by_display_name(&registry, &display_name)
            .await?;
        info!(count = agents.len(), display_name = %display_name, "found agents by display name");
        Ok(CommandOutcome::completed(json!({ "agents": agents })))
    }

    pub async fn delete(
        &self,
        resolver: &ParameterResolver<'_>,
        force: bool,
    ) -> Result<CommandOutcome> {
        let agent_id = resolver.require_text(&specs::agent_id())?;
        let question = format!("Are you sure you want to delete agent '{agent_id}'?");
        if !confirm_destructive(self.confirmer, force, &question)? {
            return Ok(CommandOutcome::Cancelled);
        }

        let registry = resolver.registry_config()?;
        let response = self.gateway.delete_agent(&registry, &agent_id).await?;
        let result = deletion_result(response, format!("Agent {agent_id} deleted successfully"));
        Ok(CommandOutcome::with_message(
            result,
            format!("Agent '{agent_id}' deleted successfully."),
        ))
    }
}

fn resolve_patch(resolver: &ParameterResolver<'_>) -> Result<AgentPatch, RegistrarError> {
    // 일반 업데이트에서는 모든 필드가 선택 사항이며 대화형 입력도 하지 않는다.
    let optional = |name: &str| resolver.text(&ParameterSpec::optional(name));

    Ok(AgentPatch {
        display_name: optional("display_name")?,
        description: optional("description")?,
        tool_description: optional("tool_description")?,
        adk_deployment_id: optional("adk_deployment_id")?,
        auth_id: optional("auth_id")?,
        icon_uri: optional("icon_uri")?,
    })
}

fn resolve_patch_keeping(
    resolver: &ParameterResolver<'_>,
    current: &AgentPatch,
) -> Result<AgentPatch, RegistrarError> {
    let keep = |name: &str, label: &str, value: &Option<String>| {
        resolver.text(&specs::keep_current(name, label, value.clone()))
    };

    Ok(AgentPatch {
        display_name: keep("display_name", "display name", &current.display_name)?,
        description: keep("description", "description", &current.description)?,
        tool_description: keep("tool_description", "tool description", &current.tool_description)?,
        adk_deployment_id: keep(
            "adk_deployment_id",
            "ADK deployment ID",
            &current.adk_deployment_id,
        )?,
        auth_id: keep("auth_id", "authorization ID", &current.auth_id)?,
        icon_uri: keep("icon_uri", "icon URI", &current.icon_uri)?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::config::FileConfig;
    use crate::application::resolver::CliArgs;
    use crate::application::fakes::{FakeConfirmer, FakeRegistry, MapEnv, ScriptedPrompter};

    fn base_cli() -> CliArgs {
        CliArgs::new()
            .with("project_id", Some("proj".into()))
            .with("app_id", Some("app".into()))
    }

    #[tokio::test]
    async fn delete_cancelled_issues_no_call() {
        let gateway = FakeRegistry::default();
        let confirmer = FakeConfirmer::answering(false);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli().with("agent_id", Some("a1".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let outcome = usecase.delete(&resolver, false).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert_eq!(confirmer.asked(), 1);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn forced_delete_skips_confirmation_and_reports_message() {
        let gateway = FakeRegistry::default();
        let confirmer = FakeConfirmer::answering(false);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli().with("agent_id", Some("a1".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let outcome = usecase.delete(&resolver, true).await.unwrap();
        assert_eq!(confirmer.asked(), 0);
        assert_eq!(gateway.calls(), vec!["delete:a1".to_string()]);
        assert_eq!(
            outcome,
            CommandOutcome::with_message(
                json!({ "message": "Agent a1 deleted successfully" }),
                "Agent 'a1' deleted successfully."
            )
        );
    }

    #[tokio::test]
    async fn update_without_fields_is_rejected_before_any_call() {
        let gateway = FakeRegistry::default();
        let confirmer = FakeConfirmer::answering(true);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli().with("agent_id", Some("a1".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let err = usecase.update(&resolver, false).await.unwrap_err();
        let err = err.downcast_ref::<RegistrarError>().unwrap();
        assert!(matches!(err, RegistrarError::Validation(msg) if msg == "No fields to update"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn update_sends_mask_of_provided_fields() {
        let gateway = FakeRegistry::default();
        let confirmer = FakeConfirmer::answering(true);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli()
            .with("agent_id", Some("a1".into()))
            .with("display_name", Some("Renamed".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        usecase.update(&resolver, false).await.unwrap();
        assert_eq!(gateway.calls(), vec!["update:a1:displayName".to_string()]);
    }

    #[tokio::test]
    async fn keep_current_update_sends_only_changed_fields() {
        let gateway = FakeRegistry::with_agent(json!({
            "displayName": "Helper",
            "description": "Helps",
            "adkAgentDefinition": {
                "toolSettings": { "toolDescription": "Answers" }
            }
        }));
        let confirmer = FakeConfirmer::answering(true);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli().with("agent_id", Some("a1".into()));
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        // display name: 유지, description: 변경, 나머지: 유지
        let prompter = ScriptedPrompter::new(&[
            Some(""),
            Some("Helps a lot"),
            None,
            None,
            None,
            None,
        ]);
        let resolver = ParameterResolver::new(&cli, &cfg, &env, Some(&prompter));

        usecase.update(&resolver, true).await.unwrap();
        assert_eq!(
            gateway.calls(),
            vec!["get:a1".to_string(), "update:a1:description".to_string()]
        );
    }

    #[tokio::test]
    async fn create_requires_agent_fields() {
        let gateway = FakeRegistry::default();
        let confirmer = FakeConfirmer::answering(true);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli();
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let err = usecase.create(&resolver).await.unwrap_err();
        assert!(
            err.downcast_ref::<RegistrarError>()
                .is_some_and(RegistrarError::is_configuration)
        );
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn list_wraps_agents() {
        let gateway = FakeRegistry::default();
        let confirmer = FakeConfirmer::answering(true);
        let usecase = RegistryUseCase {
            gateway: &gateway,
            confirmer: &confirmer,
        };

        let cli = base_cli();
        let cfg = FileConfig::default();
        let env = MapEnv::default();
        let resolver = ParameterResolver::new(&cli, &cfg, &env, None);

        let outcome = usecase.list(&resolver).await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::completed(json!({ "agents": [{ "name": "agents/1" }] }))
        );
    }
}
