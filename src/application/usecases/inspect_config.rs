//! 현재 명령줄/설정 파일/환경변수로 해석되는 설정을 확인하는 유스케이스.

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::application::ports::LoadedConfig;
use crate::application::resolver::{ParameterResolver, specs};
use crate::domain::parameter::ParameterSpec;
use crate::domain::settings::{ResolvedConfig, ResolvedEntry};

use super::CommandOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub config_path: String,
    pub config_loaded: bool,
    pub settings: IndexMap<String, ResolvedEntry>,
}

/// 대화형 입력 없이 알려진 모든 파라미터를 해석해 출처와 함께 보여준다.
pub struct InspectConfigUseCase<'a> {
    pub loaded: &'a LoadedConfig,
    pub requested_path: &'a str,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let mut resolved = ResolvedConfig::new();
        resolver
            .without_prompts()
            .collect(&inspected_specs(), &mut resolved)?;

        let inspection = ConfigInspection {
            config_path: self
                .loaded
                .loaded_path
                .clone()
                .unwrap_or_else(|| self.requested_path.to_string()),
            config_loaded: self.loaded.loaded_path.is_some(),
            settings: resolved.with_sources(),
        };
        Ok(CommandOutcome::completed(serde_json::to_value(inspection)?))
    }
}

fn inspected_specs() -> Vec<ParameterSpec> {
    [
        specs::project_id(),
        specs::engine_location(),
        specs::auth_location(),
        specs::app_id(),
        specs::api_location(),
        specs::re_location(),
        specs::display_name(),
        specs::description(),
        specs::tool_description(),
        specs::adk_deployment_id(),
        specs::auth_id(),
        specs::icon_uri(),
        specs::scopes(),
        specs::oauth_client_id(),
        specs::oauth_client_secret(),
    ]
    .into_iter()
    .map(|mut spec| {
        spec.required = false;
        spec
    })
    .collect()
}
