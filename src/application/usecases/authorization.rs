//! OAuth authorization 명령 유스케이스.

use anyhow::Result;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::application::ports::{AuthorizationGateway, Reporter, UserConfirmer};
use crate::application::resolver::{ParameterResolver, specs};
use crate::domain::agent::resource_id;

use super::{CommandOutcome, confirm_destructive, deletion_result};

pub struct AuthorizationUseCase<'a> {
    pub gateway: &'a dyn AuthorizationGateway,
    pub confirmer: &'a dyn UserConfirmer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> AuthorizationUseCase<'a> {
    /// ID가 없으면 UUID v4를 만든다.
    pub async fn create(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let requested = resolver.text(&specs::authorization_id())?;
        let config = resolver.authorization_config()?;
        let client = resolver.oauth_client()?;
        let scopes = resolver.scopes()?;

        let authorization_id = requested.unwrap_or_else(|| self.generated_id());
        info!(authorization_id = %authorization_id, "creating authorization");
        let created = self
            .gateway
            .create_authorization(&config, &authorization_id, &client, &scopes)
            .await?;

        let created_id = created_id(&created).unwrap_or(authorization_id);
        Ok(CommandOutcome::with_message(
            created,
            format!("Authorization '{created_id}' created successfully."),
        ))
    }

    pub async fn list(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let config = resolver.authorization_config()?;
        let authorizations = self.gateway.list_authorizations(&config).await?;
        info!(count = authorizations.len(), "listed authorizations");
        Ok(CommandOutcome::completed(
            json!({ "authorizations": authorizations }),
        ))
    }

    pub async fn delete(
        &self,
        resolver: &ParameterResolver<'_>,
        force: bool,
    ) -> Result<CommandOutcome> {
        let authorization_id = resolver.require_text(&specs::existing_authorization_id())?;
        let question =
            format!("Are you sure you want to delete authorization '{authorization_id}'?");
        if !confirm_destructive(self.confirmer, force, &question)? {
            return Ok(CommandOutcome::Cancelled);
        }

        let config = resolver.authorization_config()?;
        let response = self
            .gateway
            .delete_authorization(&config, &authorization_id)
            .await?;
        let result = deletion_result(
            response,
            format!("Authorization {authorization_id} deleted successfully"),
        );
        Ok(CommandOutcome::with_message(
            result,
            format!("Authorization '{authorization_id}' deleted successfully."),
        ))
    }

    /// 새 authorization을 만든 뒤 기존 것을 삭제한다. 롤백은 없다.
    pub async fn refresh(&self, resolver: &ParameterResolver<'_>) -> Result<CommandOutcome> {
        let old_id = resolver.require_text(&specs::old_auth_id())?;
        let requested = resolver.text(&specs::new_auth_id())?;
        let config = resolver.authorization_config()?;
        let client = resolver.oauth_client()?;
        let scopes = resolver.scopes()?;

        let new_id = requested.unwrap_or_else(|| self.generated_id());

        let created = self
            .gateway
            .create_authorization(&config, &new_id, &client, &scopes)
            .await?;
        let new_id = created_id(&created).unwrap_or(new_id);

        let deleted = match self.gateway.delete_authorization(&config, &old_id).await {
            Ok(deleted) => deleted,
            Err(err) => {
                self.reporter.warning(&format!(
                    "New authorization '{new_id}' was created but deleting '{old_id}' failed; \
                     remove it manually"
                ));
                return Err(err.context(format!(
                    "authorization '{new_id}' was created but '{old_id}' could not be deleted"
                )));
            }
        };

        let message = format!("Authorization refreshed: {old_id} -> {new_id}");
        Ok(CommandOutcome::with_message(
            json!({
                "created": created,
                "deleted": deleted,
                "message": message,
            }),
            message,
        ))
    }
}

impl AuthorizationUseCase<'_> {
    fn generated_id(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.reporter
            .info(&format!("No authorization ID provided, generated '{id}'"));
        id
    }
}

fn created_id(created: &Value) -> Option<String> {
    created
        .get("name")
        .and_then(Value::as_str)
        .map(|name| resource_id(name).to_string())
}
