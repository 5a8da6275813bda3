//! ambient 자격 증명(환경변수 또는 gcloud)에서 bearer 토큰을 얻는 어댑터.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{AccessTokenProvider, Environment};
use crate::error::RegistrarError;

/// 순서대로 조회하는 토큰 환경변수.
pub const TOKEN_ENV_VARS: &[&str] = &["AGENTSPACE_ACCESS_TOKEN", "CLOUDSDK_AUTH_ACCESS_TOKEN"];

pub const DEFAULT_TOKEN_COMMAND: &[&str] = &["gcloud", "auth", "print-access-token"];

/// 환경변수 토큰이 없으면 토큰 명령을 한 번 실행하고 결과를 프로세스 동안 재사용한다.
pub struct AmbientTokenProvider {
    /// (변수 이름, 값)
    env_token: Option<(String, String)>,
    command: Vec<String>,
    cached: Mutex<Option<SecretString>>,
}

impl AmbientTokenProvider {
    pub fn new(env: &dyn Environment, command: Option<Vec<String>>) -> Self {
        let env_token = TOKEN_ENV_VARS.iter().find_map(|name| {
            env.var(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (name.to_string(), v))
        });

        let command = command
            .filter(|cmd| cmd.iter().any(|part| !part.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_TOKEN_COMMAND.iter().map(ToString::to_string).collect());

        Self {
            env_token,
            command,
            cached: Mutex::new(None),
        }
    }

    /// 토큰 출처 라벨(진단용).
    pub fn source_label(&self) -> String {
        match &self.env_token {
            Some((name, _)) => format!("env:{name}"),
            None => format!("cmd:{}", self.command.join(" ")),
        }
    }

    async fn run_command(&self) -> Result<SecretString, RegistrarError> {
        let program = self
            .command
            .first()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RegistrarError::Authentication("token command is empty".into()))?;

        let Some(executable) = locate_program(&program) else {
            return Err(RegistrarError::Authentication(format!(
                "token command '{program}' was not found; install the Google Cloud SDK or set {}",
                TOKEN_ENV_VARS[0]
            )));
        };

        debug!(command = %self.command.join(" "), path = %executable.display(), "running token command");
        let output = Command::new(&executable)
            .args(&self.command[1..])
            .output()
            .await
            .map_err(|err| {
                RegistrarError::Authentication(format!("failed to run {program}: {err}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RegistrarError::Authentication(format!(
                "{} exited with {}: {}",
                self.command.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(RegistrarError::Authentication(format!(
                "{} printed an empty token",
                self.command.join(" ")
            )));
        }
        Ok(SecretString::from(token))
    }
}

/// 토큰 명령 실행 파일을 찾는다. 경로가 주어지면 그 파일만, 아니면 PATH를 훑는다.
fn locate_program(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }

    let search = env::var_os("PATH")?;
    let names = program_names(program);
    env::split_paths(&search)
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Windows에서는 확장자 없는 이름(`gcloud`)이 `gcloud.cmd` 등으로 설치된다.
fn program_names(program: &str) -> Vec<String> {
    let mut names = vec![program.to_string()];
    if cfg!(windows) && Path::new(program).extension().is_none() {
        names.extend([".exe", ".cmd", ".bat"].map(|ext| format!("{program}{ext}")));
    }
    names
}

#[async_trait]
impl AccessTokenProvider for AmbientTokenProvider {
    async fn access_token(&self) -> Result<SecretString, RegistrarError> {
        if let Some((name, token)) = &self.env_token {
            debug!(source = %name, "using access token from environment");
            return Ok(SecretString::from(token.clone()));
        }

        let cached = self
            .cached
            .lock()
            .ok()
            .and_then(|cached| cached.as_ref().map(|t| t.expose_secret().to_string()));
        if let Some(token) = cached {
            return Ok(SecretString::from(token));
        }

        let token = self.run_command().await?;
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(SecretString::from(token.expose_secret().to_string()));
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::MapEnv;

    #[tokio::test]
    async fn namespaced_env_token_wins() {
        let env = MapEnv::with(&[
            ("AGENTSPACE_ACCESS_TOKEN", "tok-1"),
            ("CLOUDSDK_AUTH_ACCESS_TOKEN", "tok-2"),
        ]);
        let provider = AmbientTokenProvider::new(&env, None);

        let token = provider.access_token().await.unwrap();
        assert_eq!(token.expose_secret(), "tok-1");
        assert_eq!(provider.source_label(), "env:AGENTSPACE_ACCESS_TOKEN");
    }

    #[tokio::test]
    async fn blank_env_token_is_ignored() {
        let env = MapEnv::with(&[
            ("AGENTSPACE_ACCESS_TOKEN", "  "),
            ("CLOUDSDK_AUTH_ACCESS_TOKEN", "tok-2"),
        ]);
        let provider = AmbientTokenProvider::new(&env, None);
        assert_eq!(provider.access_token().await.unwrap().expose_secret(), "tok-2");
    }

    #[test]
    fn default_command_is_gcloud() {
        let provider = AmbientTokenProvider::new(&MapEnv::default(), Some(vec![" ".into()]));
        assert_eq!(provider.source_label(), "cmd:gcloud auth print-access-token");
    }

    #[test]
    fn explicit_program_path_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let helper = dir.path().join("token-helper");
        std::fs::write(&helper, "#!/bin/sh\necho tok\n").unwrap();

        assert_eq!(locate_program(helper.to_str().unwrap()), Some(helper.clone()));
        assert_eq!(locate_program("./definitely/not/here/gcloud"), None);
    }

    #[cfg(unix)]
    #[test]
    fn bare_program_is_found_on_path() {
        let found = locate_program("sh").unwrap();
        assert!(found.ends_with("sh"));
        assert_eq!(locate_program("no-such-token-helper-binary"), None);
    }

    #[tokio::test]
    async fn missing_command_is_authentication_error() {
        let provider = AmbientTokenProvider::new(
            &MapEnv::default(),
            Some(vec!["./no/such/token-helper".into()]),
        );

        let err = provider.access_token().await.unwrap_err();
        assert!(matches!(err, RegistrarError::Authentication(_)));
        assert!(err.to_string().contains("token-helper"));
    }
}
