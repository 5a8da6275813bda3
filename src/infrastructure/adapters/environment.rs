//! 프로세스 환경변수 포트 구현.
//!
//! 현재 디렉터리(또는 상위)의 `.env` 값은 실제 환경변수에 없는 이름에만 쓰인다.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::{debug, warn};

use crate::application::ports::Environment;

#[derive(Debug, Default)]
pub struct ProcessEnvironment {
    dotenv: HashMap<String, String>,
}

impl ProcessEnvironment {
    /// 가장 가까운 `.env`를 찾아 읽는다. 없으면 프로세스 환경만 쓴다.
    pub fn load() -> Self {
        match dotenvy::dotenv_iter() {
            Ok(iter) => Self::from_entries(iter),
            Err(err) if err.not_found() => Self::default(),
            Err(err) => {
                warn!(error = %err, "failed to read .env file; ignoring it");
                Self::default()
            }
        }
    }

    /// 지정한 `.env` 파일을 읽는다.
    pub fn with_dotenv_file(path: &Path) -> Self {
        match dotenvy::from_path_iter(path) {
            Ok(iter) => Self::from_entries(iter),
            Err(err) => {
                debug!(path = %path.display(), error = %err, ".env file not loaded");
                Self::default()
            }
        }
    }

    fn from_entries<I>(entries: I) -> Self
    where
        I: Iterator<Item = dotenvy::Result<(String, String)>>,
    {
        let mut dotenv = HashMap::new();
        for entry in entries {
            match entry {
                Ok((key, value)) => {
                    dotenv.insert(key, value);
                }
                Err(err) => warn!(error = %err, "skipping malformed .env line"),
            }
        }
        debug!(count = dotenv.len(), "loaded .env values");
        Self { dotenv }
    }
}

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        // 유니코드가 아닌 값은 없는 것으로 본다.
        env::var(name)
            .ok()
            .or_else(|| self.dotenv.get(name).cloned())
    }
}
