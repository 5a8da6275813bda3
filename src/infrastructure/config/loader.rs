//! 단일 JSON 설정 파일 로더.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::utils::expand_home;
use crate::application::config::FileConfig;
use crate::application::ports::{ConfigRepository, LoadedConfig};

/// JSON 기반 설정 저장소 어댑터.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self, path: &Path) -> LoadedConfig {
        let path = expand_home(path);
        match load_config_file(&path) {
            Ok(Some(values)) => {
                debug!(path = %path.display(), keys = values.len(), "loaded config file");
                LoadedConfig {
                    config: FileConfig::from_map(values),
                    loaded_path: Some(path.display().to_string()),
                }
            }
            Ok(None) => {
                debug!(path = %path.display(), "config file not found, using empty config");
                LoadedConfig::default()
            }
            Err(err) => {
                warn!(path = %path.display(), "ignoring config file: {err:#}");
                LoadedConfig::default()
            }
        }
    }
}

/// 설정 파일을 읽는다. 파일이 없으면 `Ok(None)`.
/// 최상위 값이 객체가 아니면 오류.
pub fn load_config_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config at {}", path.display()));
        }
    };

    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
    match parsed {
        Value::Object(values) => Ok(Some(values)),
        other => bail!(
            "expected a JSON object in {}, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
