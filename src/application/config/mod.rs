//! 설정 파일 스키마(순수 데이터).
//!
//! 주의: 파일 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::parameter::ParamValue;

/// 기존 설정 파일에서 쓰던 키 이름 대응표 (파라미터 이름, 설정 파일 키).
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("display_name", "ars_display_name"),
    ("resource_id", "re_resource_id"),
    ("resource_name", "re_resource_name"),
];

/// 평평한 JSON 객체 설정 파일.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FileConfig {
    values: Map<String, Value>,
}

impl FileConfig {
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 파라미터 값을 조회한다. `null`은 값 없음으로 취급한다.
    pub fn lookup(&self, name: &str) -> Option<ParamValue> {
        if let Some(value) = self.values.get(name).and_then(to_param_value) {
            return Some(value);
        }

        LEGACY_KEYS
            .iter()
            .filter(|(param, _)| *param == name)
            .find_map(|(_, key)| self.values.get(*key).and_then(to_param_value))
    }
}

fn to_param_value(value: &Value) -> Option<ParamValue> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(ParamValue::Text(text.clone())),
        Value::Array(items) => Some(ParamValue::List(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
        )),
        other => Some(ParamValue::Text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> FileConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn null_is_not_a_value() {
        let cfg = config(json!({ "auth_id": null }));
        assert_eq!(cfg.lookup("auth_id"), None);
    }

    #[test]
    fn empty_string_is_a_value() {
        let cfg = config(json!({ "icon_uri": "" }));
        assert_eq!(cfg.lookup("icon_uri"), Some(ParamValue::Text(String::new())));
    }

    #[test]
    fn arrays_become_lists_and_scalars_become_text() {
        let cfg = config(json!({ "scopes": ["email", "profile"], "retries": 3 }));
        assert_eq!(
            cfg.lookup("scopes"),
            Some(ParamValue::List(vec!["email".into(), "profile".into()]))
        );
        assert_eq!(cfg.lookup("retries"), Some(ParamValue::Text("3".into())));
    }

    #[test]
    fn display_name_falls_back_to_legacy_key() {
        let cfg = config(json!({ "ars_display_name": "Gallery Agent" }));
        assert_eq!(
            cfg.lookup("display_name"),
            Some(ParamValue::Text("Gallery Agent".into()))
        );

        let cfg = config(json!({ "display_name": "new", "ars_display_name": "old" }));
        assert_eq!(cfg.lookup("display_name"), Some(ParamValue::Text("new".into())));
    }
}
