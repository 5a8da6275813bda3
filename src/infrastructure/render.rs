//! 명령 결과(JSON)를 stdout용 문자열로 렌더링하는 모듈.

use anyhow::Result;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(value),
        OutputFormat::Text => Ok(render_text(value)),
    }
}

/// 2칸 들여쓰기 JSON.
pub fn render_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// 사람이 읽기 위한 텍스트 형식.
/// `agents`/`authorizations` 목록은 번호 목록으로, 그 외 객체는 정렬된 키/값 행으로 출력한다.
pub fn render_text(value: &Value) -> String {
    if let Some(agents) = list_field(value, "agents") {
        return render_agent_list(agents);
    }
    if let Some(authorizations) = list_field(value, "authorizations") {
        return render_authorization_list(authorizations);
    }
    match value {
        Value::Object(map) => {
            let rows: Vec<(String, String)> = map
                .iter()
                .map(|(key, value)| (key.clone(), scalar_text(value)))
                .collect();
            render_rows(&rows)
        }
        Value::Null => String::new(),
        other => scalar_text(other),
    }
}

/// 결과 객체의 유일한 키가 해당 배열일 때만 목록으로 본다. 다른 키가 섞이면 일반 객체 행으로 출력한다.
fn list_field<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.get(key)?.as_array()
}

fn render_agent_list(agents: &[Value]) -> String {
    if agents.is_empty() {
        return "No agents found.".to_string();
    }

    let mut lines = Vec::new();
    for (i, agent) in agents.iter().enumerate() {
        let name = text_of(agent, &["display_name", "displayName"]).unwrap_or("Unknown");
        lines.push(format!("{}. {name}", i + 1));
        lines.push(format!("   ID: {}", text_of(agent, &["name"]).unwrap_or("Unknown")));
        if let Some(description) = text_of(agent, &["description"]) {
            lines.push(format!("   Description: {description}"));
        }
        if let Some(resource) = text_of(agent, &["resource_name"]) {
            lines.push(format!("   Resource: {resource}"));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn render_authorization_list(authorizations: &[Value]) -> String {
    if authorizations.is_empty() {
        return "No authorizations found.".to_string();
    }

    let mut lines = Vec::new();
    for (i, authorization) in authorizations.iter().enumerate() {
        let name = text_of(authorization, &["name"]).unwrap_or("Unknown");
        let id = name.rsplit('/').next().unwrap_or(name);
        lines.push(format!("{}. {id}", i + 1));
        lines.push(format!("   Name: {name}"));
        if let Some(client_id) = authorization
            .get("serverSideOauth2")
            .and_then(|oauth| text_of(oauth, &["clientId"]))
        {
            lines.push(format!("   Client ID: {client_id}"));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// 키 열의 표시 폭을 맞춘 `key: value` 행.
fn render_rows(rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(key.as_str()))
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(key, value)| {
            let pad = width - UnicodeWidthStr::width(key.as_str());
            format!("{key}{}: {value}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_of<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| value.get(*key).and_then(Value::as_str))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
