//! Per-workspace declarative project config
//!
//! Two formats are read from the workspace root, first hit wins:
//! - `.itercr`: `key=value` lines, `#` comments, optional quotes
//! - `.itercr.json`: a flat JSON object

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Key=value config file name
pub const KEY_VALUE_FILE: &str = ".itercr";

/// JSON config file name
pub const JSON_FILE: &str = ".itercr.json";

const URL_KEYS: &[&str] = &["project_url", "projectUrl", "git_url", "gitUrl"];
const NAME_KEYS: &[&str] = &[
    "project_name",
    "projectName",
    "git_project_name",
    "gitProjectName",
];

/// Project coordinates declared in the workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Repository URL
    pub project_url: Option<String>,
    /// Repository display name
    pub project_name: Option<String>,
}

impl ProjectConfig {
    const fn is_empty(&self) -> bool {
        self.project_url.is_none() && self.project_name.is_none()
    }
}

/// Read the project config from `dir`, if any file declares something
pub fn read_project_config(dir: &Path) -> Option<ProjectConfig> {
    let readers: [(&str, fn(&str) -> Option<ProjectConfig>); 2] = [
        (KEY_VALUE_FILE, |text| Some(parse_key_value(text))),
        (JSON_FILE, parse_json),
    ];

    readers.iter().find_map(|(file, parse)| {
        let text = fs::read_to_string(dir.join(file)).ok()?;
        let config = parse(&text).filter(|c| !c.is_empty());
        if config.is_none() {
            debug!("{file} present but declares no project url/name");
        }
        config
    })
}

/// Parse `key=value` lines
pub fn parse_key_value(text: &str) -> ProjectConfig {
    let mut config = ProjectConfig::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim());
        if value.is_empty() {
            continue;
        }

        let key = key.trim();
        if URL_KEYS.contains(&key) {
            config.project_url.get_or_insert_with(|| value.to_string());
        } else if NAME_KEYS.contains(&key) {
            config.project_name.get_or_insert_with(|| value.to_string());
        }
    }

    config
}

/// Parse a flat JSON object; `None` if the text is not a JSON object
pub fn parse_json(text: &str) -> Option<ProjectConfig> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let lookup = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| object.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(ToString::to_string)
    };

    Some(ProjectConfig {
        project_url: lookup(URL_KEYS),
        project_name: lookup(NAME_KEYS),
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
