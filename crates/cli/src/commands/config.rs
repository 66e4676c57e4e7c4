use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use scentdex_core::config::{AppConfig, LoadOptions};
use scentdex_core::errors::ApplicationError;
use serde::Serialize;
use toml::Value;

use super::CommandResult;

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_application_error(COMMAND, ApplicationError::from(error))
        }
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let catalog = &config.catalog;
    let data_path = catalog
        .data_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<bundled>".to_string());

    let entries = vec![
        ConfigEntry {
            key: "catalog.data_path",
            value: data_path,
            source: source("catalog.data_path", &["SCENTDEX_CATALOG_DATA_PATH"]),
        },
        ConfigEntry {
            key: "catalog.page_size",
            value: catalog.page_size.to_string(),
            source: source("catalog.page_size", &["SCENTDEX_CATALOG_PAGE_SIZE"]),
        },
        ConfigEntry {
            key: "catalog.search_limit",
            value: catalog.search_limit.to_string(),
            source: source("catalog.search_limit", &["SCENTDEX_CATALOG_SEARCH_LIMIT"]),
        },
        ConfigEntry {
            key: "catalog.suggestion_limit",
            value: catalog.suggestion_limit.to_string(),
            source: source("catalog.suggestion_limit", &["SCENTDEX_CATALOG_SUGGESTION_LIMIT"]),
        },
        ConfigEntry {
            key: "catalog.min_query_chars",
            value: catalog.min_query_chars.to_string(),
            source: source("catalog.min_query_chars", &["SCENTDEX_CATALOG_MIN_QUERY_CHARS"]),
        },
        ConfigEntry {
            key: "catalog.fallback_to_empty",
            value: catalog.fallback_to_empty.to_string(),
            source: source("catalog.fallback_to_empty", &["SCENTDEX_CATALOG_FALLBACK_TO_EMPTY"]),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source("logging.level", &["SCENTDEX_LOGGING_LEVEL", "SCENTDEX_LOG_LEVEL"]),
        },
        ConfigEntry {
            key: "logging.format",
            value: config.logging.format.as_str().to_string(),
            source: source("logging.format", &["SCENTDEX_LOGGING_FORMAT", "SCENTDEX_LOG_FORMAT"]),
        },
    ];

    CommandResult::success_with_data(
        COMMAND,
        "effective config (source precedence: override > env > file > default)",
        entries,
    )
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("scentdex.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/scentdex.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
