pub mod browse;
pub mod config;
pub mod listing;
pub mod search;
pub mod show;
pub mod suggest;

use anyhow::Context;
use scentdex_core::config::{AppConfig, LoadOptions};
use scentdex_core::errors::ApplicationError;
use scentdex_core::fixtures::seed_catalog;
use scentdex_core::Catalog;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_CATALOG: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps an application failure onto its user-safe message and exit code.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let (error_class, exit_code) = match &error {
            ApplicationError::Domain(_) => ("not_found", EXIT_NOT_FOUND),
            ApplicationError::CatalogLoad(_) => ("catalog_unavailable", EXIT_CATALOG),
            ApplicationError::Configuration(_) => ("config_validation", EXIT_CONFIG),
        };
        let detail = error.to_string();
        let interface = error.into_interface(correlation_id(command));
        tracing::warn!(
            command,
            error_class,
            correlation_id = interface.correlation_id(),
            error = %detail,
            "command failed"
        );
        Self::failure(
            command,
            error_class,
            format!(
                "{} ({detail}; correlation_id={})",
                interface.user_message(),
                interface.correlation_id()
            ),
            exit_code,
        )
    }
}

/// Loaded configuration plus the catalog it points at.
#[derive(Debug)]
pub struct Runtime {
    pub config: AppConfig,
    pub catalog: Catalog,
}

/// Loads config, then the catalog. A missing or broken dataset degrades to an
/// empty catalog when `catalog.fallback_to_empty` is set.
pub fn load_runtime(command: &str, options: &LoadOptions) -> Result<Runtime, CommandResult> {
    let config = AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::from_application_error(command, ApplicationError::from(error))
    })?;

    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(error) if config.catalog.fallback_to_empty => {
            tracing::warn!(
                command,
                error = %format!("{error:#}"),
                "catalog unavailable, continuing with an empty catalog"
            );
            Catalog::default()
        }
        Err(error) => {
            return Err(CommandResult::from_application_error(
                command,
                ApplicationError::CatalogLoad(format!("{error:#}")),
            ));
        }
    };

    Ok(Runtime { config, catalog })
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog.data_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog from `{}`", path.display())),
        None => seed_catalog().context("loading bundled catalog"),
    }
}

fn correlation_id(command: &str) -> String {
    format!("{command}-{}", Uuid::new_v4().simple())
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\",\"data\":null}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
