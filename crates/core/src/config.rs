use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::search::{DEFAULT_SEARCH_LIMIT, MIN_QUERY_CHARS};
use crate::suggestions::DEFAULT_SUGGESTION_LIMIT;

#[derive(Clone, Debug, Serialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatalogConfig {
    /// JSON dataset to load; the bundled catalog is used when unset.
    pub data_path: Option<PathBuf>,
    pub page_size: usize,
    pub search_limit: usize,
    pub suggestion_limit: usize,
    pub min_query_chars: usize,
    /// Serve an empty catalog instead of failing when the dataset cannot be loaded.
    pub fallback_to_empty: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_path: Option<PathBuf>,
    pub page_size: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                data_path: None,
                page_size: DEFAULT_PAGE_SIZE,
                search_limit: DEFAULT_SEARCH_LIMIT,
                suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
                min_query_chars: MIN_QUERY_CHARS,
                fallback_to_empty: true,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("scentdex.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(data_path) = catalog.data_path {
                self.catalog.data_path = Some(data_path);
            }
            if let Some(page_size) = catalog.page_size {
                self.catalog.page_size = page_size;
            }
            if let Some(search_limit) = catalog.search_limit {
                self.catalog.search_limit = search_limit;
            }
            if let Some(suggestion_limit) = catalog.suggestion_limit {
                self.catalog.suggestion_limit = suggestion_limit;
            }
            if let Some(min_query_chars) = catalog.min_query_chars {
                self.catalog.min_query_chars = min_query_chars;
            }
            if let Some(fallback_to_empty) = catalog.fallback_to_empty {
                self.catalog.fallback_to_empty = fallback_to_empty;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SCENTDEX_CATALOG_DATA_PATH") {
            self.catalog.data_path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("SCENTDEX_CATALOG_PAGE_SIZE") {
            self.catalog.page_size = parse_usize("SCENTDEX_CATALOG_PAGE_SIZE", &value)?;
        }
        if let Some(value) = read_env("SCENTDEX_CATALOG_SEARCH_LIMIT") {
            self.catalog.search_limit = parse_usize("SCENTDEX_CATALOG_SEARCH_LIMIT", &value)?;
        }
        if let Some(value) = read_env("SCENTDEX_CATALOG_SUGGESTION_LIMIT") {
            self.catalog.suggestion_limit =
                parse_usize("SCENTDEX_CATALOG_SUGGESTION_LIMIT", &value)?;
        }
        if let Some(value) = read_env("SCENTDEX_CATALOG_MIN_QUERY_CHARS") {
            self.catalog.min_query_chars =
                parse_usize("SCENTDEX_CATALOG_MIN_QUERY_CHARS", &value)?;
        }
        if let Some(value) = read_env("SCENTDEX_CATALOG_FALLBACK_TO_EMPTY") {
            self.catalog.fallback_to_empty =
                parse_bool("SCENTDEX_CATALOG_FALLBACK_TO_EMPTY", &value)?;
        }

        let log_level =
            read_env("SCENTDEX_LOGGING_LEVEL").or_else(|| read_env("SCENTDEX_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SCENTDEX_LOGGING_FORMAT").or_else(|| read_env("SCENTDEX_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_path) = overrides.data_path {
            self.catalog.data_path = Some(data_path);
        }
        if let Some(page_size) = overrides.page_size {
            self.catalog.page_size = page_size;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("scentdex.toml"), PathBuf::from("config/scentdex.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.data_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.data_path must not be empty (omit it to use the bundled catalog)"
                    .to_string(),
            ));
        }
    }

    if catalog.page_size == 0 || catalog.page_size > 100 {
        return Err(ConfigError::Validation(
            "catalog.page_size must be in range 1..=100".to_string(),
        ));
    }

    if catalog.search_limit == 0 {
        return Err(ConfigError::Validation(
            "catalog.search_limit must be greater than zero".to_string(),
        ));
    }

    if catalog.suggestion_limit == 0 {
        return Err(ConfigError::Validation(
            "catalog.suggestion_limit must be greater than zero".to_string(),
        ));
    }

    if catalog.min_query_chars == 0 {
        return Err(ConfigError::Validation(
            "catalog.min_query_chars must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    data_path: Option<PathBuf>,
    page_size: Option<usize>,
    search_limit: Option<usize>,
    suggestion_limit: Option<usize>,
    min_query_chars: Option<usize>,
    fallback_to_empty: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_catalog_behaviour() -> Result<(), String> {
        let config = AppConfig::default();

        ensure(config.catalog.data_path.is_none(), "bundled catalog is the default")?;
        ensure(config.catalog.page_size == 12, "default page size should be 12")?;
        ensure(config.catalog.search_limit == 8, "default search limit should be 8")?;
        ensure(config.catalog.suggestion_limit == 6, "default suggestion limit should be 6")?;
        ensure(config.catalog.min_query_chars == 2, "typeahead waits for two characters")?;
        ensure(config.catalog.fallback_to_empty, "load failures degrade to an empty catalog")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )?;
        config.validate().map_err(|err| format!("defaults should validate: {err}"))
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_SCENTDEX_DATA_DIR", "/srv/scentdex");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("scentdex.toml");
            fs::write(
                &path,
                r#"
[catalog]
data_path = "${TEST_SCENTDEX_DATA_DIR}/perfumes.json"
page_size = 24
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.data_path == Some(PathBuf::from("/srv/scentdex/perfumes.json")),
                "data path should be interpolated from the environment",
            )?;
            ensure(config.catalog.page_size == 24, "page size should come from the file")?;
            Ok(())
        })();

        clear_vars(&["TEST_SCENTDEX_DATA_DIR"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&["TEST_SCENTDEX_UNSET_VAR"]);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("scentdex.toml");
        fs::write(&path, "[catalog]\ndata_path = \"${TEST_SCENTDEX_UNSET_VAR}\"\n")
            .map_err(|err| err.to_string())?;

        let error = match AppConfig::load(LoadOptions {
            config_path: Some(path),
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected interpolation failure".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(
                error,
                ConfigError::MissingEnvInterpolation { ref var } if var == "TEST_SCENTDEX_UNSET_VAR"
            ),
            "error should name the missing variable",
        )
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SCENTDEX_LOG_LEVEL", "warn");
        env::set_var("SCENTDEX_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["SCENTDEX_LOG_LEVEL", "SCENTDEX_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SCENTDEX_CATALOG_PAGE_SIZE", "30");
        env::set_var("SCENTDEX_CATALOG_SEARCH_LIMIT", "5");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("scentdex.toml");
            fs::write(
                &path,
                r#"
[catalog]
data_path = "from-file.json"
page_size = 18
suggestion_limit = 4

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    data_path: Some(PathBuf::from("from-override.json")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.data_path == Some(PathBuf::from("from-override.json")),
                "override data path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.catalog.page_size == 30, "env page size should win over file")?;
            ensure(config.catalog.search_limit == 5, "env search limit should win over default")?;
            ensure(config.catalog.suggestion_limit == 4, "file value should win over default")?;
            Ok(())
        })();

        clear_vars(&["SCENTDEX_CATALOG_PAGE_SIZE", "SCENTDEX_CATALOG_SEARCH_LIMIT"]);
        result
    }

    #[test]
    fn malformed_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SCENTDEX_CATALOG_FALLBACK_TO_EMPTY", "sometimes");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env override failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "SCENTDEX_CATALOG_FALLBACK_TO_EMPTY"
                ),
                "error should name the offending variable",
            )
        })();

        clear_vars(&["SCENTDEX_CATALOG_FALLBACK_TO_EMPTY"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SCENTDEX_CATALOG_PAGE_SIZE", "0");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("catalog.page_size")
            );
            ensure(has_message, "validation failure should mention catalog.page_size")
        })();

        clear_vars(&["SCENTDEX_CATALOG_PAGE_SIZE"]);
        result
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");

        let error = match AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected missing file failure".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(error, ConfigError::MissingConfigFile(ref missing) if *missing == path),
            "missing file error should carry the requested path",
        )
    }

    #[test]
    fn unknown_log_format_is_rejected() -> Result<(), String> {
        ensure("pretty".parse::<LogFormat>().is_ok(), "pretty should parse")?;
        ensure(" JSON ".parse::<LogFormat>().is_ok(), "format parsing should be lenient on case")?;
        ensure("xml".parse::<LogFormat>().is_err(), "xml is not a supported log format")
    }
}
