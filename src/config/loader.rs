//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::schema::{ConfigDocument, Configuration, Rule};
use crate::config::validation::{validate_rules, RuleError};
use crate::observability::logging::{LogLevel, ParseLogLevelError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse config: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("empty rule")]
    EmptyRuleSet,

    #[error("invalid log_level {0:?}")]
    InvalidLogLevel(String),

    #[error("verify rule failed at pos {index} : {source}")]
    Rule {
        index: usize,
        #[source]
        source: RuleError,
    },
}

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load and validate configuration from a file.
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let document = read_document(path)?;
    validate_document(document)
}

/// Read and deserialize a configuration file without validating it.
pub fn read_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    debug!(path = %path.display(), "Reading config");
    let content = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&content, ConfigFormat::from_path(path))
}

/// Deserialize raw document bytes.
pub fn parse_document(content: &[u8], format: ConfigFormat) -> Result<ConfigDocument, ConfigError> {
    debug!(?format, "Parsing config");
    let document: ConfigDocument = match format {
        ConfigFormat::Json => serde_json::from_slice(content)?,
        ConfigFormat::Toml => toml::from_str(std::str::from_utf8(content)?)?,
    };
    Ok(document)
}

/// Parse and validate an in-memory configuration document.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Configuration, ConfigError> {
    let document = parse_document(content.as_bytes(), format)?;
    validate_document(document)
}

/// Turn a deserialized document into a validated configuration.
///
/// Checks run in order: at least one rule, a known log level, then every
/// rule in document order. The first failure is returned.
pub fn validate_document(document: ConfigDocument) -> Result<Configuration, ConfigError> {
    let log_level = resolve_log_level(&document)?;
    verify_rules(document, log_level)
}

/// Check the document has rules and resolve its log level.
///
/// Callers that own the logging backend apply the level between this step
/// and `verify_rules`.
pub fn resolve_log_level(document: &ConfigDocument) -> Result<LogLevel, ConfigError> {
    if document.rules.is_empty() {
        return Err(ConfigError::EmptyRuleSet);
    }

    document
        .log_level
        .parse()
        .map_err(|ParseLogLevelError(raw)| ConfigError::InvalidLogLevel(raw))
}

/// Verify every rule in document order and freeze the configuration.
pub fn verify_rules(document: ConfigDocument, log_level: LogLevel) -> Result<Configuration, ConfigError> {
    let mut rules = document.rules;
    validate_rules(&mut rules, Rule::verify)?;

    debug!(rules = rules.len(), "Config validated");
    Ok(Configuration { log_level, rules })
}
