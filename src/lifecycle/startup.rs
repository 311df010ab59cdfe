//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and resolve its log level
//! - Apply the log level before rules are verified
//! - Hand the frozen configuration to the rest of the process
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is retried
//! - Single-threaded; runs before any connection handling
//! - The result is an `Arc`, read without locks by every worker

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::loader::{read_document, resolve_log_level, verify_rules};
use crate::config::{ConfigError, Configuration};
use crate::observability::logging::{LogHandle, LoggingError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Load the configuration at `path` and make it ready for serving.
///
/// The configured level is in effect while rules are verified, so it stays
/// applied even when a rule is then rejected.
pub fn start(path: &Path, logging: &LogHandle) -> Result<Arc<Configuration>, StartupError> {
    let document = read_document(path)?;
    let log_level = resolve_log_level(&document)?;
    logging.apply(log_level)?;

    let config = verify_rules(document, log_level)?;

    info!(
        path = %path.display(),
        log_level = %config.log_level,
        rules = config.rules.len(),
        "Configuration loaded"
    );

    for rule in &config.rules {
        info!(
            rule = %rule.name,
            listen = %rule.listen,
            enable_regexp = rule.enable_regexp,
            targets = rule.targets.len(),
            first_packet_timeout_ms = rule.first_packet_timeout,
            blacklist = rule.blacklist.len(),
            "Rule ready"
        );
    }

    Ok(Arc::new(config))
}
