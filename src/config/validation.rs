//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of each rule (serde handles syntactic)
//! - Apply derived defaults (first-packet timeout in regexp mode)
//! - Compile target patterns for regexp rules
//!
//! # Design Decisions
//! - Stops at the first error; nothing after it is checked
//! - Patterns are only compiled when they will be used
//! - Runs before config is accepted into the system

use thiserror::Error;
use tracing::debug;

use crate::config::loader::ConfigError;
use crate::config::schema::{Rule, DEFAULT_FIRST_PACKET_TIMEOUT_MS};
use crate::routing::TargetMatcher;

/// Reasons a single rule is rejected.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("empty name")]
    EmptyName,

    #[error("invalid listen address")]
    InvalidListenAddress,

    #[error("invalid targets")]
    InvalidTargets,

    /// Target at this position has no address.
    #[error("invalid address at pos {0}")]
    InvalidAddress(usize),

    /// Target at this position has a pattern that does not compile.
    #[error("invalid regexp at pos {index} : {source}")]
    InvalidRegexp {
        index: usize,
        #[source]
        source: regex::Error,
    },
}

impl Rule {
    /// Check the rule, fill in defaults and compile target matchers.
    ///
    /// Checks run in a fixed order (name, listen, targets, then each target's
    /// address and pattern) and the first failure is returned. The default
    /// first-packet timeout is applied before targets are checked, so it
    /// sticks even when a target is rejected.
    pub fn verify(&mut self) -> Result<(), RuleError> {
        if self.name.is_empty() {
            return Err(RuleError::EmptyName);
        }
        if self.listen.is_empty() {
            return Err(RuleError::InvalidListenAddress);
        }
        if self.targets.is_empty() {
            return Err(RuleError::InvalidTargets);
        }

        let regexp_mode = self.enable_regexp;
        if regexp_mode && self.first_packet_timeout == 0 {
            self.first_packet_timeout = DEFAULT_FIRST_PACKET_TIMEOUT_MS;
        }

        for (index, target) in self.targets.iter_mut().enumerate() {
            if target.address.is_empty() {
                return Err(RuleError::InvalidAddress(index));
            }
            if regexp_mode {
                let matcher = TargetMatcher::compile(&target.regexp)
                    .map_err(|source| RuleError::InvalidRegexp { index, source })?;
                target.matcher = Some(matcher);
            }
        }

        Ok(())
    }
}

/// Verify every rule in order with the given verifier.
///
/// Halts at the first rejected rule and reports its zero-based index.
pub fn validate_rules<F>(rules: &mut [Rule], mut verify: F) -> Result<(), ConfigError>
where
    F: FnMut(&mut Rule) -> Result<(), RuleError>,
{
    for (index, rule) in rules.iter_mut().enumerate() {
        debug!(index, rule = %rule.name, "Validating rule");
        verify(rule).map_err(|source| ConfigError::Rule { index, source })?;
    }
    Ok(())
}
