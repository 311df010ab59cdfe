//! Configuration schema definitions.
//!
//! This module defines the switching rule set as it appears in the
//! configuration document, plus the validated `Configuration` handed to the
//! dispatch engine. Document types derive Serde traits; every field defaults,
//! and an explicit `null` reads as the default too, so that missing values
//! are reported by rule verification rather than by the parser.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::observability::logging::LogLevel;
use crate::routing::TargetMatcher;

/// First-packet timeout applied to regexp rules that leave it unset.
pub const DEFAULT_FIRST_PACKET_TIMEOUT_MS: u64 = 5000;

/// Deserialize a field, reading `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Root of the configuration document, as deserialized.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ConfigDocument {
    /// Log level (trace, debug, info, warn, error, fatal, panic).
    /// Kept raw; resolved during validation.
    #[serde(deserialize_with = "null_as_default")]
    pub log_level: String,

    /// Switching rules, in document order.
    #[serde(deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

/// Validated configuration.
///
/// Built once at startup by the loader and shared read-only afterwards,
/// typically behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Resolved log level.
    pub log_level: LogLevel,

    /// Verified rules with compiled matchers, in document order.
    pub rules: Vec<Rule>,
}

/// One listener's routing policy.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Rule {
    /// Rule identifier for logging.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Address the listener binds to (e.g., "0.0.0.0:443").
    #[serde(deserialize_with = "null_as_default")]
    pub listen: String,

    /// Select targets by matching the first packet against their patterns.
    #[serde(deserialize_with = "null_as_default")]
    pub enable_regexp: bool,

    /// Candidate destinations, in priority order.
    #[serde(deserialize_with = "null_as_default")]
    pub targets: Vec<Target>,

    /// Milliseconds to wait for the first packet. Zero means unset.
    #[serde(deserialize_with = "null_as_default")]
    pub first_packet_timeout: u64,

    /// Client identifiers the dispatch engine refuses.
    #[serde(deserialize_with = "null_as_default")]
    pub blacklist: HashMap<String, bool>,
}

/// A forwarding destination within a rule.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Target {
    /// Pattern guarding this target. Only used in regexp mode.
    #[serde(deserialize_with = "null_as_default")]
    pub regexp: String,

    /// Compiled `regexp`, populated by rule verification in regexp mode.
    #[serde(skip)]
    pub matcher: Option<TargetMatcher>,

    /// Destination address (e.g., "127.0.0.1:8443").
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
}

impl Rule {
    /// The first-packet timeout, or `None` when no timeout is enforced.
    pub fn first_packet_timeout(&self) -> Option<Duration> {
        match self.first_packet_timeout {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Select the first target whose matcher accepts the packet.
    ///
    /// Returns `None` when regexp mode is off, when the rule has not been
    /// verified, or when no target matches.
    pub fn match_target(&self, packet: &[u8]) -> Option<&Target> {
        if !self.enable_regexp {
            return None;
        }
        self.targets.iter().find(|t| {
            t.matcher
                .as_ref()
                .map(|m| m.is_match(packet))
                .unwrap_or(false)
        })
    }
}
