//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Matcher Compilation (at startup):
//!     Target.regexp
//!     → matcher.rs (compile once)
//!     → stored on the Target, immutable
//!
//! Per connection (dispatch engine):
//!     first packet bytes
//!     → Rule::match_target (targets in document order)
//!     → Return: first matching Target or None
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, never at connection time
//! - Deterministic: same packet always selects the same target
//! - First match wins (document order)

pub mod matcher;

pub use matcher::TargetMatcher;
