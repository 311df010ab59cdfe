//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Read config → Parse → Validate rules → Apply log level → Ready
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Ready is terminal; there is no reload or hot swap

pub mod startup;

pub use startup::{start, StartupError};
