//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     init_logging() → subscriber at INFO
//!     config loaded → LogHandle::apply(config.log_level)
//!
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//! ```
//!
//! # Design Decisions
//! - Structured logging with fields (rule name, index, address)
//! - Level is set once from config; there is no reload path

pub mod logging;

pub use logging::{init_logging, LogHandle, LogLevel};
