//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON/TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (rule checks, defaults, matcher compilation)
//!     → Configuration (validated, immutable)
//!     → shared via Arc with the dispatch engine
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All document fields have defaults; verification reports what is missing
//! - Validation separates syntactic (serde) from semantic checks
//! - First error wins, reported with the failing rule's position

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, ConfigFormat};
pub use schema::{ConfigDocument, Configuration, Rule, Target};
pub use validation::RuleError;
