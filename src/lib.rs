//! Connection switcher: rule configuration and validation.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::Configuration;
