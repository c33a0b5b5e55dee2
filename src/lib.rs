//! Login middleware directive compiler.
//!
//! Compiles the `login` blocks of a site file into validated, immutable
//! [`LoginConfig`] values consumed by the login middleware.

pub mod config;
pub mod http;
pub mod observability;

pub use config::{ConfigError, LoginConfig};
pub use http::LoginHandler;
