//! Login middleware integration.
//!
//! # Data Flow
//! ```text
//! login block
//!     → handler.rs (setup: compile block → LoginHandler)
//!     → middleware/login_config.rs (attach Arc<LoginConfig> to each request)
//!     → login request handling (external)
//! ```
//!
//! # Design Decisions
//! - One handler, and one configuration, per login block
//! - The configuration is shared read-only across requests; nothing
//!   writes to it after setup

pub mod handler;
pub mod middleware;

pub use handler::{setup, setup_site, LoginHandler};
pub use middleware::login_config::attach_login_config;
