//! Login directive compilation subsystem.
//!
//! # Data Flow
//! ```text
//! site file (Caddyfile-style text)
//!     → loader.rs (read file, track document root)
//!     → dispenser.rs (tokenize into blocks of directive lines)
//!     → builder.rs (one pass per login block, defaults first)
//!         → directives.rs (name → handler, literal coercion)
//!             → options.rs (provider option strings)
//!         → validation.rs (secret + provider checks)
//!         → paths.rs (relative template → document root)
//!     → LoginConfig (validated, immutable)
//!     → shared via Arc with the login middleware
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs recompiles every block
//!     → new LoginConfig set sent to the owner
//! ```
//!
//! # Design Decisions
//! - Config is immutable once compiled; changes require a full recompile
//! - Every field has a default so a block needs only a secret and a provider
//! - Any malformed directive aborts its block; there is no partial result
//! - Errors name the directive, the offending value and the source line

pub mod builder;
pub mod directives;
pub mod dispenser;
pub mod error;
pub mod loader;
pub mod options;
pub mod paths;
pub mod schema;
pub mod validation;
pub mod values;
pub mod watcher;

pub use builder::{build_block, ConfigBuilder};
pub use dispenser::{parse_blocks, DirectiveLine, TokenSource};
pub use error::{ConfigError, ConfigResult};
pub use loader::{compile_site, load_site};
pub use options::{parse_options, OptionSet};
pub use schema::{LoginConfig, Options};
