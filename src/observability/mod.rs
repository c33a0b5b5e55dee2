//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem produces:
//!     → debug: each dispatched directive
//!     → warn: deprecated dialect (block argument, dash spelling, backend provider=)
//!     → info: each compiled block
//!
//! Consumers:
//!     → logging.rs (fmt layer on stdout, filtered by RUST_LOG)
//! ```

pub mod logging;
