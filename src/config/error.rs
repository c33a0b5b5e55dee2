//! Error taxonomy for directive compilation.
//!
//! Every variant is terminal: the block that produced it yields no
//! configuration.

use thiserror::Error;

/// Errors raised while compiling a login directive block.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The site file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The text could not be split into blocks and lines.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// No handler is registered under this directive name.
    #[error("unknown directive '{name}' at line {line}")]
    UnknownDirective { name: String, line: usize },

    /// The directive got a different number of arguments than it takes.
    #[error("wrong number of arguments for {directive} at line {line}: expected {expected}, got {args:?}")]
    Arity {
        directive: String,
        expected: &'static str,
        args: Vec<String>,
        line: usize,
    },

    /// The block header carries more than one positional argument.
    #[error("too many arguments for {directive} at line {line}: {args:?}")]
    TooManyArguments {
        directive: String,
        args: Vec<String>,
        line: usize,
    },

    /// A literal could not be coerced into the field's type.
    #[error("invalid {expected} value for {directive} at line {line}: '{value}'")]
    ValueParse {
        directive: String,
        value: String,
        expected: &'static str,
        line: usize,
    },

    /// An option string segment is not in `key=value` form.
    #[error("malformed option for {directive} at line {line}: '{segment}' (expected key1=value1,key2=...)")]
    MalformedOption {
        directive: String,
        segment: String,
        line: usize,
    },

    /// A legacy `backend` declaration without a usable `provider=` key.
    #[error("missing provider for {directive} at line {line}: '{value}' (expected provider=<name>,key=value,...)")]
    MissingProvider {
        directive: String,
        value: String,
        line: usize,
    },

    /// A directive inside the login block opened its own sub-block.
    #[error("directive {directive} at line {line} does not take a block")]
    NestedBlock { directive: String, line: usize },

    /// The login block holds no directives.
    #[error("empty {directive} block at line {line}")]
    EmptyBlock { directive: String, line: usize },

    /// No `jwt_secret` was supplied.
    #[error("{directive} block at line {line} has no jwt_secret")]
    MissingSecret { directive: String, line: usize },

    /// No login backend was declared.
    #[error("{directive} block at line {line} declares no login backend")]
    NoBackendsDeclared { directive: String, line: usize },
}

/// Result type for directive compilation.
pub type ConfigResult<T> = Result<T, ConfigError>;
