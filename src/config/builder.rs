//! Login block compilation.
//!
//! # Responsibilities
//! - Seed a configuration with every default
//! - Apply the legacy context path before any directive runs
//! - Dispatch each directive line through the registry in document order
//! - Validate the result and resolve file references
//!
//! # Design Decisions
//! - Fail fast: the first failing directive aborts the block and no partial
//!   configuration is returned
//! - Legacy spellings are normalised here, so the registry never branches on
//!   dialect
//! - Directive order is irrelevant except for repeated provider
//!   declarations, where the last one for a given name wins

use std::path::{Path, PathBuf};

use crate::config::directives::{canonical_name, lookup, LEGACY_BACKEND};
use crate::config::dispenser::{DirectiveLine, TokenSource};
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::paths::resolve_paths;
use crate::config::schema::{LoginConfig, DEFAULT_LOGIN_PATH};
use crate::config::validation::validate_config;

/// Names a login block may be opened with.
pub const BLOCK_NAMES: &[&str] = &["login", "loginsrv"];

/// Compiles one login block into a [`LoginConfig`].
#[derive(Debug)]
pub struct ConfigBuilder {
    block: String,
    line: usize,
    context_path: Option<String>,
    document_root: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Create a builder for the block `block` opened at `line`.
    pub fn new(block: impl Into<String>, line: usize) -> Self {
        Self {
            block: block.into(),
            line,
            context_path: None,
            document_root: None,
        }
    }

    /// Legacy positional path prefix; `login_path` defaults to `<path>/login`.
    pub fn context_path(mut self, path: Option<&str>) -> Self {
        self.context_path = path.map(str::to_string);
        self
    }

    /// Directory relative `template` paths are resolved against.
    pub fn document_root(mut self, root: Option<&Path>) -> Self {
        self.document_root = root.map(Path::to_path_buf);
        self
    }

    /// Run the directives of `source` and return the validated configuration.
    pub fn build(self, mut source: impl TokenSource) -> ConfigResult<LoginConfig> {
        let mut config = LoginConfig::default();
        if let Some(context) = &self.context_path {
            config.login_path = login_path_under(context);
        }

        let mut applied = 0usize;
        while let Some(line) = source.next_directive() {
            self.dispatch(&line, &mut config)?;
            applied += 1;
        }

        if applied == 0 {
            return Err(ConfigError::EmptyBlock {
                directive: self.block,
                line: self.line,
            });
        }

        validate_config(&config, &self.block, self.line)?;
        let config = resolve_paths(config, self.document_root.as_deref());

        tracing::info!(
            block = %self.block,
            line = self.line,
            login_path = %config.login_path,
            providers = ?config.provider_names(),
            "Login block compiled"
        );
        Ok(config)
    }

    fn dispatch(&self, line: &DirectiveLine, config: &mut LoginConfig) -> ConfigResult<()> {
        if line.block.is_some() {
            return Err(ConfigError::NestedBlock {
                directive: line.name.clone(),
                line: line.line,
            });
        }

        let canonical = canonical_name(&line.name);
        if canonical != line.name {
            tracing::warn!(
                directive = %line.name,
                line = line.line,
                "DEPRECATED: use '{}' instead of '{}'",
                canonical,
                line.name
            );
        }
        if canonical == LEGACY_BACKEND {
            tracing::warn!(
                line = line.line,
                "DEPRECATED: declare backends by provider name instead of 'backend provider=...'"
            );
        }

        let directive = lookup(&canonical).ok_or_else(|| ConfigError::UnknownDirective {
            name: line.name.clone(),
            line: line.line,
        })?;

        tracing::debug!(directive = directive.name, line = line.line, "Applying directive");
        directive.apply(&line.name, &line.args, line.line, config)
    }
}

/// Compile a parsed `login`/`loginsrv` block.
///
/// A single block argument is the legacy context path; more than one is
/// rejected.
pub fn build_block(block: &DirectiveLine, document_root: Option<&Path>) -> ConfigResult<LoginConfig> {
    let context_path = match block.args.as_slice() {
        [] => None,
        [path] => {
            tracing::warn!(
                block = %block.name,
                line = block.line,
                "DEPRECATED: set the login path with 'login_path', not as a block argument"
            );
            Some(path.as_str())
        }
        _ => {
            return Err(ConfigError::TooManyArguments {
                directive: block.name.clone(),
                args: block.args.clone(),
                line: block.line,
            })
        }
    };

    ConfigBuilder::new(&block.name, block.line)
        .context_path(context_path)
        .document_root(document_root)
        .build(block.lines())
}

/// Join `<context>` and `/login`, then clean the result lexically:
/// repeated slashes collapse, `.` segments drop and `..` removes the
/// segment before it.
fn login_path_under(context: &str) -> String {
    clean_path(&format!("{context}{DEFAULT_LOGIN_PATH}"))
}

fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` cannot climb above the root.
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
