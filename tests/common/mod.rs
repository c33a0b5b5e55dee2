//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use proxy_login::config::{compile_site, ConfigResult, LoginConfig, OptionSet};

/// Compile the first login block of `input`.
pub fn compile(input: &str) -> ConfigResult<LoginConfig> {
    compile_in(input, None)
}

/// Compile the first login block of `input` under a document root.
pub fn compile_in(input: &str, root: Option<&Path>) -> ConfigResult<LoginConfig> {
    let mut configs = compile_site(input, root)?;
    assert_eq!(configs.len(), 1, "expected exactly one login block");
    Ok(configs.remove(0))
}

/// Build an option set from literal pairs.
pub fn opts(pairs: &[(&str, &str)]) -> OptionSet {
    pairs.iter().copied().collect()
}

/// The configuration every block starts from, with a secret and one
/// `simple` backend.
pub fn defaults_with(secret: &str, simple: &[(&str, &str)]) -> LoginConfig {
    let mut config = LoginConfig {
        jwt_secret: secret.to_string(),
        ..LoginConfig::default()
    };
    config.backends.insert("simple".to_string(), opts(simple));
    config
}

pub fn hours(h: u64) -> Duration {
    Duration::from_secs(h * 3600)
}
