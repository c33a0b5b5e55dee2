//! Configuration validation.
//!
//! # Responsibilities
//! - Cross-field checks that no single directive can make on its own
//! - A secret must be present to sign tokens
//! - At least one login backend must be declared; OAuth providers alone
//!   do not satisfy this
//!
//! # Design Decisions
//! - Runs once, after every directive of the block was applied
//! - Stops at the first failing check: a block either compiles or it doesn't

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::LoginConfig;

/// Validate a fully assembled configuration.
///
/// `block` and `line` name the login block for error reporting.
pub fn validate_config(config: &LoginConfig, block: &str, line: usize) -> ConfigResult<()> {
    if config.jwt_secret.is_empty() {
        return Err(ConfigError::MissingSecret {
            directive: block.to_string(),
            line,
        });
    }

    if config.backends.is_empty() {
        return Err(ConfigError::NoBackendsDeclared {
            directive: block.to_string(),
            line,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::parse_options;

    #[test]
    fn test_requires_secret() {
        let mut config = LoginConfig::default();
        config
            .backends
            .insert("simple".into(), parse_options("bob=secret").unwrap());
        let err = validate_config(&config, "login", 4).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret { line: 4, .. }));
    }

    #[test]
    fn test_requires_a_provider() {
        let config = LoginConfig {
            jwt_secret: "s".into(),
            ..LoginConfig::default()
        };
        let err = validate_config(&config, "login", 1).unwrap_err();
        assert!(matches!(err, ConfigError::NoBackendsDeclared { .. }));
    }

    #[test]
    fn test_oauth_only_is_rejected() {
        let mut config = LoginConfig {
            jwt_secret: "s".into(),
            ..LoginConfig::default()
        };
        config
            .oauth
            .insert("github".into(), parse_options("client_id=a,client_secret=b").unwrap());
        let err = validate_config(&config, "login", 1).unwrap_err();
        assert!(matches!(err, ConfigError::NoBackendsDeclared { .. }));
    }

    #[test]
    fn test_oauth_alongside_backend_is_valid() {
        let mut config = LoginConfig {
            jwt_secret: "s".into(),
            ..LoginConfig::default()
        };
        config
            .oauth
            .insert("github".into(), parse_options("client_id=a,client_secret=b").unwrap());
        config
            .backends
            .insert("simple".into(), parse_options("bob=secret").unwrap());
        assert!(validate_config(&config, "login", 1).is_ok());
    }
}
