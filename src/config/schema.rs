//! Login middleware configuration.
//!
//! This module defines the configuration object produced by compiling one
//! login directive block. It is fully populated before the middleware is
//! constructed and never mutated afterwards.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::config::options::OptionSet;

/// Provider name -> that provider's options.
pub type Options = BTreeMap<String, OptionSet>;

/// Configuration of one login middleware instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginConfig {
    /// Secret used to sign issued tokens. Required.
    pub jwt_secret: String,

    /// Signing algorithm (default: HS512).
    pub jwt_algo: String,

    /// Lifetime of an issued token.
    pub jwt_expiry: Duration,

    /// How often a token may be refreshed. 0 disables refresh.
    pub jwt_refreshes: u32,

    /// Where to send the user after a successful login.
    pub success_url: String,

    /// Redirect back to the originating page after login.
    pub redirect: bool,

    /// Query parameter holding the redirect target.
    pub redirect_query_parameter: String,

    /// Only accept redirect targets matching the referer.
    pub redirect_check_referer: bool,

    /// File listing hosts allowed as redirect targets.
    pub redirect_host_file: String,

    /// Where to send the user after logout.
    pub logout_url: String,

    /// Path the login handler is mounted on.
    pub login_path: String,

    pub cookie_name: String,

    pub cookie_domain: String,

    /// Cookie lifetime. Zero means a session cookie.
    pub cookie_expiry: Duration,

    pub cookie_http_only: bool,

    pub cookie_secure: bool,

    /// Custom login page template.
    pub template: String,

    /// Clock skew tolerated when validating tokens.
    pub grace_period: Duration,

    /// File with per-user claims.
    pub user_file: String,

    /// Endpoint queried for per-user claims.
    pub user_endpoint: String,

    /// Bearer token sent to `user_endpoint`.
    pub user_endpoint_token: String,

    pub user_endpoint_timeout: Duration,

    /// Login backends keyed by provider name.
    pub backends: Options,

    /// OAuth providers keyed by provider name.
    pub oauth: Options,
}

/// Login path used when no context path or `login_path` is given.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_algo: "HS512".to_string(),
            jwt_expiry: Duration::from_secs(24 * 60 * 60),
            jwt_refreshes: 0,
            success_url: "/".to_string(),
            redirect: true,
            redirect_query_parameter: "backTo".to_string(),
            redirect_check_referer: true,
            redirect_host_file: String::new(),
            logout_url: String::new(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            cookie_name: "jwt_token".to_string(),
            cookie_domain: String::new(),
            cookie_expiry: Duration::ZERO,
            cookie_http_only: true,
            cookie_secure: true,
            template: String::new(),
            grace_period: Duration::from_secs(5),
            user_file: String::new(),
            user_endpoint: String::new(),
            user_endpoint_token: String::new(),
            user_endpoint_timeout: Duration::from_secs(5),
            backends: Options::new(),
            oauth: Options::new(),
        }
    }
}

impl LoginConfig {
    /// Names of every declared provider, backends first.
    pub fn provider_names(&self) -> Vec<&str> {
        self.backends
            .keys()
            .chain(self.oauth.keys())
            .map(String::as_str)
            .collect()
    }
}
