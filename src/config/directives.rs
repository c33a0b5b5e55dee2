//! Directive registry.
//!
//! # Responsibilities
//! - Map every directive name to the handler that consumes its arguments
//! - Coerce argument literals into the field's type
//! - Accumulate provider declarations into the keyed provider collections
//!
//! # Design Decisions
//! - The table is a `static` slice of closed `Handler` variants; nothing is
//!   registered at runtime
//! - Names are stored in canonical `_` spelling; lookups normalise `-` first,
//!   so the legacy dash spelling of every directive resolves to the same entry
//! - A handler writes only the field(s) it owns and never reads another
//!   handler's output

use std::time::Duration;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::options::{parse_options, OptionSet};
use crate::config::schema::LoginConfig;
use crate::config::values::{parse_bool, parse_count, parse_duration};

/// Legacy backend declaration: `backend provider=<name>,key=value,...`.
pub const LEGACY_BACKEND: &str = "backend";

/// String-valued fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    JwtSecret,
    JwtAlgo,
    SuccessUrl,
    RedirectQueryParameter,
    RedirectHostFile,
    LogoutUrl,
    LoginPath,
    CookieName,
    CookieDomain,
    Template,
    UserFile,
    UserEndpoint,
    UserEndpointToken,
}

impl TextField {
    fn slot(self, config: &mut LoginConfig) -> &mut String {
        match self {
            TextField::JwtSecret => &mut config.jwt_secret,
            TextField::JwtAlgo => &mut config.jwt_algo,
            TextField::SuccessUrl => &mut config.success_url,
            TextField::RedirectQueryParameter => &mut config.redirect_query_parameter,
            TextField::RedirectHostFile => &mut config.redirect_host_file,
            TextField::LogoutUrl => &mut config.logout_url,
            TextField::LoginPath => &mut config.login_path,
            TextField::CookieName => &mut config.cookie_name,
            TextField::CookieDomain => &mut config.cookie_domain,
            TextField::Template => &mut config.template,
            TextField::UserFile => &mut config.user_file,
            TextField::UserEndpoint => &mut config.user_endpoint,
            TextField::UserEndpointToken => &mut config.user_endpoint_token,
        }
    }
}

/// Boolean fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    Redirect,
    RedirectCheckReferer,
    CookieHttpOnly,
    CookieSecure,
}

impl FlagField {
    fn slot(self, config: &mut LoginConfig) -> &mut bool {
        match self {
            FlagField::Redirect => &mut config.redirect,
            FlagField::RedirectCheckReferer => &mut config.redirect_check_referer,
            FlagField::CookieHttpOnly => &mut config.cookie_http_only,
            FlagField::CookieSecure => &mut config.cookie_secure,
        }
    }
}

/// Duration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    JwtExpiry,
    CookieExpiry,
    UserEndpointTimeout,
}

impl DurationField {
    fn slot(self, config: &mut LoginConfig) -> &mut Duration {
        match self {
            DurationField::JwtExpiry => &mut config.jwt_expiry,
            DurationField::CookieExpiry => &mut config.cookie_expiry,
            DurationField::UserEndpointTimeout => &mut config.user_endpoint_timeout,
        }
    }
}

/// Integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    JwtRefreshes,
}

impl CountField {
    fn slot(self, config: &mut LoginConfig) -> &mut u32 {
        match self {
            CountField::JwtRefreshes => &mut config.jwt_refreshes,
        }
    }
}

/// Which provider collection a provider directive accumulates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Backend,
    Oauth,
}

/// Behaviour of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Text(TextField),
    Flag(FlagField),
    Duration(DurationField),
    Count(CountField),
    /// `<provider> k=v,...`, keyed by the directive name itself.
    Provider(ProviderKind),
    /// `backend provider=<name>,k=v,...`.
    LegacyBackend,
}

/// A registered directive.
#[derive(Debug, Clone, Copy)]
pub struct Directive {
    pub name: &'static str,
    pub handler: Handler,
}

const fn directive(name: &'static str, handler: Handler) -> Directive {
    Directive { name, handler }
}

/// Every directive accepted inside a login block.
pub static DIRECTIVES: &[Directive] = &[
    directive("jwt_secret", Handler::Text(TextField::JwtSecret)),
    directive("jwt_algo", Handler::Text(TextField::JwtAlgo)),
    directive("jwt_expiry", Handler::Duration(DurationField::JwtExpiry)),
    directive("jwt_refreshes", Handler::Count(CountField::JwtRefreshes)),
    directive("success_url", Handler::Text(TextField::SuccessUrl)),
    directive("redirect", Handler::Flag(FlagField::Redirect)),
    directive(
        "redirect_query_parameter",
        Handler::Text(TextField::RedirectQueryParameter),
    ),
    directive(
        "redirect_check_referer",
        Handler::Flag(FlagField::RedirectCheckReferer),
    ),
    directive("redirect_host_file", Handler::Text(TextField::RedirectHostFile)),
    directive("logout_url", Handler::Text(TextField::LogoutUrl)),
    directive("login_path", Handler::Text(TextField::LoginPath)),
    directive("cookie_name", Handler::Text(TextField::CookieName)),
    directive("cookie_domain", Handler::Text(TextField::CookieDomain)),
    directive("cookie_expiry", Handler::Duration(DurationField::CookieExpiry)),
    directive("cookie_http_only", Handler::Flag(FlagField::CookieHttpOnly)),
    directive("cookie_secure", Handler::Flag(FlagField::CookieSecure)),
    directive("template", Handler::Text(TextField::Template)),
    directive("user_file", Handler::Text(TextField::UserFile)),
    directive("user_endpoint", Handler::Text(TextField::UserEndpoint)),
    directive("user_endpoint_token", Handler::Text(TextField::UserEndpointToken)),
    directive(
        "user_endpoint_timeout",
        Handler::Duration(DurationField::UserEndpointTimeout),
    ),
    directive(LEGACY_BACKEND, Handler::LegacyBackend),
    // login backends
    directive("simple", Handler::Provider(ProviderKind::Backend)),
    directive("osiam", Handler::Provider(ProviderKind::Backend)),
    directive("htpasswd", Handler::Provider(ProviderKind::Backend)),
    directive("httpupstream", Handler::Provider(ProviderKind::Backend)),
    // oauth providers
    directive("github", Handler::Provider(ProviderKind::Oauth)),
    directive("google", Handler::Provider(ProviderKind::Oauth)),
    directive("bitbucket", Handler::Provider(ProviderKind::Oauth)),
    directive("facebook", Handler::Provider(ProviderKind::Oauth)),
    directive("gitlab", Handler::Provider(ProviderKind::Oauth)),
];

/// Canonical spelling of a directive name (`-` becomes `_`).
pub fn canonical_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Find the directive registered under `name`, in either spelling.
pub fn lookup(name: &str) -> Option<&'static Directive> {
    let canonical = canonical_name(name);
    DIRECTIVES.iter().find(|d| d.name == canonical)
}

impl Directive {
    /// Consume the arguments of one directive line into `config`.
    ///
    /// `written` is the name as it appeared in the source and is only used
    /// for error reporting.
    pub fn apply(
        &self,
        written: &str,
        args: &[String],
        line: usize,
        config: &mut LoginConfig,
    ) -> ConfigResult<()> {
        let value = single_argument(written, args, line)?;

        match self.handler {
            Handler::Text(field) => {
                *field.slot(config) = value.to_string();
            }
            Handler::Flag(field) => {
                *field.slot(config) =
                    parse_bool(value).ok_or_else(|| value_error(written, value, "boolean", line))?;
            }
            Handler::Duration(field) => {
                *field.slot(config) = parse_duration(value)
                    .ok_or_else(|| value_error(written, value, "duration", line))?;
            }
            Handler::Count(field) => {
                *field.slot(config) =
                    parse_count(value).ok_or_else(|| value_error(written, value, "integer", line))?;
            }
            Handler::Provider(kind) => {
                let options = parse_provider_options(written, value, line)?;
                let target = match kind {
                    ProviderKind::Backend => &mut config.backends,
                    ProviderKind::Oauth => &mut config.oauth,
                };
                target.insert(self.name.to_string(), options);
            }
            Handler::LegacyBackend => {
                let (provider, options) = split_legacy_backend(written, value, line)?;
                config.backends.insert(provider, options);
            }
        }
        Ok(())
    }
}

fn single_argument<'a>(written: &str, args: &'a [String], line: usize) -> ConfigResult<&'a str> {
    match args {
        [value] => Ok(value.as_str()),
        _ => Err(ConfigError::Arity {
            directive: written.to_string(),
            expected: "exactly one argument",
            args: args.to_vec(),
            line,
        }),
    }
}

fn value_error(directive: &str, value: &str, expected: &'static str, line: usize) -> ConfigError {
    ConfigError::ValueParse {
        directive: directive.to_string(),
        value: value.to_string(),
        expected,
        line,
    }
}

fn parse_provider_options(directive: &str, value: &str, line: usize) -> ConfigResult<OptionSet> {
    parse_options(value).map_err(|err| ConfigError::MalformedOption {
        directive: directive.to_string(),
        segment: err.segment,
        line,
    })
}

/// Split `provider=<name>,k=v,...` into the provider name and its options.
///
/// `provider` must be the first pair and must be followed by at least one
/// option; it is never kept as an option key.
fn split_legacy_backend(
    directive: &str,
    value: &str,
    line: usize,
) -> ConfigResult<(String, OptionSet)> {
    let missing = || ConfigError::MissingProvider {
        directive: directive.to_string(),
        value: value.to_string(),
        line,
    };

    let (head, _) = value.split_once(',').unwrap_or((value, ""));
    let provider = match head.split_once('=') {
        Some(("provider", name)) if !name.is_empty() => name.to_string(),
        Some(_) => return Err(missing()),
        None if !value.contains(',') => return Err(missing()),
        None => {
            return Err(ConfigError::MalformedOption {
                directive: directive.to_string(),
                segment: head.to_string(),
                line,
            })
        }
    };

    let mut options = parse_provider_options(directive, value, line)?;
    options.remove("provider");
    if options.is_empty() {
        return Err(missing());
    }
    Ok((provider, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, args: &[&str], config: &mut LoginConfig) -> ConfigResult<()> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let directive = lookup(name).ok_or_else(|| ConfigError::UnknownDirective {
            name: name.to_string(),
            line: 1,
        })?;
        directive.apply(name, &args, 1, config)
    }

    #[test]
    fn test_names_are_unique_and_canonical() {
        for (i, d) in DIRECTIVES.iter().enumerate() {
            assert!(!d.name.contains('-'), "{} is not canonical", d.name);
            assert!(
                DIRECTIVES[i + 1..].iter().all(|other| other.name != d.name),
                "{} registered twice",
                d.name
            );
        }
    }

    #[test]
    fn test_lookup_accepts_both_spellings() {
        for (canonical, legacy) in [("jwt_secret", "jwt-secret"), ("cookie_name", "cookie-name")] {
            let a = lookup(canonical).unwrap();
            let b = lookup(legacy).unwrap();
            assert_eq!(a.name, b.name);
            assert_eq!(a.handler, b.handler);
        }
        assert!(lookup("unknown").is_none());
    }

    #[test]
    fn test_text_flag_duration_count() {
        let mut config = LoginConfig::default();
        apply("jwt_algo", &["RS256"], &mut config).unwrap();
        apply("cookie_http_only", &["false"], &mut config).unwrap();
        apply("cookie_expiry", &["23h23m"], &mut config).unwrap();
        apply("jwt_refreshes", &["3"], &mut config).unwrap();

        assert_eq!(config.jwt_algo, "RS256");
        assert!(!config.cookie_http_only);
        assert_eq!(config.cookie_expiry, Duration::from_secs(23 * 3600 + 23 * 60));
        assert_eq!(config.jwt_refreshes, 3);
    }

    #[test]
    fn test_arity() {
        let mut config = LoginConfig::default();
        let err = apply("jwt_secret", &[], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::Arity { ref directive, .. } if directive == "jwt_secret"));

        let err = apply("unknown", &["property"], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDirective { .. }));

        let err = apply("cookie_name", &["a", "b"], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::Arity { ref args, .. } if args.len() == 2));
    }

    #[test]
    fn test_value_parse_errors_carry_token() {
        let mut config = LoginConfig::default();
        let err = apply("cookie_http_only", &["42d"], &mut config).unwrap_err();
        match err {
            ConfigError::ValueParse {
                directive,
                value,
                expected,
                ..
            } => {
                assert_eq!(directive, "cookie_http_only");
                assert_eq!(value, "42d");
                assert_eq!(expected, "boolean");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = apply("jwt_expiry", &["42d"], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::ValueParse { expected: "duration", .. }));
    }

    #[test]
    fn test_provider_directives_accumulate() {
        let mut config = LoginConfig::default();
        apply("simple", &["bob=secret"], &mut config).unwrap();
        apply("github", &["client_id=id,client_secret=s"], &mut config).unwrap();
        apply("osiam", &["endpoint=http://localhost:8080"], &mut config).unwrap();

        assert_eq!(config.backends.len(), 2);
        assert_eq!(config.backends["simple"].get("bob"), Some("secret"));
        assert_eq!(config.oauth["github"].get("client_id"), Some("id"));
    }

    #[test]
    fn test_same_provider_overwrites() {
        let mut config = LoginConfig::default();
        apply("simple", &["bob=secret"], &mut config).unwrap();
        apply("simple", &["alice=other"], &mut config).unwrap();
        let expected: OptionSet = [("alice", "other")].into_iter().collect();
        assert_eq!(config.backends["simple"], expected);
    }

    #[test]
    fn test_legacy_backend() {
        let mut config = LoginConfig::default();
        apply("backend", &["provider=simple,bob=secret,alice=pw"], &mut config).unwrap();
        let expected: OptionSet = [("bob", "secret"), ("alice", "pw")].into_iter().collect();
        assert_eq!(config.backends["simple"], expected);
        assert!(config.backends["simple"].get("provider").is_none());
    }

    #[test]
    fn test_legacy_backend_errors() {
        let mut config = LoginConfig::default();

        let err = apply("backend", &[], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::Arity { .. }));

        for value in ["provider=foo", "kk", "bob=secret,provider=simple", "provider=,bob=x"] {
            let err = apply("backend", &[value], &mut config).unwrap_err();
            match err {
                ConfigError::MissingProvider { value: reported, .. } => assert_eq!(reported, value),
                other => panic!("{value}: unexpected error {other:?}"),
            }
        }

        let err = apply("backend", &["kk,bob=secret"], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedOption { ref segment, .. } if segment == "kk"));

        let err = apply("backend", &["provider=simple,kk"], &mut config).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedOption { ref segment, .. } if segment == "kk"));

        assert!(config.backends.is_empty());
    }
}
