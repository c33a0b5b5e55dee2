//! File reference resolution.
//!
//! `template` is resolved against the site's document root when relative.
//! `redirect_host_file` and `user_file` are kept exactly as written and are
//! opened relative to the process working directory.
// TODO: resolve redirect_host_file against the document root too once
// existing sites relying on working-directory lookups have been migrated.

use std::path::Path;

use crate::config::schema::LoginConfig;

/// Resolve relative file references of `config` against `document_root`.
pub fn resolve_paths(mut config: LoginConfig, document_root: Option<&Path>) -> LoginConfig {
    if let Some(root) = document_root {
        config.template = resolve_against(&config.template, root);
    }
    config
}

fn resolve_against(value: &str, root: &Path) -> String {
    if value.is_empty() || Path::new(value).is_absolute() {
        return value.to_string();
    }
    root.join(value).to_string_lossy().into_owned()
}
