//! Login middleware construction.

use std::path::Path;
use std::sync::Arc;

use crate::config::dispenser::DirectiveLine;
use crate::config::error::ConfigResult;
use crate::config::loader::compile_site;
use crate::config::schema::LoginConfig;
use crate::config::builder::build_block;

/// A login middleware instance bound to one compiled configuration.
#[derive(Debug, Clone)]
pub struct LoginHandler {
    config: Arc<LoginConfig>,
}

impl LoginHandler {
    pub fn new(config: Arc<LoginConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoginConfig {
        &self.config
    }

    /// Shared handle to the configuration.
    pub fn shared_config(&self) -> Arc<LoginConfig> {
        Arc::clone(&self.config)
    }
}

/// Compile one parsed login block into a handler.
pub fn setup(block: &DirectiveLine, document_root: Option<&Path>) -> ConfigResult<LoginHandler> {
    let config = build_block(block, document_root)?;
    Ok(LoginHandler::new(Arc::new(config)))
}

/// Compile every login block of a site into independent handlers.
pub fn setup_site(input: &str, document_root: Option<&Path>) -> ConfigResult<Vec<LoginHandler>> {
    Ok(compile_site(input, document_root)?
        .into_iter()
        .map(|config| LoginHandler::new(Arc::new(config)))
        .collect())
}
