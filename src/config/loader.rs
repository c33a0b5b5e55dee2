//! Site file loading.
//!
//! A site file holds the directives of every plugin of a site. This loader
//! compiles each `login`/`loginsrv` block it finds, in order, and tracks the
//! top-level `root <dir>` directive that sets the document root for the
//! blocks after it. Blocks of other plugins are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::builder::{build_block, BLOCK_NAMES};
use crate::config::dispenser::parse_blocks;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::LoginConfig;

/// Top-level directive setting the document root.
pub const ROOT_DIRECTIVE: &str = "root";

/// Compile every login block in `input`.
///
/// `document_root` is the root in effect until a `root` directive
/// replaces it.
pub fn compile_site(input: &str, document_root: Option<&Path>) -> ConfigResult<Vec<LoginConfig>> {
    let mut root: Option<PathBuf> = document_root.map(Path::to_path_buf);
    let mut configs = Vec::new();

    for block in parse_blocks(input)? {
        if block.name == ROOT_DIRECTIVE {
            if block.block.is_some() {
                return Err(ConfigError::NestedBlock {
                    directive: block.name.clone(),
                    line: block.line,
                });
            }
            match block.args.as_slice() {
                [dir] => root = Some(PathBuf::from(dir)),
                _ => {
                    return Err(ConfigError::Arity {
                        directive: block.name.clone(),
                        expected: "exactly one argument",
                        args: block.args.clone(),
                        line: block.line,
                    })
                }
            }
            continue;
        }

        if !BLOCK_NAMES.contains(&block.name.as_str()) {
            tracing::debug!(directive = %block.name, line = block.line, "Skipping directive of another plugin");
            continue;
        }

        configs.push(build_block(&block, root.as_deref())?);
    }

    Ok(configs)
}

/// Read and compile a site file.
pub fn load_site(path: &Path, document_root: Option<&Path>) -> ConfigResult<Vec<LoginConfig>> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    compile_site(&content, document_root)
}
