//! Site file watcher for recompilation on change.
//!
//! The watch is placed on the directory holding the site file, not on the
//! file itself. Editors commonly save by writing a temporary file and
//! renaming it over the original; a watch on the old inode would go silent
//! after the first such save. Events are filtered down to the site file's
//! name, so siblings in the same directory never trigger a recompile.

use std::path::{Path, PathBuf};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_site;
use crate::config::schema::LoginConfig;

/// Watches a site file and sends freshly compiled login configurations.
///
/// Every successful compilation produces new, independent configurations;
/// a failing one is logged and nothing is sent, so receivers keep the last
/// good set.
pub struct SiteWatcher {
    path: PathBuf,
    document_root: Option<PathBuf>,
    update_tx: mpsc::UnboundedSender<Vec<LoginConfig>>,
}

impl SiteWatcher {
    /// Create a watcher for `path` and the receiver its recompiled sets
    /// arrive on.
    pub fn new(
        path: &Path,
        document_root: Option<&Path>,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<LoginConfig>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            document_root: document_root.map(Path::to_path_buf),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. The watch lasts as long as the returned handle.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let Self {
            path,
            document_root,
            update_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if touches(&event, &path) => {
                recompile(&path, document_root.as_deref(), &update_tx);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Site watch error"),
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(file = %watched.display(), dir = %dir.display(), "Watching site file");
        Ok(watcher)
    }
}

/// Whether `event` writes, creates or renames onto the site file.
fn touches(event: &Event, path: &Path) -> bool {
    let kind = &event.kind;
    (kind.is_modify() || kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == path.file_name())
}

fn recompile(
    path: &Path,
    document_root: Option<&Path>,
    update_tx: &mpsc::UnboundedSender<Vec<LoginConfig>>,
) {
    match load_site(path, document_root) {
        Ok(configs) => {
            tracing::debug!(file = %path.display(), blocks = configs.len(), "Site file recompiled");
            if update_tx.send(configs).is_err() {
                tracing::debug!("Site update receiver dropped");
            }
        }
        Err(e) => {
            tracing::warn!(
                file = %path.display(),
                error = %e,
                "Site file change rejected, keeping last good configuration"
            );
        }
    }
}
