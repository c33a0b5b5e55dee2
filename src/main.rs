//! Login directive compiler CLI.
//!
//! ```text
//! proxy-login check Sitefile --root /srv/www   # compile, print JSON
//! proxy-login watch Sitefile --root /srv/www   # recompile on change
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use proxy_login::config::load_site;
use proxy_login::config::watcher::SiteWatcher;
use proxy_login::observability::logging::{init_logging, DEFAULT_FILTER};

#[derive(Parser)]
#[command(name = "proxy-login")]
#[command(about = "Compile login middleware directives from a site file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every login block and print the configurations as JSON
    Check {
        /// Site file to compile
        file: PathBuf,
        /// Document root for relative template paths
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// Recompile the site file whenever it changes
    Watch {
        /// Site file to watch
        file: PathBuf,
        /// Document root for relative template paths
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(DEFAULT_FILTER)?;

    match cli.command {
        Commands::Check { file, root } => {
            let configs = load_site(&file, root.as_deref())?;
            tracing::info!(file = %file.display(), blocks = configs.len(), "Site compiled");
            println!("{}", serde_json::to_string_pretty(&configs)?);
        }
        Commands::Watch { file, root } => {
            let mut current = load_site(&file, root.as_deref())?;
            tracing::info!(file = %file.display(), blocks = current.len(), "Site compiled");

            let (watcher, mut updates) = SiteWatcher::new(&file, root.as_deref());
            // Dropping the handle stops the watch.
            let _handle = watcher.run()?;

            loop {
                tokio::select! {
                    Some(configs) = updates.recv() => {
                        tracing::info!(
                            previous = current.len(),
                            blocks = configs.len(),
                            "Site recompiled"
                        );
                        current = configs;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutting down");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
