//! # tarjama CLI
//!
//! Command-line interface for the tarjama bilingual site generator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tarjama_core::Language;

#[derive(Parser)]
#[command(name = "tarjama")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "tarjama.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new tarjama project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Build the static site
    Build,

    /// Find the other-language version of a page on the deployed site
    Switch {
        /// Site-relative path of the current page (e.g. /en/hello/)
        #[arg(long)]
        path: String,

        /// Target language (defaults to the opposite of the current one)
        #[arg(long)]
        to: Option<Language>,

        /// Site origin to probe (defaults to switch.site_url or site.url)
        #[arg(long, env = "TARJAMA_SITE_URL")]
        site: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build => commands::build_site(&cli.config),
        Commands::Switch { path, to, site } => {
            commands::switch_language(&cli.config, commands::SwitchOptions { path, to, site })
                .await
        }
    }
}
