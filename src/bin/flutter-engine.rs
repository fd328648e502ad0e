//! flutter-engine CLI - fetch prebuilt Flutter engine binaries
//!
//! Usage:
//!   flutter-engine version             Print the resolved engine version
//!   flutter-engine target              Print the detected target
//!   flutter-engine url                 Print the engine download URL
//!   flutter-engine download <output>   Download and extract the engine

use anyhow::Result;
use clap::{Parser, Subcommand};
use flutter_engine_fetch::{EngineFetcher, Settings, Target, output};
use std::path::PathBuf;

// No clap `env` here: `Settings::from_env` owns the environment, where empty
// values count as unset.
#[derive(Parser)]
#[command(name = "flutter-engine")]
#[command(about = "Resolve, download and extract prebuilt Flutter engine binaries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine version (skips SDK lookup)
    #[arg(long, global = true)]
    engine_version: Option<String>,

    /// Flutter SDK root used to read bin/internal/engine.version
    #[arg(long, global = true)]
    flutter_root: Option<PathBuf>,

    /// Target platform (windows, linux, macos, or a target triple)
    #[arg(short, long, global = true)]
    target: Option<String>,

    /// Artifact storage origin
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Download timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved engine version
    Version,

    /// Print the detected target platform
    Target,

    /// Print the download URL of the engine archive
    Url,

    /// Download the engine archive and extract it next to OUTPUT
    Download {
        /// Path of the archive to write
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let fetcher = create_fetcher(&cli);

    match cli.command {
        Commands::Version => {
            println!("{}", fetcher.resolve_version()?);
        }

        Commands::Target => {
            println!("{}", fetcher.target()?);
        }

        Commands::Url => {
            let version = fetcher.resolve_version()?;
            println!("{}", fetcher.download_url(&version)?);
        }

        Commands::Download { output: archive } => {
            let artifact = fetcher.fetch(&archive)?;
            println!("{}", artifact.library.display());
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of the environment.
fn build_settings(cli: &Cli) -> Settings {
    let mut settings = Settings::from_env();

    if let Some(version) = cli.engine_version.as_deref().filter(|v| !v.is_empty()) {
        settings = settings.with_engine_version(version);
    }
    if let Some(root) = cli.flutter_root.as_ref().filter(|r| !r.as_os_str().is_empty()) {
        settings = settings.with_flutter_root(root);
    }
    if let Some(url) = cli.base_url.as_deref().filter(|u| !u.is_empty()) {
        settings = settings.with_storage_base_url(url);
    }
    if let Some(secs) = cli.timeout {
        settings = settings.with_http_timeout(secs);
    }

    settings
}

/// The target is only checked by commands that need it, so `version` works
/// with any `--target`.
fn create_fetcher(cli: &Cli) -> EngineFetcher {
    let mut settings = build_settings(cli);

    match cli.target.as_deref().filter(|t| !t.is_empty()) {
        Some(raw) => match raw.parse::<Target>() {
            Ok(target) => EngineFetcher::new(settings).with_target(target),
            Err(_) => {
                settings = settings.with_target(raw);
                EngineFetcher::new(settings)
            }
        },
        None => EngineFetcher::new(settings),
    }
}
