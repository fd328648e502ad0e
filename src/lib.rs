//! Fetch prebuilt Flutter engine embedder binaries
//!
//! Resolves which engine version to use, works out the download location for
//! the target platform, downloads the archive and extracts it so a build script
//! can link against the library inside.
//!
//! # Example
//!
//! ```no_run
//! // build.rs
//! use flutter_engine_fetch::{EngineFetcher, Settings};
//! use std::path::PathBuf;
//!
//! let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
//! let fetcher = EngineFetcher::new(Settings::from_env());
//! let artifact = fetcher.fetch(&out_dir.join("engine/engine.zip")).unwrap();
//! println!("cargo:rustc-link-search=native={}", artifact.dir.display());
//! ```
//!
//! # Version Resolution
//!
//! 1. `FLUTTER_ENGINE_VERSION`
//! 2. `<FLUTTER_ROOT>/bin/internal/engine.version`
//! 3. `bin/internal/engine.version` of the SDK found via `which flutter`
//!    (`where.exe flutter` on Windows)
//!
//! # Environment
//!
//! - `FLUTTER_ENGINE_VERSION` - Explicit engine version
//! - `FLUTTER_ROOT` - Flutter SDK root
//! - `FLUTTER_STORAGE_BASE_URL` - Artifact storage origin (default
//!   `https://storage.googleapis.com`)
//! - `TARGET` - Target triple; `windows`, `linux` or `apple` selects the artifact
//! - `FLUTTER_ENGINE_HTTP_TIMEOUT` - Download timeout in seconds

pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod probe;
pub mod target;
pub mod version;

pub use config::Settings;
pub use error::{FetchError, Result};
pub use fetch::{EngineArtifact, EngineFetcher, download_engine, fetch_engine};
pub use probe::{CommandProbe, SdkProbe};
pub use target::Target;
pub use version::{read_version_from_sdk, resolve as resolve_version};
