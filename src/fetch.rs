//! Download-and-extract orchestration.

use crate::config::Settings;
use crate::download;
use crate::error::Result;
use crate::extract;
use crate::output;
use crate::probe::{CommandProbe, SdkProbe};
use crate::target::Target;
use crate::version;
use std::path::{Path, PathBuf};

/// What a completed download left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineArtifact {
    pub target: Target,
    pub version: String,
    pub url: String,
    /// The downloaded archive
    pub archive: PathBuf,
    /// Directory the archive was extracted into
    pub dir: PathBuf,
    /// Library file or framework bundle inside `dir`
    pub library: PathBuf,
}

/// Resolves, downloads and extracts the Flutter engine.
pub struct EngineFetcher {
    settings: Settings,
    probe: Box<dyn SdkProbe>,
    target: Option<Target>,
}

impl EngineFetcher {
    pub fn new(settings: Settings) -> Self {
        let probe = CommandProbe::new(settings.probe_timeout);
        Self {
            settings,
            probe: Box::new(probe),
            target: None,
        }
    }

    /// Replace the `which flutter` probe.
    pub fn with_probe(mut self, probe: impl SdkProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Use `target` instead of detecting it from `TARGET`.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resolve_version(&self) -> Result<String> {
        version::resolve(&self.settings, self.probe.as_ref())
    }

    pub fn target(&self) -> Result<Target> {
        match self.target {
            Some(target) => Ok(target),
            None => Target::current(&self.settings),
        }
    }

    pub fn download_url(&self, version: &str) -> Result<String> {
        Ok(self
            .target()?
            .download_url(&self.settings.storage_base_url, version))
    }

    /// Download the engine `version` to `archive` and extract it next to it.
    ///
    /// The macOS archive holds `FlutterEmbedder.framework.zip`, which is
    /// extracted a second time into `FlutterEmbedder.framework/`.
    pub fn download(&self, version: &str, archive: &Path) -> Result<EngineArtifact> {
        let dir = archive
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;

        let target = self.target()?;
        let url = target.download_url(&self.settings.storage_base_url, version);

        output::action(&format!("Downloading Flutter engine {} ({})", version, target));
        output::detail(&url);

        download::download(&url, archive, self.settings.http_timeout)?;
        extract::unzip(archive, &dir)?;

        let library = dir.join(target.library_name());
        if target.is_nested_archive() {
            let nested = dir.join(format!("{}.zip", target.library_name()));
            extract::unzip(&nested, &library)?;
        }

        if !library.exists() {
            output::warning(&format!("{} not found after extraction", library.display()));
        }

        output::success(&format!("Flutter engine ready at {}", dir.display()));

        Ok(EngineArtifact {
            target,
            version: version.to_string(),
            url,
            archive: archive.to_path_buf(),
            dir,
            library,
        })
    }

    /// Resolve the version, then [`download`](Self::download) it.
    pub fn fetch(&self, archive: &Path) -> Result<EngineArtifact> {
        let version = self.resolve_version()?;
        self.download(&version, archive)
    }
}

impl Default for EngineFetcher {
    fn default() -> Self {
        Self::new(Settings::from_env())
    }
}

/// Fetch the engine using settings from the environment.
///
/// Convenience entry point for build scripts.
pub fn fetch_engine(archive: &Path) -> Result<EngineArtifact> {
    EngineFetcher::default().fetch(archive)
}

/// Download a specific `version` using settings from the environment.
pub fn download_engine(version: &str, archive: &Path) -> Result<EngineArtifact> {
    EngineFetcher::default().download(version, archive)
}
