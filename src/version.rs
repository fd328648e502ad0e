//! Engine version resolution.
//!
//! There are three ways to find the version. The first one that produces a
//! value wins:
//!
//! 1. `FLUTTER_ENGINE_VERSION`, returned verbatim.
//! 2. `FLUTTER_ROOT`, whose `bin/internal/engine.version` is read and trimmed.
//!    A missing or unreadable file is an error here; resolution stops.
//! 3. An [`SdkProbe`] (by default `which flutter` / `where.exe flutter`), whose
//!    SDK root is read the same way as in step 2.

use crate::config::Settings;
use crate::error::{FetchError, Result};
use crate::probe::SdkProbe;
use std::path::{Path, PathBuf};

/// A single resolution step. `Ok(None)` passes control to the next step.
type Strategy = fn(&Settings, &dyn SdkProbe) -> Result<Option<String>>;

const STRATEGIES: &[Strategy] = &[from_override, from_flutter_root, from_probe];

/// Resolve the engine version.
pub fn resolve(settings: &Settings, probe: &dyn SdkProbe) -> Result<String> {
    for strategy in STRATEGIES {
        if let Some(version) = strategy(settings, probe)? {
            return Ok(version);
        }
    }

    Err(FetchError::version_not_found("no version source available"))
}

/// Location of the version file inside an SDK.
pub fn version_file(sdk_root: &Path) -> PathBuf {
    sdk_root.join("bin").join("internal").join("engine.version")
}

/// Read `<sdk_root>/bin/internal/engine.version`, trimmed.
pub fn read_version_from_sdk(sdk_root: &Path) -> Result<String> {
    let path = version_file(sdk_root);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        FetchError::version_not_found(format!("cannot read {}: {}", path.display(), e))
    })?;

    let version = content.trim();
    if version.is_empty() {
        return Err(FetchError::version_not_found(format!(
            "{} is empty",
            path.display()
        )));
    }

    Ok(version.to_string())
}

fn from_override(settings: &Settings, _probe: &dyn SdkProbe) -> Result<Option<String>> {
    Ok(settings
        .engine_version
        .as_ref()
        .filter(|v| !v.is_empty())
        .cloned())
}

fn from_flutter_root(settings: &Settings, _probe: &dyn SdkProbe) -> Result<Option<String>> {
    match &settings.flutter_root {
        Some(root) => read_version_from_sdk(root).map(Some),
        None => Ok(None),
    }
}

fn from_probe(_settings: &Settings, probe: &dyn SdkProbe) -> Result<Option<String>> {
    let root = probe.sdk_root()?;
    read_version_from_sdk(&root).map(Some)
}
