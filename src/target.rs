//! Target platforms and their engine artifacts.

use crate::config::Settings;
use crate::error::{FetchError, Result};
use std::fmt;
use std::str::FromStr;

/// Supported Flutter engine targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Windows,
    Linux,
    MacOs,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Windows, Target::Linux, Target::MacOs];

    /// Determine the target from the `TARGET` setting.
    ///
    /// Matches `windows`, `linux` and `apple` case-insensitively as substrings,
    /// in that order.
    pub fn current(settings: &Settings) -> Result<Self> {
        let value = settings
            .target
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                FetchError::UnknownTarget("TARGET environment variable is not set".to_string())
            })?;

        Self::detect(value)
            .ok_or_else(|| FetchError::UnknownTarget(format!("unknown target: {}", value)))
    }

    fn detect(value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        if value.contains("windows") {
            Some(Target::Windows)
        } else if value.contains("linux") {
            Some(Target::Linux)
        } else if value.contains("apple") {
            Some(Target::MacOs)
        } else {
            None
        }
    }

    /// Path of the artifact below `flutter_infra/flutter/<version>/`.
    pub fn artifact_path(&self) -> &'static str {
        match self {
            Target::Windows => "windows-x64/windows-x64-embedder.zip",
            Target::Linux => "linux-x64/linux-x64-embedder",
            Target::MacOs => "darwin-x64/FlutterEmbedder.framework.zip",
        }
    }

    /// Download URL of the engine archive for `version`.
    pub fn download_url(&self, base_url: &str, version: &str) -> String {
        format!(
            "{}/flutter_infra/flutter/{}/{}",
            base_url.trim_end_matches('/'),
            version,
            self.artifact_path()
        )
    }

    /// File (or bundle) name of the engine library.
    pub fn library_name(&self) -> &'static str {
        match self {
            Target::Windows => "flutter_engine.dll",
            Target::Linux => "libflutter_engine.so",
            Target::MacOs => "FlutterEmbedder.framework",
        }
    }

    /// Whether the downloaded archive contains the library as another zip.
    pub fn is_nested_archive(&self) -> bool {
        match self {
            Target::Windows | Target::Linux => false,
            Target::MacOs => true,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Windows => "windows",
            Target::Linux => "linux",
            Target::MacOs => "macos",
        };
        f.write_str(name)
    }
}

impl FromStr for Target {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("macos") {
            return Ok(Target::MacOs);
        }
        Self::detect(s).ok_or_else(|| FetchError::UnknownTarget(format!("unknown target: {}", s)))
    }
}
