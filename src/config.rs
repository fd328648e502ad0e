//! Settings resolved from the process environment.
//!
//! The environment is read in exactly one place, [`Settings::from_env`]. Everything
//! else takes a `&Settings`, so tests build one with [`Settings::from_lookup`]
//! instead of mutating process state.

use std::path::PathBuf;
use std::time::Duration;

/// Explicit engine version override.
pub const ENGINE_VERSION_VAR: &str = "FLUTTER_ENGINE_VERSION";

/// Root of an installed Flutter SDK.
pub const FLUTTER_ROOT_VAR: &str = "FLUTTER_ROOT";

/// Override for the artifact storage origin.
pub const STORAGE_BASE_URL_VAR: &str = "FLUTTER_STORAGE_BASE_URL";

/// Free-form target triple, matched for platform tokens.
pub const TARGET_VAR: &str = "TARGET";

/// Download timeout in seconds.
pub const HTTP_TIMEOUT_VAR: &str = "FLUTTER_ENGINE_HTTP_TIMEOUT";

/// Default artifact storage origin
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.googleapis.com";

/// Default download timeout in seconds
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Default timeout for the `which`/`where.exe` probe in seconds
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Value of `FLUTTER_ENGINE_VERSION`, if set.
    pub engine_version: Option<String>,
    /// Value of `FLUTTER_ROOT`, if set.
    pub flutter_root: Option<PathBuf>,
    /// Storage origin without a trailing slash.
    pub storage_base_url: String,
    /// Value of `TARGET`, if set.
    pub target: Option<String>,
    /// Timeout applied to the artifact download.
    pub http_timeout: Duration,
    /// Timeout applied to the SDK probe subprocess.
    pub probe_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine_version: None,
            flutter_root: None,
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            target: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            engine_version: get(ENGINE_VERSION_VAR),
            flutter_root: get(FLUTTER_ROOT_VAR).map(PathBuf::from),
            storage_base_url: get(STORAGE_BASE_URL_VAR)
                .map(|url| normalize_base_url(&url))
                .unwrap_or(defaults.storage_base_url),
            target: get(TARGET_VAR),
            http_timeout: get(HTTP_TIMEOUT_VAR)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(clamp_http_timeout)
                .unwrap_or(defaults.http_timeout),
            probe_timeout: defaults.probe_timeout,
        }
    }

    pub fn with_engine_version(mut self, version: impl Into<String>) -> Self {
        self.engine_version = Some(version.into());
        self
    }

    pub fn with_flutter_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.flutter_root = Some(root.into());
        self
    }

    pub fn with_storage_base_url(mut self, url: &str) -> Self {
        self.storage_base_url = normalize_base_url(url);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_http_timeout(mut self, secs: u64) -> Self {
        self.http_timeout = clamp_http_timeout(secs);
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// Clamp to a sane range (5s - 1h)
fn clamp_http_timeout(secs: u64) -> Duration {
    Duration::from_secs(secs.clamp(5, 3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.storage_base_url, "https://storage.googleapis.com");
        assert_eq!(settings.http_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = Settings::from_lookup(lookup(&[
            (ENGINE_VERSION_VAR, "abc123"),
            (FLUTTER_ROOT_VAR, "/opt/flutter"),
            (STORAGE_BASE_URL_VAR, "https://mirror.example.com"),
            (TARGET_VAR, "x86_64-unknown-linux-gnu"),
            (HTTP_TIMEOUT_VAR, "60"),
        ]));

        assert_eq!(settings.engine_version.as_deref(), Some("abc123"));
        assert_eq!(settings.flutter_root, Some(PathBuf::from("/opt/flutter")));
        assert_eq!(settings.storage_base_url, "https://mirror.example.com");
        assert_eq!(settings.target.as_deref(), Some("x86_64-unknown-linux-gnu"));
        assert_eq!(settings.http_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let settings = Settings::from_lookup(lookup(&[
            (ENGINE_VERSION_VAR, ""),
            (FLUTTER_ROOT_VAR, ""),
            (STORAGE_BASE_URL_VAR, ""),
            (TARGET_VAR, ""),
        ]));

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let settings =
            Settings::from_lookup(lookup(&[(STORAGE_BASE_URL_VAR, "https://mirror.cn/")]));
        assert_eq!(settings.storage_base_url, "https://mirror.cn");

        let settings = Settings::default().with_storage_base_url("http://127.0.0.1:8080//");
        assert_eq!(settings.storage_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_http_timeout_clamped() {
        let low = Settings::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "1")]));
        assert_eq!(low.http_timeout, Duration::from_secs(5));

        let high = Settings::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "999999")]));
        assert_eq!(high.http_timeout, Duration::from_secs(3600));
    }

    #[test]
    fn test_http_timeout_garbage_uses_default() {
        let settings = Settings::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "soon")]));
        assert_eq!(settings.http_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_engine_version_is_not_trimmed() {
        let settings = Settings::from_lookup(lookup(&[(ENGINE_VERSION_VAR, " abc ")]));
        assert_eq!(settings.engine_version.as_deref(), Some(" abc "));
    }
}
