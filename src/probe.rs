//! Locating an installed Flutter SDK through the `PATH`.
//!
//! Used as the last step of version resolution, when neither
//! `FLUTTER_ENGINE_VERSION` nor `FLUTTER_ROOT` is set.

use crate::error::{FetchError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Program that looks up executables on the `PATH`.
#[cfg(windows)]
const LOCATOR: &str = "where.exe";
#[cfg(not(windows))]
const LOCATOR: &str = "which";

/// How often the probe checks whether the locator has exited
const POLL_INTERVAL_MS: u64 = 20;

/// Something that can find the root of a Flutter SDK.
pub trait SdkProbe {
    fn sdk_root(&self) -> Result<PathBuf>;
}

/// Finds the SDK by asking `which` (or `where.exe` on Windows) for an executable.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    locator: String,
    program: String,
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locator: LOCATOR.to_string(),
            program: "flutter".to_string(),
            timeout,
        }
    }

    /// Look up a different executable name.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different lookup command instead of `which`/`where.exe`.
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = locator.into();
        self
    }

    fn failure(&self, detail: impl std::fmt::Display) -> FetchError {
        FetchError::version_not_found(format!("{} {} {}", self.locator, self.program, detail))
    }

    /// Run the locator and return the first path it prints.
    fn locate_executable(&self) -> Result<PathBuf> {
        let mut child = Command::new(&self.locator)
            .arg(&self.program)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FetchError::version_not_found(format!(
                    "failed to execute {}: {}",
                    self.locator, e
                ))
            })?;

        // Drain both pipes while waiting so a chatty child can't block on a full pipe.
        let stdout_reader = child.stdout.take().map(drain);
        let stderr_reader = child.stderr.take().map(drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.failure(format_args!("could not be waited on: {}", e)));
                }
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.failure(format_args!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
        };

        let stdout = self.collect(stdout_reader)?;
        let stderr = self.collect(stderr_reader)?;
        let stdout = String::from_utf8_lossy(&stdout);
        let stderr = String::from_utf8_lossy(&stderr);

        if !status.success() || !stderr.trim().is_empty() {
            return Err(self.failure(format_args!("failed: {}", stderr.trim())));
        }

        first_path(&stdout).ok_or_else(|| self.failure("printed nothing"))
    }

    fn collect(&self, reader: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> Result<Vec<u8>> {
        match reader {
            Some(handle) => handle
                .join()
                .map_err(|_| self.failure("output reader panicked"))?
                .map_err(|e| self.failure(format_args!("output could not be read: {}", e))),
            None => Ok(Vec::new()),
        }
    }
}

fn drain(mut pipe: impl Read + Send + 'static) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

impl SdkProbe for CommandProbe {
    fn sdk_root(&self) -> Result<PathBuf> {
        let executable = self.locate_executable()?;
        // Follow symlinks like /usr/local/bin/flutter -> /opt/flutter/bin/flutter
        let executable = std::fs::canonicalize(&executable).unwrap_or(executable);
        sdk_root_from_executable(&executable).ok_or_else(|| {
            FetchError::version_not_found(format!(
                "cannot derive SDK root from {}",
                executable.display()
            ))
        })
    }
}

fn first_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// `<root>/bin/flutter` -> `<root>`
pub fn sdk_root_from_executable(executable: &Path) -> Option<PathBuf> {
    let dir = executable.parent()?;
    let root = if dir.file_name().is_some_and(|name| name == "bin") {
        dir.parent()?
    } else {
        dir
    };
    // A bare name would make the version file relative to the working directory
    if root.as_os_str().is_empty() {
        None
    } else {
        Some(root.to_path_buf())
    }
}
