//! Streaming HTTP download to a file.

use crate::error::{FetchError, Result};
use crate::output::{self, ProgressGuard};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

/// Size of the chunks the response body is copied in
const CHUNK_SIZE: usize = 8192;

/// Download `url` to `dest`, returning the number of bytes written.
///
/// Anything but a `200 OK` is a [`FetchError::Download`]; in that case `dest`
/// is never created.
pub fn download(url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    ensure_parent_dir(dest)?;

    let filename = dest
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());

    let pb = output::spinner(&format!("downloading {}", filename));
    let _guard = ProgressGuard::new(&pb);

    let response = ureq::get(url)
        .timeout(timeout)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Download {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Request {
                url: url.to_string(),
                message: t.to_string(),
            },
        })?;

    if response.status() != 200 {
        return Err(FetchError::Download {
            url: url.to_string(),
            status: response.status(),
        });
    }

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        output::upgrade_to_bytes(&pb, len);
    }

    let mut file = std::fs::File::create(dest)?;
    let mut reader = response.into_reader();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: format!("read error: {}", e),
        })?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }

    file.flush()?;
    output::detail(&format!("downloaded {} ({} bytes)", filename, total_bytes));
    Ok(total_bytes)
}

/// Create a file's parent directory (and all ancestors) if missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_parent_dir_creates_ancestors() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a/b/c/engine.zip");

        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
        assert!(!file.exists());
    }

    #[test]
    fn test_ensure_parent_dir_bare_filename() {
        ensure_parent_dir(Path::new("engine.zip")).unwrap();
    }

    #[test]
    fn test_invalid_url_is_request_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("engine.zip");

        let err = download("not-a-valid-url", &dest, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
        assert!(!dest.exists());
    }

    mod mock_tests {
        use super::*;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test(flavor = "multi_thread")]
        async fn test_download_writes_body() {
            let mock_server = MockServer::start().await;
            let body = vec![7u8; CHUNK_SIZE * 3 + 11];

            Mock::given(method("GET"))
                .and(path("/engine.zip"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
                .mount(&mock_server)
                .await;

            let dir = TempDir::new().unwrap();
            let dest = dir.path().join("out/engine.zip");
            let url = format!("{}/engine.zip", mock_server.uri());

            let written = download(&url, &dest, Duration::from_secs(30)).unwrap();
            assert_eq!(written, body.len() as u64);
            assert_eq!(std::fs::read(&dest).unwrap(), body);
        }

        #[tokio::test(flavor = "multi_thread")]
        async fn test_download_404_writes_nothing() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/missing.zip"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&mock_server)
                .await;

            let dir = TempDir::new().unwrap();
            let dest = dir.path().join("engine.zip");
            let url = format!("{}/missing.zip", mock_server.uri());

            let err = download(&url, &dest, Duration::from_secs(30)).unwrap_err();
            match err {
                FetchError::Download { status, url: failed } => {
                    assert_eq!(status, 404);
                    assert_eq!(failed, url);
                }
                other => panic!("expected download error, got {other:?}"),
            }
            assert!(!dest.exists());
        }

        #[tokio::test(flavor = "multi_thread")]
        async fn test_download_non_200_success_rejected() {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/empty.zip"))
                .respond_with(ResponseTemplate::new(204))
                .mount(&mock_server)
                .await;

            let dir = TempDir::new().unwrap();
            let dest = dir.path().join("engine.zip");
            let url = format!("{}/empty.zip", mock_server.uri());

            let err = download(&url, &dest, Duration::from_secs(30)).unwrap_err();
            assert!(matches!(err, FetchError::Download { status: 204, .. }));
            assert!(!dest.exists());
        }
    }
}
