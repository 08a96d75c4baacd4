use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fake_user_agent::get_rua;

use crate::domain::artifact::ImageArtifact;

const MAX_DOWNLOAD_ATTEMPTS: u8 = 3;
// Connection-class failures tend to mean the network is gone for a while.
const CONNECT_ERROR_DELAY: Duration = Duration::from_secs(60);
const TRANSIENT_ERROR_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

struct DownloadFailure {
    connection_error: bool,
    message: String,
}

impl DownloadFailure {
    fn other(message: String) -> Self {
        DownloadFailure {
            connection_error: false,
            message,
        }
    }
}

/// Fetches image bytes and writes them under `save_dir`, retrying on any
/// failure including an empty or unrecognizable payload. None once the
/// attempt budget is spent.
pub async fn download_image(url: &str, save_dir: &Path) -> Option<ImageArtifact> {
    if let Err(e) = tokio::fs::create_dir_all(save_dir).await {
        log::error!("Failed to create {}: {:?}", save_dir.display(), e);
        return None;
    }

    let mut attempt = 1;
    loop {
        match try_download(url, save_dir).await {
            Ok(artifact) => {
                log::info!("Image downloaded: {}", artifact.path.display());
                return Some(artifact);
            }
            Err(failure) => {
                log::error!("Download attempt {} failed: {}", attempt, failure.message);
                if attempt >= MAX_DOWNLOAD_ATTEMPTS {
                    log::error!(
                        "Image download failed after {} attempts: {}",
                        MAX_DOWNLOAD_ATTEMPTS,
                        url
                    );
                    return None;
                }
                attempt += 1;
                let delay = match failure.connection_error {
                    true => CONNECT_ERROR_DELAY,
                    false => TRANSIENT_ERROR_DELAY,
                };
                tokio::time::sleep(delay).await;
            }
        }
    }
}

async fn try_download(url: &str, save_dir: &Path) -> Result<ImageArtifact, DownloadFailure> {
    let client = reqwest::Client::builder()
        .user_agent(get_rua())
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap();

    let response = client.get(url).send().await.map_err(|e| DownloadFailure {
        connection_error: e.is_connect(),
        message: format!("No response from reqwest, error: {:?}", e),
    })?;

    if !response.status().is_success() {
        return Err(DownloadFailure::other(format!(
            "HTTP status {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| DownloadFailure::other(format!("Failed to read bytes, error: {:?}", e)))?;

    validate_image_bytes(&bytes).map_err(DownloadFailure::other)?;

    let saved_at = Utc::now();
    let path = save_dir.join(timestamped_filename(saved_at));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| DownloadFailure::other(format!("Failed to write file, error: {:?}", e)))?;

    Ok(ImageArtifact {
        path,
        source_url: url.to_string(),
        saved_at,
    })
}

/// Empty bodies and bodies without a known image signature are rejected so a
/// blocked or truncated response never lands in the ledger folder.
pub fn validate_image_bytes(bytes: &[u8]) -> Result<(), String> {
    if bytes.is_empty() {
        return Err("downloaded file is empty".to_string());
    }

    let recognized = bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"\x89PNG\r\n\x1a\n")
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || (bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP");

    match recognized {
        true => Ok(()),
        false => Err("payload does not look like an image".to_string()),
    }
}

fn timestamped_filename(at: DateTime<Utc>) -> String {
    format!("image_{}.jpg", at.format("%Y%m%d_%H%M%S%3f"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{timestamped_filename, validate_image_bytes};

    #[test]
    fn empty_payload_is_rejected() {
        assert!(validate_image_bytes(&[]).is_err());
    }

    #[test]
    fn html_error_page_is_rejected() {
        assert!(validate_image_bytes(b"<html><body>blocked</body></html>").is_err());
    }

    #[test]
    fn jpeg_and_png_signatures_pass() {
        assert!(validate_image_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).is_ok());
        assert!(validate_image_bytes(b"\x89PNG\r\n\x1a\n0000").is_ok());
    }

    #[test]
    fn webp_needs_both_riff_and_webp_markers() {
        assert!(validate_image_bytes(b"RIFF1234WEBPVP8 ").is_ok());
        assert!(validate_image_bytes(b"RIFF1234WAVEfmt ").is_err());
    }

    #[test]
    fn filename_carries_the_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 15).unwrap();

        assert_eq!(timestamped_filename(at), "image_20250301_093015000.jpg");
    }
}
