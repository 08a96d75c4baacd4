use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use fake_user_agent::get_rua;

use super::RetryPolicy;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub enum PageFetchResult {
    Html(String),
    Failed { error_message: String },
}

/// HTTP GET with a freshly rotated user agent per attempt. Non-2xx statuses
/// and transport errors both count as failed attempts; after the budget is
/// spent the last error message is returned.
pub async fn fetch_html(url: &str, policy: &RetryPolicy) -> PageFetchResult {
    let result = policy
        .run(|attempt| {
            let url = url.to_string();
            async move {
                let user_agent = get_rua();
                log::info!("Fetch attempt {} for {} as {}", attempt, url, user_agent);

                let client = reqwest::Client::builder()
                    .user_agent(user_agent)
                    .timeout(REQUEST_TIMEOUT)
                    .build()
                    .unwrap();

                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| format!("No response from reqwest, error: {:?}", e))?;

                match response.status().is_success() {
                    false => Err(format!("HTTP status {}", response.status())),
                    true => response
                        .text()
                        .await
                        .map_err(|e| format!("Failed to read response body, error: {:?}", e)),
                }
            }
        })
        .await;

    match result {
        Ok(html) => PageFetchResult::Html(html),
        Err(error_message) => {
            log::error!(
                "Giving up on {} after {} attempts: {}",
                url,
                policy.max_attempts(),
                error_message
            );
            PageFetchResult::Failed { error_message }
        }
    }
}

/// Dumps the raw response body of a page to a file, for selector debugging.
pub async fn save_html_snapshot(
    url: &str,
    path: &Path,
    policy: &RetryPolicy,
) -> anyhow::Result<PathBuf> {
    let html = match fetch_html(url, policy).await {
        PageFetchResult::Html(html) => html,
        PageFetchResult::Failed { error_message } => {
            anyhow::bail!("failed to fetch {}: {}", url, error_message)
        }
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, &html)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("Saved response html to {}", path.display());
    Ok(path.to_path_buf())
}
