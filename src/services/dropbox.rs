use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Cloud storage client used to turn downloaded image folders into
/// embeddable direct links.
pub struct DropboxClient {
    client: Client,
    access_token: String,
    api_base: String,
}

#[derive(Deserialize)]
struct FolderEntry {
    path_display: String,
}

#[derive(Deserialize)]
struct ListFolderResponse {
    entries: Vec<FolderEntry>,
}

#[derive(Deserialize)]
struct SharedLink {
    url: String,
}

#[derive(Deserialize)]
struct ListSharedLinksResponse {
    links: Vec<SharedLink>,
}

impl DropboxClient {
    pub fn new(access_token: String) -> Self {
        DropboxClient {
            client: Client::new(),
            access_token,
            api_base: "https://api.dropboxapi.com/2".to_string(),
        }
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, reqwest::Error> {
        self.client
            .post(format!("{}/{}", self.api_base, endpoint))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn list_folder(&self, path: &str) -> Result<Vec<String>, reqwest::Error> {
        let response: ListFolderResponse = self
            .call("files/list_folder", &json!({ "path": path }))
            .await?;
        Ok(response
            .entries
            .into_iter()
            .map(|entry| entry.path_display)
            .collect())
    }

    async fn existing_shared_link(&self, path: &str) -> Option<String> {
        let result: Result<ListSharedLinksResponse, _> = self
            .call("sharing/list_shared_links", &json!({ "path": path }))
            .await;
        match result {
            Ok(response) => response.links.into_iter().next().map(|link| link.url),
            Err(e) => {
                log::error!("Listing shared links for {} failed: {:?}", path, e);
                None
            }
        }
    }

    async fn create_shared_link(&self, path: &str) -> Result<String, reqwest::Error> {
        let link: SharedLink = self
            .call(
                "sharing/create_shared_link_with_settings",
                &json!({ "path": path }),
            )
            .await?;
        Ok(link.url)
    }

    /// Direct-fetch links for every file in one work row's image folder.
    /// Existing shared links are reused, missing ones created. A file whose
    /// link cannot be resolved is skipped, not fatal.
    pub async fn image_links(&self, image_folder: &str, subfolder: &str) -> Vec<String> {
        let folder_path = format!("{}/{}", image_folder.trim_end_matches('/'), subfolder);
        let entries = match self.list_folder(&folder_path).await {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Listing folder {} failed: {:?}", folder_path, e);
                return vec![];
            }
        };

        let mut links = vec![];
        for path in entries {
            let url = match self.existing_shared_link(&path).await {
                Some(url) => {
                    log::info!("Reusing shared link for {}", path);
                    url
                }
                None => match self.create_shared_link(&path).await {
                    Ok(url) => url,
                    Err(e) => {
                        log::error!("Creating shared link for {} failed: {:?}", path, e);
                        continue;
                    }
                },
            };
            links.push(to_direct_url(&url));
        }

        log::info!("Resolved {} image links under {}", links.len(), folder_path);
        links
    }
}

/// Rewrites a sharing url into a directly fetchable one by swapping the host
/// and dropping the download-page suffix. Applying it twice changes nothing.
pub fn to_direct_url(url: &str) -> String {
    url.replace("www.dropbox.com", "dl.dropboxusercontent.com")
        .replace("?dl=0", "")
}

#[cfg(test)]
mod tests {
    use super::to_direct_url;

    #[test]
    fn rewrites_host_and_strips_suffix() {
        let shared = "https://www.dropbox.com/s/abc123/image_20250301.jpg?dl=0";

        assert_eq!(
            to_direct_url(shared),
            "https://dl.dropboxusercontent.com/s/abc123/image_20250301.jpg"
        );
    }

    #[test]
    fn is_idempotent_on_its_own_output() {
        let shared = "https://www.dropbox.com/s/abc123/image_20250301.jpg?dl=0";
        let direct = to_direct_url(shared);

        assert_eq!(to_direct_url(&direct), direct);
    }

    #[test]
    fn leaves_other_urls_alone() {
        let url = "https://img.example.com/full.jpg";

        assert_eq!(to_direct_url(url), url);
    }
}
