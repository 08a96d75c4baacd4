use std::path::Path;
use std::time::Duration;

use thirtyfour::error::WebDriverResult;
use thirtyfour::{DesiredCapabilities, WebDriver};

const PAGE_LOAD_ATTEMPTS: u8 = 3;
const PAGE_LOAD_RETRY_DELAY: Duration = Duration::from_secs(60);

/// One webdriver session against the configured chromedriver endpoint.
/// Sessions are opened per job and torn down with `quit`.
pub struct Scout {
    pub driver: WebDriver,
}

impl Scout {
    pub async fn new(webdriver_url: &str) -> WebDriverResult<Self> {
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(webdriver_url, caps).await?;
        driver.maximize_window().await?;
        Ok(Scout { driver })
    }

    /// Page load with a long fixed delay between attempts, the usual failure
    /// here is the network being gone rather than the page.
    pub async fn goto_with_retry(&self, url: &str) -> bool {
        let mut attempt = 1;
        loop {
            match self.driver.goto(url).await {
                Ok(()) => {
                    log::info!("Loaded {}", url);
                    return true;
                }
                Err(e) => {
                    log::error!(
                        "Page load attempt {}/{} failed: {:?}",
                        attempt,
                        PAGE_LOAD_ATTEMPTS,
                        e
                    );
                    if attempt >= PAGE_LOAD_ATTEMPTS {
                        return false;
                    }
                    attempt += 1;
                    tokio::time::sleep(PAGE_LOAD_RETRY_DELAY).await;
                }
            }
        }
    }

    pub async fn screenshot_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                log::error!("Failed to create {}: {:?}", parent.display(), e);
                return;
            }
        }
        match self.driver.screenshot(path).await {
            Ok(()) => log::info!("Saved screenshot to {}", path.display()),
            Err(e) => log::error!("Failed to save screenshot: {:?}", e),
        }
    }

    pub async fn quit(self) {
        if let Err(e) = self.driver.quit().await {
            log::error!("Failed to shut down webdriver session: {:?}", e);
        }
    }
}
