use std::time::Duration;

use crate::configuration::Settings;
use crate::dal::hotel_db;

use super::{hotel_scraper, Scout, SheetsClient};

const POLL_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Background poller for the listing ledger: every tick claims at most one
/// pending row, scrapes it and writes the summary back. Nothing is escalated,
/// a failed tick is logged and the row stays pending for the next one.
pub async fn listing_watch_handler(settings: Settings) {
    log::info!("Started listing watcher");

    let sheets = SheetsClient::new(
        settings.api_keys.sheets.clone(),
        settings.spreadsheet.id.clone(),
    );
    let mut interval = tokio::time::interval(POLL_INTERVAL);

    loop {
        interval.tick().await;

        match scrape_next_listing(&sheets, &settings).await {
            Ok(true) => {}
            Ok(false) => log::info!("No listing row scraped this tick"),
            Err(e) => log::error!("Listing watcher tick failed: {:?}", e),
        }
    }
}

/// One queue step: claim, scrape, record. Ok(false) when there was nothing
/// to do or the scrape came back empty.
pub async fn scrape_next_listing(
    sheets: &SheetsClient,
    settings: &Settings,
) -> anyhow::Result<bool> {
    let tab = &settings.spreadsheet.hotel_tab;

    let Some(work) = hotel_db::next_listing_row(sheets, tab).await? else {
        return Ok(false);
    };
    log::info!("Scraping listing row {}: {}", work.row, work.input);

    let scout = Scout::new(&settings.webdriver.url).await?;
    let summary = hotel_scraper::scrape_listing(&scout, &work.input).await;
    scout.quit().await;

    match summary {
        Some(summary) => {
            hotel_db::save_summary(sheets, tab, work.row, summary).await?;
            log::info!("Saved listing summary for row {}", work.row);
            Ok(true)
        }
        None => {
            log::error!("Listing scrape failed for row {}", work.row);
            Ok(false)
        }
    }
}
