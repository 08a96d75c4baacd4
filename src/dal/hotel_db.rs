use chrono::Local;

use crate::domain::hotel::{HotelDetails, HotelSummary};
use crate::domain::work_row::{next_pending, WorkRow};
use crate::services::SheetsClient;

// Listing ledger: column E holds the portal url, the scraped summary lands
// in the run of cells starting at F. A non-empty F means the row is done.
const LISTING_URL_COLUMN: usize = 4;
const SUMMARY_STATUS_COLUMN: usize = 5;
const SUMMARY_START_LETTER: &str = "F";

// Post ledger on the same tab: G holds the hotel name, B the posted-at
// stamp, D the live post url.
const HOTEL_NAME_COLUMN: usize = 6;
const POSTED_AT_COLUMN: usize = 1;
const POSTED_AT_LETTER: &str = "B";
const POST_URL_LETTER: &str = "D";

pub async fn next_listing_row(
    sheets: &SheetsClient,
    tab: &str,
) -> Result<Option<WorkRow>, reqwest::Error> {
    let rows = sheets.all_rows(tab).await?;
    Ok(next_pending(&rows, LISTING_URL_COLUMN, SUMMARY_STATUS_COLUMN))
}

pub async fn save_summary(
    sheets: &SheetsClient,
    tab: &str,
    row: usize,
    summary: HotelSummary,
) -> Result<(), reqwest::Error> {
    sheets
        .update_row(tab, SUMMARY_START_LETTER, row, &summary.into_cells())
        .await
}

pub async fn next_post_row(
    sheets: &SheetsClient,
    tab: &str,
) -> Result<Option<WorkRow>, reqwest::Error> {
    let rows = sheets.all_rows(tab).await?;
    Ok(next_pending(&rows, HOTEL_NAME_COLUMN, POSTED_AT_COLUMN))
}

pub async fn hotel_details(
    sheets: &SheetsClient,
    tab: &str,
    row: usize,
) -> Result<Option<HotelDetails>, reqwest::Error> {
    let rows = sheets.all_rows(tab).await?;
    Ok(rows
        .get(row.saturating_sub(1))
        .and_then(|cells| HotelDetails::from_row(cells)))
}

pub async fn mark_posted(
    sheets: &SheetsClient,
    tab: &str,
    row: usize,
    post_url: &str,
) -> Result<(), reqwest::Error> {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    sheets.update_cell(tab, POSTED_AT_LETTER, row, &stamp).await?;
    sheets.update_cell(tab, POST_URL_LETTER, row, post_url).await
}
