use chrono::Local;

use crate::domain::work_row::{next_pending, WorkRow};
use crate::services::SheetsClient;

// Image ledger: column A holds the search title, column C the downloaded-at
// stamp once the row's images are on disk.
const TITLE_COLUMN: usize = 0;
const DOWNLOADED_AT_COLUMN: usize = 2;
const DOWNLOADED_AT_LETTER: &str = "C";

pub async fn next_image_row(
    sheets: &SheetsClient,
    tab: &str,
) -> Result<Option<WorkRow>, reqwest::Error> {
    let rows = sheets.all_rows(tab).await?;
    Ok(next_pending(&rows, TITLE_COLUMN, DOWNLOADED_AT_COLUMN))
}

pub async fn mark_images_done(
    sheets: &SheetsClient,
    tab: &str,
    row: usize,
) -> Result<(), reqwest::Error> {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    sheets
        .update_cell(tab, DOWNLOADED_AT_LETTER, row, &stamp)
        .await
}
