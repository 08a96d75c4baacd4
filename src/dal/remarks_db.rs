use crate::services::SheetsClient;

/// The operator keeps a pool of closing remarks in column A of its own tab.
pub async fn closing_remarks(
    sheets: &SheetsClient,
    tab: &str,
) -> Result<Vec<String>, reqwest::Error> {
    Ok(sheets
        .column(tab, "A")
        .await?
        .into_iter()
        .filter(|remark| !remark.trim().is_empty())
        .collect())
}
