use reqwest::Client;
use serde::Deserialize;

/// Spreadsheet values api client. Tabs are addressed by name, cells in A1
/// notation with 1-based rows. The sheet doubles as work queue and
/// completion ledger, so this is the only persistence in the whole service.
pub struct SheetsClient {
    client: Client,
    token: String,
    spreadsheet_id: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(token: String, spreadsheet_id: String) -> Self {
        SheetsClient {
            client: Client::new(),
            token,
            spreadsheet_id,
            base_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
        }
    }

    /// Every row of a tab as a ragged table. Trailing empty cells and rows
    /// are omitted by the api.
    pub async fn all_rows(&self, tab: &str) -> Result<Vec<Vec<String>>, reqwest::Error> {
        let url = format!("{}/{}/values/{}", self.base_url, self.spreadsheet_id, tab);
        let range: ValueRange = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(range.values)
    }

    /// One column top to bottom, e.g. column("후반멘트", "A").
    pub async fn column(&self, tab: &str, column: &str) -> Result<Vec<String>, reqwest::Error> {
        let url = format!(
            "{}/{}/values/{}!{}:{}",
            self.base_url, self.spreadsheet_id, tab, column, column
        );
        let range: ValueRange = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(range
            .values
            .into_iter()
            .map(|mut row| match row.is_empty() {
                true => String::new(),
                false => row.remove(0),
            })
            .collect())
    }

    /// Writes one cell, e.g. update_cell("베트남호텔", "C", 4, ...).
    pub async fn update_cell(
        &self,
        tab: &str,
        column: &str,
        row: usize,
        value: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!(
            "{}/{}/values/{}!{}{}?valueInputOption=RAW",
            self.base_url, self.spreadsheet_id, tab, column, row
        );
        let body = serde_json::json!({ "values": [[value]] });
        self.client
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Writes a horizontal run of cells starting at the given column.
    pub async fn update_row(
        &self,
        tab: &str,
        start_column: &str,
        row: usize,
        values: &[String],
    ) -> Result<(), reqwest::Error> {
        let url = format!(
            "{}/{}/values/{}!{}{}?valueInputOption=RAW",
            self.base_url, self.spreadsheet_id, tab, start_column, row
        );
        let body = serde_json::json!({ "values": [values] });
        self.client
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
