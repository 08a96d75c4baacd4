use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one extraction attempt. At most one successful value per call,
/// first success wins.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResult {
    pub extracted_value: Option<String>,
    pub scraped_at: DateTime<Utc>,
    pub success: bool,
    pub error_message: String,
}

impl ScrapeResult {
    pub fn hit(value: String) -> Self {
        ScrapeResult {
            extracted_value: Some(value),
            scraped_at: Utc::now(),
            success: true,
            error_message: String::new(),
        }
    }

    pub fn miss(error_message: impl Into<String>) -> Self {
        ScrapeResult {
            extracted_value: None,
            scraped_at: Utc::now(),
            success: false,
            error_message: error_message.into(),
        }
    }
}
