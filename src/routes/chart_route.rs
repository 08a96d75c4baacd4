use std::time::Duration;

use actix_web::{get, web, HttpResponse};

use crate::configuration::Settings;
use crate::services::{chart_scraper, RetryPolicy};

const CHART_FETCH_ATTEMPTS: u8 = 3;
const CHART_FETCH_DELAY: Duration = Duration::from_secs(1);
const CHART_FETCH_JITTER: Duration = Duration::from_secs(2);

#[get("")]
pub async fn weekly_chart(settings: web::Data<Settings>) -> HttpResponse {
    let policy = RetryPolicy::new(CHART_FETCH_ATTEMPTS, CHART_FETCH_DELAY, CHART_FETCH_JITTER);
    let result = chart_scraper::scrape_chart(&policy, &settings.webdriver.url).await;

    HttpResponse::Ok().json(result)
}
