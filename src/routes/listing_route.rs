use actix_web::{get, web, HttpResponse};

use crate::configuration::Settings;
use crate::services::{scheduler, SheetsClient};

#[get("")]
pub async fn scrape_listing(
    sheets: web::Data<SheetsClient>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    match scheduler::scrape_next_listing(&sheets, &settings).await {
        Ok(true) => HttpResponse::Ok().body("Listing row scraped"),
        Ok(false) => HttpResponse::Ok().body("Nothing to scrape"),
        Err(e) => HttpResponse::InternalServerError().body(format!("Got error: {:?}", e)),
    }
}
