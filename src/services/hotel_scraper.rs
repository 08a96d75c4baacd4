use std::time::Duration;

use chrono::Local;
use itertools::Itertools;
use thirtyfour::By;

use crate::domain::hotel::HotelSummary;

use super::Scout;

const FIELD_MISSING: &str = "N/A";
const SETTLE_DELAY: Duration = Duration::from_secs(5);
const SCROLL_DELAY: Duration = Duration::from_secs(3);
const TOP_FEATURES: usize = 5;
const REVIEW_SNIPPETS: usize = 4;

/// Scrapes one booking-portal listing page. Every field falls back to "N/A"
/// on its own, a single broken selector must not sink the whole row.
pub async fn scrape_listing(scout: &Scout, url: &str) -> Option<HotelSummary> {
    if !scout.goto_with_retry(url).await {
        return None;
    }
    tokio::time::sleep(SETTLE_DELAY).await;

    // Parts of the page only render once scrolled into view.
    if let Err(e) = scout
        .driver
        .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
        .await
    {
        log::error!("Scroll script failed: {:?}", e);
    }
    tokio::time::sleep(SCROLL_DELAY).await;

    let name = text_or_missing(
        scout,
        By::XPath("//h1[@data-selenium='hotel-header-name']"),
    )
    .await;
    let price = text_or_missing(
        scout,
        By::XPath("//div[contains(@class, 'Price')]//span[contains(text(), '₩')]"),
    )
    .await;
    let location = text_or_missing(
        scout,
        By::XPath("//span[@data-selenium='hotel-address-map']"),
    )
    .await;
    let rating = star_rating(scout).await;
    let features = joined_texts(
        scout,
        By::XPath("//div[@data-element-name='property-top-feature']//p"),
        TOP_FEATURES,
    )
    .await;
    let reviews_summary = joined_texts(
        scout,
        By::XPath("//div[@data-element-name='atf-review-snippet-sidebar']//span"),
        REVIEW_SNIPPETS,
    )
    .await;

    log::info!("Scraped listing fields for {}: name={}", url, name);

    Some(HotelSummary {
        updated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        name,
        price,
        location,
        rating,
        features,
        reviews_summary,
    })
}

async fn text_or_missing(scout: &Scout, by: By) -> String {
    match scout.driver.find(by).await {
        Ok(element) => match element.text().await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => FIELD_MISSING.to_string(),
        },
        Err(_) => FIELD_MISSING.to_string(),
    }
}

/// The star rating renders as one svg glyph per star.
async fn star_rating(scout: &Scout) -> String {
    match scout
        .driver
        .find(By::XPath("//div[@data-selenium='mosaic-hotel-rating']"))
        .await
    {
        Ok(container) => match container.find_all(By::Tag("svg")).await {
            Ok(stars) if !stars.is_empty() => format!("{}성급", stars.len()),
            _ => FIELD_MISSING.to_string(),
        },
        Err(_) => FIELD_MISSING.to_string(),
    }
}

async fn joined_texts(scout: &Scout, by: By, take: usize) -> String {
    let elements = match scout.driver.find_all(by).await {
        Ok(elements) => elements,
        Err(_) => return FIELD_MISSING.to_string(),
    };

    let mut texts: Vec<String> = vec![];
    for element in elements.into_iter().take(take) {
        if let Ok(text) = element.text().await {
            let text = text.trim().to_string();
            if !text.is_empty() {
                texts.push(text);
            }
        }
    }

    match texts.is_empty() {
        true => FIELD_MISSING.to_string(),
        false => texts.iter().join(", "),
    }
}
