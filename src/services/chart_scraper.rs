use std::time::Duration;

use scraper::Html;

use crate::domain::scrape_result::ScrapeResult;

use super::extractor::{extract_first, ExtractRule, TargetValue};
use super::fetcher::{fetch_html, PageFetchResult};
use super::{RetryPolicy, Scout};

const CHART_URL: &str =
    "https://search.naver.com/search.naver?where=nexearch&sm=tab_etc&qvt=0&query=넷플릭스+주간+순위";
const KOREA_MARKER: &str = "한국";
const RENDER_DELAY: Duration = Duration::from_secs(3);

fn chart_rule() -> ExtractRule {
    ExtractRule {
        marker_selector: "span.info_txt".to_string(),
        marker_text: KOREA_MARKER.to_string(),
        ancestor_tag: "li".to_string(),
        ancestor_class: "info_box".to_string(),
        descent: vec!["strong.title".to_string(), "a".to_string()],
        target: TargetValue::Text,
    }
}

/// Pulls the first Korean entry off the weekly streaming chart. Static fetch
/// first, webdriver as the backup when the static page comes back without
/// the chart markup.
pub async fn scrape_chart(policy: &RetryPolicy, webdriver_url: &str) -> ScrapeResult {
    let primary = scrape_with_requests(policy).await;
    if primary.success {
        return primary;
    }

    log::info!(
        "Static scrape failed, switching to webdriver backup: {}",
        primary.error_message
    );
    scrape_with_webdriver(webdriver_url).await
}

async fn scrape_with_requests(policy: &RetryPolicy) -> ScrapeResult {
    match fetch_html(CHART_URL, policy).await {
        PageFetchResult::Failed { error_message } => ScrapeResult::miss(error_message),
        PageFetchResult::Html(html) => extract_title(&html),
    }
}

async fn scrape_with_webdriver(webdriver_url: &str) -> ScrapeResult {
    let scout = match Scout::new(webdriver_url).await {
        Ok(scout) => scout,
        Err(e) => return ScrapeResult::miss(format!("webdriver session failed: {:?}", e)),
    };

    let result = match scout.goto_with_retry(CHART_URL).await {
        false => ScrapeResult::miss("chart page would not load in the browser"),
        true => {
            tokio::time::sleep(RENDER_DELAY).await;
            match scout.driver.source().await {
                Ok(html) => extract_title(&html),
                Err(e) => ScrapeResult::miss(format!("failed to read page source: {:?}", e)),
            }
        }
    };

    scout.quit().await;
    result
}

fn extract_title(html: &str) -> ScrapeResult {
    let document = Html::parse_document(html);
    match extract_first(&document, &chart_rule()) {
        Some(title) => {
            log::info!("Chart entry found: {}", title);
            ScrapeResult::hit(title)
        }
        None => ScrapeResult::miss(format!(
            "no chart entry tagged {} found on the page",
            KOREA_MARKER
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::extract_title;

    #[test]
    fn finds_the_korean_entry_on_a_fixture_page() {
        let page = r#"
            <ul>
                <li class="info_box">
                    <span class="info_txt">미국 · 시리즈</span>
                    <strong class="title"><a href="/t/1">Stranger Days</a></strong>
                </li>
                <li class="info_box">
                    <span class="info_txt">한국 · 시리즈</span>
                    <strong class="title"><a href="/t/2">폭싹 속았수다</a></strong>
                </li>
            </ul>
        "#;

        let result = extract_title(page);

        assert!(result.success);
        assert_eq!(result.extracted_value.as_deref(), Some("폭싹 속았수다"));
    }

    #[test]
    fn reports_a_miss_when_no_entry_matches() {
        let page = r#"
            <ul>
                <li class="info_box">
                    <span class="info_txt">미국 · 시리즈</span>
                    <strong class="title"><a href="/t/1">Stranger Days</a></strong>
                </li>
            </ul>
        "#;

        let result = extract_title(page);

        assert!(!result.success);
        assert!(result.extracted_value.is_none());
        assert!(!result.error_message.is_empty());
    }
}
