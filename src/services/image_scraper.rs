use std::path::Path;
use std::time::Duration;

use rand::seq::SliceRandom;
use thirtyfour::By;

use crate::domain::artifact::ImageArtifact;

use super::{downloader, Scout};

const SEARCH_URL_BASE: &str =
    "https://search.naver.com/search.naver?ssc=tab.image.all&where=image&sm=tab_jum";
const TILE_SELECTOR: &str = "div[class*='mod_image_tile'] img";
const VIEWER_SELECTOR: &str = "div[class='image _viewerImageBox'] img";
const RENDER_DELAY: Duration = Duration::from_secs(5);

pub fn build_search_url(query: &str) -> String {
    format!("{}&query={}", SEARCH_URL_BASE, query.trim().replace(' ', "+"))
}

/// Downloads up to `count` images for one search query. Each round reloads
/// the results page, picks a random tile not used before, opens the detail
/// viewer and hands the full-size url to the downloader. Failures skip the
/// round, they never abort the batch.
pub async fn download_search_images(
    scout: &Scout,
    query: &str,
    count: usize,
    save_dir: &Path,
    snapshot_dir: &Path,
) -> Vec<ImageArtifact> {
    let search_url = build_search_url(query);
    log::info!("Image search url: {}", search_url);

    let mut artifacts = vec![];
    let mut used_indices: Vec<usize> = vec![];

    for _ in 0..count {
        if !scout.goto_with_retry(&search_url).await {
            log::error!("Search page would not load, skipping this image");
            continue;
        }
        tokio::time::sleep(RENDER_DELAY).await;
        scout
            .screenshot_to(&snapshot_dir.join("search_page.png"))
            .await;

        let tiles = match scout.driver.find_all(By::Css(TILE_SELECTOR)).await {
            Ok(tiles) if !tiles.is_empty() => tiles,
            Ok(_) => {
                log::error!("No image tiles found for query: {}", query);
                break;
            }
            Err(e) => {
                log::error!("Tile lookup failed: {:?}", e);
                break;
            }
        };

        let available: Vec<usize> =
            (0..tiles.len()).filter(|i| !used_indices.contains(i)).collect();
        let pool = match available.is_empty() {
            true => (0..tiles.len()).collect(),
            false => available,
        };
        let Some(&chosen) = pool.choose(&mut rand::thread_rng()) else {
            break;
        };
        used_indices.push(chosen);
        log::info!("Picked tile {} of {}", chosen + 1, tiles.len());

        match viewer_image_url(scout, chosen, snapshot_dir).await {
            Some(url) => {
                if let Some(artifact) = downloader::download_image(&url, save_dir).await {
                    artifacts.push(artifact);
                }
            }
            None => log::error!("Could not resolve a full-size image url"),
        }
    }

    log::info!("Downloaded {} of {} requested images", artifacts.len(), count);
    artifacts
}

/// Clicks the chosen result tile and reads the full-size url off the detail
/// viewer that opens.
async fn viewer_image_url(scout: &Scout, tile_index: usize, snapshot_dir: &Path) -> Option<String> {
    let tiles = match scout.driver.find_all(By::Css(TILE_SELECTOR)).await {
        Ok(tiles) => tiles,
        Err(e) => {
            log::error!("Tile lookup failed: {:?}", e);
            return None;
        }
    };
    let tile = tiles.get(tile_index)?;

    if let Err(e) = tile.click().await {
        log::error!("Tile click failed: {:?}", e);
        return None;
    }
    tokio::time::sleep(RENDER_DELAY).await;
    scout
        .screenshot_to(&snapshot_dir.join("viewer_page.png"))
        .await;

    let viewer = match scout.driver.find(By::Css(VIEWER_SELECTOR)).await {
        Ok(viewer) => viewer,
        Err(e) => {
            log::error!("Viewer image not found: {:?}", e);
            return None;
        }
    };

    match viewer.attr("src").await {
        Ok(Some(src)) if !src.is_empty() => Some(src),
        Ok(_) => {
            log::error!("Viewer image has no src attribute");
            None
        }
        Err(e) => {
            log::error!("Reading src attribute failed: {:?}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build_search_url;

    #[test]
    fn query_spaces_become_plus_signs() {
        let url = build_search_url("나트랑 레스참호텔");

        assert!(url.ends_with("&query=나트랑+레스참호텔"));
    }

    #[test]
    fn query_is_trimmed_before_building() {
        let url = build_search_url("  Regalia Gold  ");

        assert!(url.ends_with("&query=Regalia+Gold"));
    }

    #[test]
    fn base_url_points_at_the_image_tab() {
        assert!(build_search_url("x").contains("where=image"));
    }
}
