use std::path::Path;

use actix_web::{get, web, HttpResponse};

use crate::configuration::Settings;
use crate::dal::queue_db;
use crate::services::{image_scraper, Scout, SheetsClient};

const IMAGES_PER_ROW: usize = 4;

#[get("")]
pub async fn download_images(
    sheets: web::Data<SheetsClient>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    /*
    1. Claim the first ledger row with a title and no downloaded-at stamp
    2. Load the image search page for that title
    3. Download a handful of images into a folder named after the row
    4. Stamp the row
    */
    let tab = &settings.spreadsheet.hotel_tab;

    let work = match queue_db::next_image_row(&sheets, tab).await {
        Ok(Some(work)) => work,
        Ok(None) => return HttpResponse::Ok().body("No pending image rows"),
        Err(e) => {
            return HttpResponse::InternalServerError()
                .body(format!("Ledger read failed: {:?}", e))
        }
    };
    log::info!("Downloading images for row {}: {}", work.row, work.input);

    let scout = match Scout::new(&settings.webdriver.url).await {
        Ok(scout) => scout,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .body(format!("Webdriver session failed: {:?}", e))
        }
    };

    let save_dir = Path::new(&settings.storage.image_dir).join(work.row.to_string());
    let artifacts = image_scraper::download_search_images(
        &scout,
        &work.input,
        IMAGES_PER_ROW,
        &save_dir,
        Path::new(&settings.storage.snapshot_dir),
    )
    .await;
    scout.quit().await;

    if artifacts.is_empty() {
        return HttpResponse::InternalServerError()
            .body(format!("No images downloaded for row {}", work.row));
    }

    match queue_db::mark_images_done(&sheets, tab, work.row).await {
        Ok(()) => HttpResponse::Ok().body(format!(
            "Downloaded {} images for row {}",
            artifacts.len(),
            work.row
        )),
        Err(e) => HttpResponse::InternalServerError().body(format!(
            "Images saved but stamping row {} failed: {:?}",
            work.row, e
        )),
    }
}
