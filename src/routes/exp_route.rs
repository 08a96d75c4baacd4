use std::path::Path;

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use url::Url;

use crate::configuration::Settings;
use crate::services::{fetcher, RetryPolicy};

#[derive(Deserialize)]
struct SnapshotQuery {
    url: String,
}

/// Dumps a page's raw html to the snapshot directory, for checking what the
/// portals actually serve before wiring up selectors.
#[get("/snapshot")]
pub async fn save_snapshot(
    body: web::Query<SnapshotQuery>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    if Url::parse(&body.url).is_err() {
        return HttpResponse::BadRequest().body("Not a valid url");
    }

    let path = Path::new(&settings.storage.snapshot_dir).join("response.html");
    match fetcher::save_html_snapshot(&body.url, &path, &RetryPolicy::once()).await {
        Ok(path) => HttpResponse::Ok().body(format!("Saved response html to {}", path.display())),
        Err(e) => HttpResponse::Ok().body(format!("Got error: {}", e)),
    }
}
