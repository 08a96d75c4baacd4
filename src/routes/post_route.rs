use actix_web::{get, web, HttpResponse};

use crate::configuration::Settings;
use crate::dal::{hotel_db, remarks_db};
use crate::services::{composer, DropboxClient, HashnodeClient, OpenaiClient, SheetsClient};

#[get("")]
pub async fn publish_post(
    sheets: web::Data<SheetsClient>,
    dropbox: web::Data<DropboxClient>,
    hashnode: web::Data<HashnodeClient>,
    openai_client: web::Data<OpenaiClient>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    /*
    1. Claim the first hotel row without a posted-at stamp
    2. Pull its details and the shared links for its image folder
    3. Generate the post body, weave in the images and a closing remark
    4. Draft-then-publish on the blog platform
    5. Stamp posted-at and the live url
    */
    let tab = &settings.spreadsheet.hotel_tab;

    let work = match hotel_db::next_post_row(&sheets, tab).await {
        Ok(Some(work)) => work,
        Ok(None) => return HttpResponse::Ok().body("No unposted hotel rows"),
        Err(e) => {
            return HttpResponse::InternalServerError()
                .body(format!("Ledger read failed: {:?}", e))
        }
    };
    log::info!("Publishing post for row {}: {}", work.row, work.input);

    let hotel = match hotel_db::hotel_details(&sheets, tab, work.row).await {
        Ok(Some(hotel)) => hotel,
        Ok(None) => {
            return HttpResponse::InternalServerError()
                .body(format!("Row {} has no hotel details", work.row))
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .body(format!("Ledger read failed: {:?}", e))
        }
    };

    let links = dropbox
        .image_links(&settings.dropbox.image_folder, &work.row.to_string())
        .await;

    let body = match links.is_empty() {
        true => {
            log::error!("No image links for row {}, posting the fallback body", work.row);
            composer::image_fallback_body(&hotel.hotel_name)
        }
        false => {
            let prompt = match tokio::fs::read_to_string(&settings.storage.prompt_path).await {
                Ok(prompt) => prompt.trim().to_string(),
                Err(e) => {
                    return HttpResponse::InternalServerError()
                        .body(format!("Failed to read the prompt file: {:?}", e))
                }
            };
            let generated = match openai_client
                .generate_post_markdown(&prompt, &hotel.brief())
                .await
            {
                Ok(generated) => generated,
                Err(e) => {
                    return HttpResponse::InternalServerError()
                        .body(format!("Post generation failed: {}", e))
                }
            };
            composer::substitute_image_links(&generated, &links)
        }
    };

    let remarks = match remarks_db::closing_remarks(&sheets, &settings.spreadsheet.remarks_tab).await
    {
        Ok(remarks) => remarks,
        Err(e) => {
            log::error!("Reading closing remarks failed: {:?}", e);
            vec![]
        }
    };
    let body = composer::append_closing_remark(&body, &remarks);

    let post_url = match hashnode.publish(&hotel.hotel_name, &body).await {
        Ok(post_url) => post_url,
        Err(e) => {
            return HttpResponse::InternalServerError().body(format!("Publishing failed: {:?}", e))
        }
    };

    match hotel_db::mark_posted(&sheets, tab, work.row, &post_url).await {
        Ok(()) => HttpResponse::Ok().body(format!("Published {}", post_url)),
        Err(e) => HttpResponse::InternalServerError().body(format!(
            "Published {} but stamping row {} failed: {:?}",
            post_url, work.row, e
        )),
    }
}
