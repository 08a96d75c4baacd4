use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Settings,
    routes::{chart_route, default_route, exp_route, image_route, listing_route, post_route},
    services::{DropboxClient, HashnodeClient, OpenaiClient, SheetsClient},
};

pub fn run(
    listener: TcpListener,
    settings: Settings,
    sheets: SheetsClient,
    dropbox: DropboxClient,
    hashnode: HashnodeClient,
    openai_client: OpenaiClient,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let sheets = web::Data::new(sheets);
    let dropbox = web::Data::new(dropbox);
    let hashnode = web::Data::new(hashnode);
    let openai_client = web::Data::new(openai_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(web::scope("/chart").service(chart_route::weekly_chart))
            .service(web::scope("/images").service(image_route::download_images))
            .service(web::scope("/listing").service(listing_route::scrape_listing))
            .service(web::scope("/post").service(post_route::publish_post))
            .service(web::scope("/exp").service(exp_route::save_snapshot))
            .app_data(settings.clone())
            .app_data(sheets.clone())
            .app_data(dropbox.clone())
            .app_data(hashnode.clone())
            .app_data(openai_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
