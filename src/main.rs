use std::net::TcpListener;

use caravan::{
    configuration::get_configuration,
    services::{
        scheduler::listing_watch_handler, DropboxClient, HashnodeClient, OpenaiClient,
        SheetsClient,
    },
    startup::run,
};
use env_logger::Env;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let sheets = SheetsClient::new(
        configuration.api_keys.sheets.clone(),
        configuration.spreadsheet.id.clone(),
    );
    let dropbox = DropboxClient::new(configuration.api_keys.dropbox.clone());
    let hashnode = HashnodeClient::new(
        configuration.api_keys.hashnode.clone(),
        configuration.hashnode.publication_id.clone(),
    );
    let openai_client = OpenaiClient::new(configuration.api_keys.openai.clone());

    // Spawn backgound tasks
    let watcher_settings = configuration.clone();
    tokio::spawn(async move { listing_watch_handler(watcher_settings).await });

    run(
        listener,
        configuration,
        sheets,
        dropbox,
        hashnode,
        openai_client,
    )?
    .await
}
