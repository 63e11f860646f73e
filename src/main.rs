use std::sync::Arc;

use accountable::store::InMemoryStore;
use accountable::{Config, Error, Server, routes, telemetry};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let config = Config::parse();
    telemetry::init(&config.log);

    tracing::info!(version = %config.app_version, "starting accountable");

    let app = routes::api(&config.app_version, Arc::new(InMemoryStore::new()));

    Server::bind(config.addr).await?.serve(app).await
}
