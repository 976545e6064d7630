mod cache;
mod config;
mod easytrack;
mod server;
mod types;
mod voice;

use env_logger::Env;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

#[macro_use]
extern crate failure;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting bus-voice");

    let config = config::Config::from_env();
    let client = easytrack::EasyTrackClient::new(
        Url::parse(easytrack::BASE_URL).unwrap(),
        config.username.clone(),
        config.password.clone(),
    );
    let cache = cache::XmlCache::new(config.vehicle_keys());
    let ctx = Arc::new(server::Context {
        client,
        cache,
        vehicles: config.vehicles,
        refresh_lock: Mutex::new(()),
    });
    server::run(ctx, config.port).await;
    info!("Exiting main");
}
