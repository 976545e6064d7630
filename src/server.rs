use crate::cache::XmlCache;
use crate::easytrack::EasyTrackClient;
use crate::types::Vehicle;
use crate::voice;
use failure::Error;
use log::{error, info};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::Filter;

/// Shared state threaded through every handler.
pub struct Context {
    pub client: EasyTrackClient,
    pub cache: XmlCache,
    pub vehicles: Vec<Vehicle>,
    /// Serializes refresh cycles; readers are not excluded.
    pub refresh_lock: Mutex<()>,
}

pub async fn run(ctx: Arc<Context>, port: u16) {
    info!("Server running on port {}", port);
    warp::serve(routes(ctx)).run(([0, 0, 0, 0], port)).await;
}

pub fn routes(
    ctx: Arc<Context>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let ctx = warp::any().map(move || ctx.clone());
    let update = warp::post()
        .and(warp::path!("update"))
        .and(ctx.clone())
        .and_then(handle_update);
    let voice = warp::get()
        .and(warp::path!("voice" / String))
        .and(ctx)
        .and_then(handle_voice);
    update.or(voice).with(warp::log("bus_voice"))
}

async fn handle_update(ctx: Arc<Context>) -> Result<impl warp::Reply, Infallible> {
    let _serialized = ctx.refresh_lock.lock().await;
    let reply = match refresh_all(&ctx).await {
        Ok(()) => warp::reply::with_status(
            warp::reply::json(&json!({ "message": "XML update triggered successfully." })),
            StatusCode::OK,
        ),
        Err(e) => {
            error!("Failed to extract data: {}", e);
            warp::reply::with_status(
                warp::reply::json(&json!({
                    "error": true,
                    "message": "Failed to update XML.",
                    "detail": e.to_string(),
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };
    Ok(reply)
}

/// Always 200 with well-formed markup: the IVR platform cannot do anything
/// useful with an HTTP error, so misses get the fallback apology instead.
async fn handle_voice(key: String, ctx: Arc<Context>) -> Result<impl warp::Reply, Infallible> {
    let xml = match ctx.cache.get(&key).await {
        Some(xml) => xml,
        None => voice::render_say(voice::FALLBACK_MESSAGE),
    };
    Ok(warp::reply::with_header(
        xml,
        "content-type",
        "application/xml",
    ))
}

/// One refresh cycle: fresh token, then every vehicle in declared order with
/// that one token. Per-vehicle failures clear only that vehicle's entry; an
/// authentication failure clears the whole cache and surfaces the error.
pub async fn refresh_all(ctx: &Context) -> Result<(), Error> {
    let token = match ctx.client.fetch_token().await {
        Ok(token) => token,
        Err(e) => {
            ctx.cache.reset().await;
            return Err(e);
        }
    };
    for vehicle in &ctx.vehicles {
        let markup = ctx
            .client
            .fetch_location(&token, &vehicle.plate)
            .await
            .map(|address| voice::render_say(&address));
        ctx.cache.set(&vehicle.key, markup).await;
    }
    Ok(())
}
