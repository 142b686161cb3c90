//! JSON API over the Hawaii climate store.
//!
//! | Route | Response |
//! |---|---|
//! | `/` | HTML list of routes |
//! | `/api/v1.0/precipitation` | `{ date: prcp }` for the trailing year |
//! | `/api/v1.0/stations` | `[station, ...]` |
//! | `/api/v1.0/tobs` | `[[date, tobs], ...]` for the most active station, trailing year |
//! | `/api/v1.0/{start}` | `{"TMIN", "TAVG", "TMAX"}` from `start` on |
//! | `/api/v1.0/{start}/{end}` | same, `start..=end` |
//!
//! The trailing year is anchored to today's date, not to the newest
//! observation in the store.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;

/// Build the router with every route bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/:start", get(handlers::temperature_stats_from))
        .route("/api/v1.0/:start/:end", get(handlers::temperature_stats_between))
        .with_state(state)
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
        })
        .await?;
    Ok(())
}
