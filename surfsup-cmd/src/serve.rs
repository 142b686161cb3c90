//! Long-running JSON API over the climate store.

use crate::StoreArgs;
use std::net::SocketAddr;
use surfsup_api::AppState;

/// Open the store, cache the most active station, then serve until Ctrl-C.
///
/// The station ranking runs before the listener binds, so a store that
/// cannot be ranked fails start-up instead of the first request.
pub async fn run_serve(store: &StoreArgs, bind: SocketAddr) -> anyhow::Result<()> {
    let store = store.clone();
    let state = tokio::task::spawn_blocking(move || -> anyhow::Result<AppState> {
        let db = store.open()?;
        Ok(AppState::init(db)?)
    })
    .await??;
    surfsup_api::serve(state, bind).await
}
