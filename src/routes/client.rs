//! Settings the browser client needs to render server data.
//!
//! - GET /client/config
//!   `{ "utcOffsetSeconds": -10800 }`, the offset "today" is computed in.
//!   Used by: date formatting in the browser client

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::SharedState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig {
    utc_offset_seconds: i32,
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/client/config", get(client_config))
        .with_state(state)
}

async fn client_config(State(state): State<SharedState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        utc_offset_seconds: state.utc_offset.local_minus_utc(),
    })
}
