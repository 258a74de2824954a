pub mod messages;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Every route under the API prefix must be claimed here; the SPA fallback
/// never writes a response for API paths.
pub fn api_router() -> Router<AppState> {
    Router::new().route("/api/message", get(messages::get_message))
}
