//! Route definitions for the `/message-logs` resource.
//!
//! Read-only audit trail; requires authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::message_logs;
use crate::state::AppState;

/// Routes mounted at `/message-logs`.
///
/// ```text
/// GET    /                          -> list_message_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(message_logs::list_message_logs))
}
