//! Reminder audit trail handlers.
//!
//! Read-only: log rows are written by the reminder pass, never through the
//! API.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use alinea_db::repositories::MessageLogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /message-logs
pub async fn list_message_logs(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let logs = MessageLogRepo::list_with_patient(&state.pool).await?;
    Ok(Json(DataResponse { data: logs }))
}
