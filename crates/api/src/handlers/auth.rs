//! Signup and login handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use alinea_core::error::CoreError;
use alinea_db::models::user::{CreateUser, LoginRequest, User};
use alinea_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Login response: the token plus the account it belongs to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(&state.pool, &input.email, &input.full_name, &password_hash).await?;

    tracing::info!(user_id = user.id, "Account created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// POST /auth/login
///
/// A wrong email and a wrong password produce the same 401 so the endpoint
/// doesn't leak which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "Login succeeded");

    Ok(Json(DataResponse {
        data: AuthResponse { access_token, user },
    }))
}
