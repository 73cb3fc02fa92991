//! Route definitions for the `/auth` resource.
//!
//! Both endpoints are public: they mint the tokens everything else requires.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /signup                    -> signup
/// POST   /login                     -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}
