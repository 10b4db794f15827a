//! Caller identity extractor.
//!
//! Authentication happens upstream: the API gateway verifies the session
//! and injects the caller's user id as the `x-user-id` header. This
//! service trusts that header as fact and only enforces resource
//! ownership on top of it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use promptstudio_core::error::CoreError;
use promptstudio_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Caller identity extracted from the gateway-injected `x-user-id` header.
///
/// Use this as an extractor parameter in any handler that operates on
/// owned resources:
///
/// ```ignore
/// async fn my_handler(caller: CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = caller.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    /// The caller's internal database id.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-user-id header".into()))
            })?;

        let user_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid x-user-id header. Expected a numeric user id".into(),
            ))
        })?;

        Ok(CallerIdentity { user_id })
    }
}
