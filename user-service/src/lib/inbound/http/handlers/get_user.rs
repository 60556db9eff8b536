use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::session::guard::AuthContext;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Fetch one user. Callers may read their own record; admins may read any.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(raw_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // Compare canonical forms so casing or hyphenation of the path does not matter
    let user_id = UserId::from_string(&raw_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    context.require_owner_or_role(&user_id.to_string(), Role::Admin)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
