use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::session::guard;
use crate::inbound::http::router::AppState;

/// Request header carrying the access token.
pub const TOKEN_HEADER: &str = "token";

/// Middleware that validates the session token and binds an
/// [`AuthContext`](crate::domain::session::guard::AuthContext) to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    let context = guard::authenticate(&state.tokens, token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Rejected unauthenticated request");
        ApiError::from(e).into_response()
    })?;

    tracing::debug!(user_id = %context.user_id, role = %context.role, "Request authenticated");
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
