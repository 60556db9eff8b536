use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::session::guard::AuthContext;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserPage;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(params): Query<ListUsersParams>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    context.require_role(Role::Admin)?;

    state
        .user_service
        .list_users(params.page_request())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Query string of the listing endpoint.
///
/// Values arrive as raw strings so that garbage falls back to defaults instead
/// of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    #[serde(rename = "recordPerPage")]
    record_per_page: Option<String>,
    page: Option<String>,
    #[serde(rename = "startIndex")]
    start_index: Option<String>,
}

impl ListUsersParams {
    fn page_request(&self) -> PageRequest {
        let number = |value: &Option<String>| value.as_deref().and_then(|v| v.trim().parse::<i64>().ok());

        PageRequest::new(number(&self.page), number(&self.record_per_page))
            .with_start_index(number(&self.start_index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub total_count: u64,
    pub user_items: Vec<UserData>,
}

impl From<&UserPage> for ListUsersResponseData {
    fn from(page: &UserPage) -> Self {
        Self {
            total_count: page.total_count,
            user_items: page.items.iter().map(UserData::from).collect(),
        }
    }
}
