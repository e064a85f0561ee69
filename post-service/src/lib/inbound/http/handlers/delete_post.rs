use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePostResponse {
    pub message: &'static str,
}

pub async fn delete_post(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(post_id): Path<String>,
) -> Result<Json<DeletePostResponse>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .delete_post(&post_id, &caller.account_id)
        .await?;

    Ok(Json(DeletePostResponse {
        message: "Post Deleted!",
    }))
}
