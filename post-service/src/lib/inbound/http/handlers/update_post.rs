use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use super::create_post::PostRequest;
use super::create_post::PostResponse;
use super::ApiError;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Echoes the requested change. A post that is missing or owned by someone
/// else is left untouched and still answers 200.
pub async fn update_post(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    Path(post_id): Path<String>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;
    let Json(body) = body?;

    let update = state
        .post_service
        .update_post(
            &post_id,
            &caller.account_id,
            UpdatePostCommand {
                title: body.title,
                content: body.content,
            },
        )
        .await?;

    Ok(Json(PostResponse {
        id: update.id.to_string(),
        user_id: update.owner_id.to_string(),
        title: update.title,
        content: update.content,
    }))
}
