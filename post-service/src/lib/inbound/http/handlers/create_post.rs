use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Create a post owned by the caller. Any owner id in the body is ignored.
pub async fn create_post(
    State(state): State<AppState>,
    caller: AuthenticatedAccount,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let Json(body) = body?;

    let post = state
        .post_service
        .create_post(
            &caller.account_id,
            CreatePostCommand {
                title: body.title,
                content: body.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

/// Request body shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            user_id: post.owner_id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }
}
