use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::get_post::PostRecord;
use super::ApiError;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParameters {
    pub page: Option<String>,
}

impl ListPostsParameters {
    /// Zero-based page number; absent means the first page.
    fn page_number(&self) -> Result<u64, ApiError> {
        match self.page.as_deref() {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ApiError::BadRequest(format!("Invalid page {:?}: {}", raw, e))),
        }
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    params: Result<Query<ListPostsParameters>, QueryRejection>,
) -> Result<Json<Vec<PostRecord>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let page_number = params.page_number()?;

    let posts = state.post_service.list_posts(page_number).await?;

    Ok(Json(posts.iter().map(PostRecord::from).collect()))
}
