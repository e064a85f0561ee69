use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub status: bool,
}

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the post service",
        status: true,
    })
}
