use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::delete_post::delete_post;
use super::handlers::get_post::get_post;
use super::handlers::home::home;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::sign_up::sign_up;
use super::handlers::update_post::update_post;
use super::middleware::auth_gate;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::websocket::handler::websocket_handler;
use crate::inbound::websocket::ConnectionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub connection_registry: Arc<ConnectionRegistry>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    post_service: Arc<dyn PostServicePort>,
    authenticator: Arc<Authenticator>,
    connection_registry: Arc<ConnectionRegistry>,
) -> Router {
    let state = AppState {
        account_service,
        post_service,
        authenticator,
        connection_registry,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(home))
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/ws", get(websocket_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
