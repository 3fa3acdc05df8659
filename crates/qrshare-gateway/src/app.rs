use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{get_text_handler, health_handler, publish_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/v1",
                Router::new()
                    .route("/publish", post(publish_handler))
                    .route("/texts/{alias}", get(get_text_handler)),
            )
            .route("/p/{alias}/", get(get_text_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
