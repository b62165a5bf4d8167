use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod session;
pub mod state;

pub use session::{Phase, ScanItem, Session, SessionSnapshot};
pub use state::{AppState, ModelFactory};

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/session", get(handlers::get_session))
        .route("/api/credential", post(handlers::set_credential))
        .route("/api/sample-size", post(handlers::set_sample_size))
        .route("/api/scan", post(handlers::start_scan))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{AppState, ModelFactory};
    pub use bw_core::{Error, Result};
}
