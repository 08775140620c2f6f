use std::sync::Arc;

use axum::Router;

use crate::webserver::state::AppState;

pub mod ai;
pub mod dashboard;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(dashboard::routes())
        .nest("/ai", ai::routes())
}
