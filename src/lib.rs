pub mod callback;
pub mod config;
pub mod error;
pub mod intake;
pub mod llm;
pub mod orchestrator;
pub mod routes;
pub mod state;
pub mod translate;

#[cfg(test)]
mod test_support;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Full application router with tracing applied.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
