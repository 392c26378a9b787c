use crate::presentation::handlers;
use crate::presentation::middleware::{cors, rate_limit, trace};
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::state::AppState;

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let api = Router::new()
        .nest("/api/v1/rooms", routes::rooms::routes())
        .nest("/api/v1/members", routes::rooms::member_routes())
        .layer(rate_limit::rate_limit_layer()?);

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .merge(api)
        .layer(cors::cors_layer()?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(trace::request_span))
        .with_state(state))
}
