use crate::handlers::{
    dashboard::dashboard,
    forecast::get_forecast,
    health::health_check,
    images::get_decorative_images,
    statistics::get_counter_statistics,
    timeseries::get_counter_timeseries,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(dashboard))
        // Health check
        .route("/health", get(health_check))
        // Counter data
        .route("/api/v1/counters/timeseries", get(get_counter_timeseries))
        .route("/api/v1/counters/statistics", get(get_counter_statistics))
        // Forecast
        .route("/api/v1/forecast", get(get_forecast))
        // Decorative images
        .route("/api/v1/images", get(get_decorative_images))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
