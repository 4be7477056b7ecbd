#[cfg(test)]
pub mod test_utils {
    use crate::config::ImageSource;
    use crate::helpers::images::ImageClient;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use chrono::NaiveDate;
    use compute::forecast::{SarimaArtifact, SarimaModel};
    use compute::ForecastHorizon;
    use migration::{Migrator, MigratorTrait};
    use model::entities::counter;
    use moka::future::Cache;
    use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Level of the constant forecast produced by [`test_model`].
    pub const FORECAST_LEVEL: f64 = 2500.0;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Ten days of readings, 2024-03-01 to 2024-03-10, count = 1000 * day.
    pub fn sample_records() -> Vec<(NaiveDate, i64)> {
        (1..=10)
            .map(|d| (NaiveDate::from_ymd_opt(2024, 3, d).unwrap(), 1000 * d as i64))
            .collect()
    }

    pub async fn seed_counters(db: &DatabaseConnection, records: &[(NaiveDate, i64)]) {
        let models = records.iter().map(|(date, count)| counter::ActiveModel {
            date: Set(*date),
            count: Set(*count),
        });
        counter::Entity::insert_many(models)
            .exec_without_returning(db)
            .await
            .expect("Failed to seed counters");
    }

    /// Random walk whose forecast stays at [`FORECAST_LEVEL`].
    pub fn test_model() -> SarimaModel {
        SarimaModel::from_artifact(SarimaArtifact {
            order: (0, 1, 0),
            seasonal_order: (0, 0, 0, 0),
            ar: vec![],
            ma: vec![],
            seasonal_ar: vec![],
            seasonal_ma: vec![],
            intercept: 0.0,
            last_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            history: vec![7.5, FORECAST_LEVEL.ln()],
            residuals: None,
        })
        .expect("Test model should be valid")
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state(images: Vec<ImageSource>) -> AppState {
        let db = setup_test_db().await;

        AppState {
            db,
            cache: Cache::builder()
                .max_capacity(16)
                .time_to_live(Duration::from_secs(300))
                .build(),
            forecaster: Arc::new(test_model()),
            images: ImageClient::new(images, Duration::from_secs(2))
                .expect("Failed to build image client"),
            default_horizon: ForecastHorizon::default(),
        }
    }

    /// Serves `body` with `status` on a local port and returns the URL to query.
    pub async fn spawn_image_stub(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/v1/images/search",
            get(move || async move { (status, body) }),
        );
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        format!("http://{}/v1/images/search?mime_types=gif", addr)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is read from RUST_LOG and defaults to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app over the sample counters, with the given image sources
    pub async fn setup_test_app_with_images(images: Vec<ImageSource>) -> Router {
        let state = setup_test_app_state(images).await;
        seed_counters(&state.db, &sample_records()).await;
        create_router(state)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        setup_test_app_with_images(vec![]).await
    }
}
