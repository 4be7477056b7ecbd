use anyhow::{Context, Result};
use compute::{ForecastHorizon, SarimaModel};
use config::{Config, Environment, File, FileFormat};
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::helpers::images::ImageClient;
use crate::schemas::AppState;

/// Built-in defaults, overridden by `parisbike.toml` and `PARISBIKE__*` variables.
const DEFAULT_SETTINGS: &str = r#"
database_url = "sqlite://bike_data.db"
bind_address = "0.0.0.0:3000"
model_path = "sarima_model.json"
cache_ttl_secs = 300
http_timeout_secs = 10
default_horizon = 31

[[images]]
caption = "Random Cat GIF"
url = "https://api.thecatapi.com/v1/images/search?mime_types=gif"

[[images]]
caption = "Random Dog GIF"
url = "https://api.thedogapi.com/v1/images/search?mime_types=gif"
"#;

/// One decorative image endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImageSource {
    /// Text shown under the image, whether or not it loads
    pub caption: String,
    /// JSON endpoint answering `[{"url": "..."}]`
    pub url: String,
}

/// Runtime settings of the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Path of the pre-fit SARIMA artifact (JSON)
    pub model_path: String,
    /// How long the loaded dataset stays memoized
    pub cache_ttl_secs: u64,
    /// Timeout for the decorative image requests
    pub http_timeout_secs: u64,
    /// Horizon used when the page is opened without one
    pub default_horizon: i64,
    pub images: Vec<ImageSource>,
}

impl Settings {
    /// Loads settings from defaults, an optional config file and the environment.
    ///
    /// When `config_path` is given the file must exist; otherwise
    /// `parisbike.{toml,yaml,json}` is picked up if present.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match config_path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name("parisbike").required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .add_source(file)
            .add_source(Environment::with_prefix("PARISBIKE").separator("__"))
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    pub fn default_horizon(&self) -> ForecastHorizon {
        ForecastHorizon::clamped(self.default_horizon)
    }
}

/// Initialize application state: database, model artifact, cache and image client
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    // Connect to database
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", settings.database_url))?;

    // Load the forecasting model once for the whole process
    info!("Loading forecast model from {}", settings.model_path);
    let model = SarimaModel::load(Path::new(&settings.model_path))
        .with_context(|| format!("Failed to load model artifact {}", settings.model_path))?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(16)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    let images = ImageClient::new(
        settings.images.clone(),
        Duration::from_secs(settings.http_timeout_secs),
    )?;
    debug!("{} image source(s) configured", images.sources().len());

    Ok(AppState {
        db,
        cache,
        forecaster: Arc::new(model),
        images,
        default_horizon: settings.default_horizon(),
    })
}
