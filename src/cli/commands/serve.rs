use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tracing::{info, debug, trace, error};

use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;

/// Command-line overrides applied on top of the loaded settings.
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub config: Option<String>,
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
    pub model_path: Option<String>,
    pub migrate: bool,
}

impl ServeOptions {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(url) = &self.database_url {
            settings.database_url = url.clone();
        }
        if let Some(address) = &self.bind_address {
            settings.bind_address = address.clone();
        }
        if let Some(path) = &self.model_path {
            settings.model_path = path.clone();
        }
        Ok(settings)
    }
}

pub async fn serve(options: ServeOptions) -> Result<()> {
    trace!("Entering serve function");
    info!("Paris cyclists dashboard starting up");

    let settings = options.settings()?;
    debug!("Database URL: {}", settings.database_url);
    debug!("Bind address: {}", settings.bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state(&settings).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {:#}", e);
            return Err(e);
        }
    };

    if options.migrate {
        info!("Running database migrations");
        if let Err(e) = Migrator::up(&state.db, None).await {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    let bind_address = settings.bind_address;
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Dashboard running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
