use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{import_csv, init_database, serve, ServeOptions};

#[derive(Parser)]
#[command(name = "parisbike")]
#[command(about = "Dashboard of the Paris bicycle counters, with a seasonal forecast")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Configuration file (TOML, YAML or JSON)
        ///
        /// Defaults to `parisbike.toml` in the working directory when present.
        #[arg(short, long)]
        config: Option<String>,

        /// Database URL, overrides the configuration file
        ///
        /// Examples:
        ///   SQLite: sqlite://bike_data.db
        ///   SQLite: sqlite:///absolute/path/to/bike_data.db
        #[arg(short, long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Path of the pre-fit SARIMA model artifact
        #[arg(short, long, env = "MODEL_PATH")]
        model_path: Option<String>,

        /// Apply pending migrations before serving
        #[arg(long)]
        migrate: bool,
    },
    /// Initialize the database using migrations
    ///
    /// Examples:
    ///   SQLite: sqlite://bike_data.db?mode=rwc
    InitDb {
        /// Database URL
        ///
        /// Append `?mode=rwc` to create a missing SQLite file.
        #[arg(short, long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Import daily counts from a CSV file
    ///
    /// The file needs a `date,count` header; dates are YYYY-MM-DD.
    /// Rows for days already in the table replace the stored count.
    ImportCsv {
        /// Path to the CSV file
        #[arg(short, long)]
        csv_path: String,

        /// Database URL
        #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite://bike_data.db")]
        database_url: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                config,
                database_url,
                bind_address,
                model_path,
                migrate,
            } => {
                serve(ServeOptions {
                    config,
                    database_url,
                    bind_address,
                    model_path,
                    migrate,
                })
                .await?;
            }
            Commands::InitDb { database_url } => {
                init_database(&database_url).await?;
            }
            Commands::ImportCsv { csv_path, database_url } => {
                import_csv(&csv_path, &database_url).await?;
            }
        }
        Ok(())
    }
}
