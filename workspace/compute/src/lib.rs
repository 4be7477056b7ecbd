//! Data and model computations behind the Paris cyclists dashboard.
//!
//! - [`dataset`] holds the daily counter table as a polars frame and filters it by date.
//! - [`stats`] reduces a dataset to the three summary figures.
//! - [`forecast`] loads the pre-fit seasonal model and turns its log-scale
//!   predictions into counts.

pub mod dataset;
pub mod error;
pub mod forecast;
pub mod stats;

pub use dataset::CounterDataset;
pub use error::{ComputeError, Result};
pub use forecast::{ForecastHorizon, Forecaster, LogForecast, SarimaModel};
pub use stats::summarize;
