pub mod dashboard;
pub mod forecast;
pub mod health;
pub mod images;
pub mod statistics;
pub mod timeseries;

use axum::http::StatusCode;
use std::fmt::Display;
use tracing::error;

/// Logs the failure and turns it into a 500.
pub(crate) fn internal_error<E: Display>(context: &'static str) -> impl FnOnce(E) -> StatusCode {
    move |e| {
        error!("{}: {}", context, e);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
