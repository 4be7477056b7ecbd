use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A decorative GIF shown above the charts.
///
/// `url` is `None` whenever the upstream API did not answer with a usable
/// image; the caption is still displayed in that case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DecorativeImage {
    pub caption: String,
    pub url: Option<String>,
}
