use axum::{extract::State, response::Json};
use common::DecorativeImage;
use tracing::instrument;

use crate::schemas::{ApiResponse, AppState};

/// Random cat and dog GIFs
///
/// An image whose API did not answer with 200 has no `url`.
#[utoipa::path(
    get,
    path = "/api/v1/images",
    tag = "images",
    responses(
        (status = 200, description = "Images fetched", body = common::ImagesResponse),
    )
)]
#[instrument(skip(state))]
pub async fn get_decorative_images(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<DecorativeImage>>> {
    let images = state.images.fetch_all().await;
    Json(ApiResponse::ok(images, "Images fetched"))
}
