use crate::model::payload::MatrixPayload;
use serde::Deserialize;

#[derive(Deserialize)]
/// Request payload for the matrix save endpoint. `id` is absent when
/// creating a new matrix; the backend generates one.
pub struct SaveMatrixRequest {
    pub id: Option<String>,
    pub matrix: MatrixPayload,
}

#[derive(Deserialize)]
/// Request payload for the submit-for-approval endpoint.
pub struct SubmitMatrixRequest {
    pub matrix_id: String,
}

#[derive(Deserialize)]
/// Query string for the asset library listing.
/// `asset_type` filters by `image`, `video` or `audio`; absent means all.
pub struct AssetQuery {
    pub asset_type: Option<String>,
}
