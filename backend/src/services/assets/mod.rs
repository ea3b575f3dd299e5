mod list;
mod save;

use actix_web::web;

const API_PATH: &str = "/api/assets";

/// Configures and returns the Actix `Scope` for the asset library.
///
/// `GET /` lists assets, optionally filtered with `?asset_type=image`
/// (or `video`/`audio`); `POST /save` upserts one asset.
pub fn configure_routes() -> actix_web::Scope {
    web::scope(API_PATH)
        .route("", web::get().to(list::process))
        .route("/save", web::post().to(save::process))
}
