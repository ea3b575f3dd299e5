//! # Template Library Service
//!
//! Aggregates the API endpoints for the template library under
//! `/api/templates`. Templates define the dynamic fields a matrix fills
//! in; the matrix model treats them as read-only, so this service is the
//! only writer.
//!
//! ## Sub-modules:
//! - `get`: retrieval of a single template with its dynamic fields.
//! - `list`: listing of every stored template.
//! - `save`: creation and updating of templates and their fields.

pub(crate) mod get;
mod list;
pub(crate) mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`** — upserts a `Template` (JSON payload) together
///     with its dynamic fields; fields removed from the payload are
///     deleted from storage.
/// *   **`GET /`** — lists all templates, fields included.
/// *   **`GET /{template_id}`** — retrieves one template by id.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("", get().to(list::process))
        .route("/{template_id}", get().to(get::process))
}
