//! # Matrix Service Module
//!
//! Endpoints for the saved matrix aggregate (template selection plus
//! variations, field assignments and combinations) under `/api/matrices`.
//!
//! ## Sub-modules:
//! - `save`: validated create/update of a matrix payload, guarded
//!   against overlapping saves of the same matrix.
//! - `get` / `list`: retrieval of stored matrices.
//! - `submit`: schedules the background approval-pipeline job.
//! - `get_status`: polling endpoint for approval job status.

pub(crate) mod get;
mod get_status;
mod list;
mod save;
mod submit;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/matrices";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/submit", post().to(submit::process))
        .route("/status/{job_id}", get().to(get_status::process))
        .route("", get().to(list::process))
        .route("/{matrix_id}", get().to(get::process))
}
