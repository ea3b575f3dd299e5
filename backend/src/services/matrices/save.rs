//! # Matrix Save Service
//!
//! `POST /api/matrices/save` — validated create/update of a matrix.
//!
//! A request without an `id` creates a new matrix; with an `id` it
//! replaces the stored one. Saves of the same matrix are single-flight:
//! the handler claims a `SaveGuard` slot before touching storage and a
//! concurrent save of the same id is answered with `409 Conflict`
//! instead of racing on the row. Validation failures leave storage
//! untouched so the client can correct and retry.

use crate::config::Settings;
use crate::db;
use crate::job_controller::save_guard::SaveGuard;
use crate::notifier::LogNotifier;
use actix_web::{web, HttpResponse, Responder};
use common::model::payload::MatrixPayload;
use common::notify::{Notifier, Severity};
use common::requests::SaveMatrixRequest;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Save failures that map to different HTTP answers: user-correctable
/// input problems versus storage trouble.
#[derive(Debug)]
pub(crate) enum SaveError {
    Invalid(String),
    Storage(String),
}

pub async fn process(
    settings: web::Data<Settings>,
    guard: web::Data<SaveGuard>,
    notifier: web::Data<LogNotifier>,
    payload: web::Json<SaveMatrixRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let matrix_id = req.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());

    if !guard.try_begin(&matrix_id).await {
        notifier.notify(
            Severity::Warning,
            &format!("Rejected overlapping save for matrix {matrix_id}"),
        );
        return HttpResponse::Conflict().body("A save for this matrix is already in progress");
    }

    let result = save_matrix(&settings.db_path, &matrix_id, &req.matrix).await;
    guard.finish(&matrix_id).await;

    match result {
        Ok(_) => {
            notifier.notify(
                Severity::Info,
                &format!("Matrix '{}' saved as {matrix_id}", req.matrix.name),
            );
            HttpResponse::Ok().json(serde_json::json!({ "matrix_id": matrix_id }))
        }
        Err(SaveError::Invalid(msg)) => {
            notifier.notify(Severity::Warning, &msg);
            HttpResponse::BadRequest().body(msg)
        }
        Err(SaveError::Storage(msg)) => {
            notifier.notify(Severity::Error, &msg);
            HttpResponse::ServiceUnavailable().body(format!("Error saving matrix: {}", msg))
        }
    }
}

pub async fn save_matrix(
    db_path: &str,
    matrix_id: &str,
    payload: &MatrixPayload,
) -> Result<(), SaveError> {
    let conn = db::open(db_path).map_err(SaveError::Storage)?;
    validate(&conn, payload)?;
    persist_matrix(&conn, matrix_id, payload).map_err(SaveError::Storage)
}

/// User-action checks: a matrix needs a name and must reference a
/// template the library knows about.
pub(crate) fn validate(conn: &Connection, payload: &MatrixPayload) -> Result<(), SaveError> {
    if payload.name.trim().is_empty() {
        return Err(SaveError::Invalid("Matrix name must not be empty".to_string()));
    }

    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM templates WHERE id = ?1)",
            params![&payload.template_id],
            |row| row.get(0),
        )
        .map_err(|e| SaveError::Storage(e.to_string()))?;
    if !exists {
        return Err(SaveError::Invalid(format!(
            "Unknown template '{}'",
            payload.template_id
        )));
    }
    Ok(())
}

pub(crate) fn persist_matrix(
    conn: &Connection,
    matrix_id: &str,
    payload: &MatrixPayload,
) -> Result<(), String> {
    let variations = serde_json::to_string(&payload.variations).map_err(|e| e.to_string())?;
    let combinations = serde_json::to_string(&payload.combinations).map_err(|e| e.to_string())?;
    let field_assignments =
        serde_json::to_string(&payload.field_assignments).map_err(|e| e.to_string())?;

    conn.execute(
        "INSERT OR REPLACE INTO matrices
             (id, name, description, template_id, status, variations, combinations, field_assignments)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            matrix_id,
            &payload.name,
            &payload.description,
            &payload.template_id,
            payload.status.as_str(),
            variations,
            combinations,
            field_assignments
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}
