use crate::config::Settings;
use crate::db;
use actix_web::web;
use common::model::payload::{MatrixPayload, MatrixStatus};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

/// A stored matrix: the persisted payload plus its storage id.
#[derive(Debug, Serialize)]
pub(crate) struct StoredMatrix {
    pub id: String,
    pub matrix: MatrixPayload,
}

pub async fn process(
    settings: web::Data<Settings>,
    matrix_id: web::Path<String>,
) -> impl actix_web::Responder {
    match get_matrix(&settings.db_path, &matrix_id).await {
        Ok(Some(stored)) => actix_web::HttpResponse::Ok().json(stored),
        Ok(None) => actix_web::HttpResponse::NotFound().body("Matrix not found"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error retrieving matrix: {}", e)),
    }
}

pub async fn get_matrix(db_path: &str, matrix_id: &str) -> Result<Option<StoredMatrix>, String> {
    let conn = db::open(db_path)?;
    read_matrix(&conn, matrix_id)
}

pub(crate) fn read_matrix(
    conn: &Connection,
    matrix_id: &str,
) -> Result<Option<StoredMatrix>, String> {
    let row = conn
        .query_row(
            "SELECT name, description, template_id, status, variations, combinations,
                    field_assignments
             FROM matrices WHERE id = ?1",
            params![matrix_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            },
        )
        .optional()
        .map_err(|e| e.to_string())?;

    let Some((name, description, template_id, status, variations, combinations, assignments)) =
        row
    else {
        return Ok(None);
    };

    let status = MatrixStatus::parse(&status)
        .ok_or_else(|| format!("Unknown matrix status '{}' on matrix '{}'", status, matrix_id))?;
    let matrix = MatrixPayload {
        name,
        description,
        template_id,
        status,
        variations: serde_json::from_str(&variations).map_err(|e| e.to_string())?,
        combinations: serde_json::from_str(&combinations).map_err(|e| e.to_string())?,
        field_assignments: serde_json::from_str(&assignments).map_err(|e| e.to_string())?,
    };
    Ok(Some(StoredMatrix {
        id: matrix_id.to_string(),
        matrix,
    }))
}
