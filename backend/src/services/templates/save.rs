use crate::config::Settings;
use crate::db;
use actix_web::{web, Responder};
use common::model::template::Template;
use rusqlite::{params, Connection};

pub async fn process(
    settings: web::Data<Settings>,
    payload: web::Json<Template>,
) -> impl Responder {
    match save_template(&settings.db_path, &payload).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Template saved"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error saving template: {}", e)),
    }
}

pub async fn save_template(db_path: &str, payload: &Template) -> Result<(), String> {
    if payload.id.trim().is_empty() {
        return Err("Template id must not be empty".to_string());
    }

    let conn = db::open(db_path)?;
    sync_template(&conn, payload)
}

/// Upserts the template row and reconciles its field list: fields absent
/// from the payload are deleted, the rest are inserted or updated in
/// payload order.
pub(crate) fn sync_template(conn: &Connection, payload: &Template) -> Result<(), String> {
    conn.execute(
        "INSERT OR REPLACE INTO templates (id, name, platform, aspect_ratio)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            &payload.id,
            &payload.name,
            &payload.platform,
            &payload.aspect_ratio
        ],
    )
    .map_err(|e| e.to_string())?;

    // Existing field ids for the template.
    let existing_ids: Vec<String> = conn
        .prepare("SELECT id FROM template_fields WHERE template_id = ?1")
        .map_err(|e| e.to_string())?
        .query_map(params![&payload.id], |row| row.get(0))
        .map_err(|e| e.to_string())?
        .filter_map(Result::ok)
        .collect();

    // Delete fields that are no longer present.
    for old_id in &existing_ids {
        if !payload.dynamic_fields.iter().any(|f| &f.id == old_id) {
            conn.execute(
                "DELETE FROM template_fields WHERE id = ?1 AND template_id = ?2",
                params![old_id, &payload.id],
            )
            .map_err(|e| e.to_string())?;
        }
    }

    // Insert or update fields.
    for (position, field) in payload.dynamic_fields.iter().enumerate() {
        conn.execute(
            "INSERT OR REPLACE INTO template_fields
                 (id, template_id, name, field_type, required, description, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &field.id,
                &payload.id,
                &field.name,
                field.field_type.as_str(),
                field.required as i64,
                &field.description,
                position as i64
            ],
        )
        .map_err(|e| e.to_string())?;
    }

    Ok(())
}
