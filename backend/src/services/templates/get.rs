//! # Template Retrieval Service
//!
//! Fetches the complete data for a single template, including its
//! dynamic field list, backing the `GET /api/templates/{template_id}`
//! endpoint.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the `template_id` from the
//!     URL path and delegates to `get_template`.
//! 2.  **Database Query**: the template row is read from `templates`,
//!     then its fields from `template_fields`, ordered by the position
//!     they were saved in.
//! 3.  **Model Assembly**: rows are assembled into a
//!     `common::model::template::Template` with typed `FieldType`
//!     values; an unknown type string in storage is a data error and is
//!     reported, not coerced.
//! 4.  **HTTP Response**: `200 OK` with the template JSON, `404` when
//!     the id is unknown, `503` on a database error.

use crate::config::Settings;
use crate::db;
use actix_web::web;
use common::model::field::{DynamicField, FieldType};
use common::model::template::Template;
use rusqlite::{params, Connection};

pub async fn process(
    settings: web::Data<Settings>,
    template_id: web::Path<String>,
) -> impl actix_web::Responder {
    match get_template(&settings.db_path, &template_id).await {
        Ok(Some(template)) => actix_web::HttpResponse::Ok().json(template),
        Ok(None) => actix_web::HttpResponse::NotFound().body("Template not found"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error retrieving template: {}", e)),
    }
}

pub async fn get_template(db_path: &str, template_id: &str) -> Result<Option<Template>, String> {
    let conn = db::open(db_path)?;
    match fetch_template(&conn, template_id) {
        Ok(template) => Ok(Some(template)),
        Err(e) if e == "Template not found" => Ok(None),
        Err(e) => Err(e),
    }
}

pub(crate) fn fetch_template(conn: &Connection, template_id: &str) -> Result<Template, String> {
    let mut stmt = conn
        .prepare("SELECT id, name, platform, aspect_ratio FROM templates WHERE id = ?1")
        .map_err(|e| e.to_string())?;
    let template_iter = stmt
        .query_map(params![template_id], |row| {
            Ok(Template {
                id: row.get(0)?,
                name: row.get(1)?,
                platform: row.get(2)?,
                aspect_ratio: row.get(3)?,
                dynamic_fields: Vec::new(),
            })
        })
        .map_err(|e| e.to_string())?;

    let mut template: Template = match template_iter.into_iter().next() {
        Some(Ok(t)) => t,
        Some(Err(e)) => return Err(e.to_string()),
        None => return Err("Template not found".to_string()),
    };

    template.dynamic_fields = fetch_fields(conn, template_id)?;
    Ok(template)
}

pub(crate) fn fetch_fields(
    conn: &Connection,
    template_id: &str,
) -> Result<Vec<DynamicField>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, field_type, required, description
             FROM template_fields WHERE template_id = ?1 ORDER BY position",
        )
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map(params![template_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| e.to_string())?;

    let mut fields = Vec::new();
    for row in rows {
        let (id, name, type_str, required, description) = row.map_err(|e| e.to_string())?;
        let field_type = FieldType::parse(&type_str)
            .ok_or_else(|| format!("Unknown field type '{}' on field '{}'", type_str, id))?;
        fields.push(DynamicField {
            id,
            name,
            field_type,
            required: required != 0,
            description,
        });
    }
    Ok(fields)
}
