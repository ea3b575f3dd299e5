use crate::config::Settings;
use crate::db;
use crate::services::templates::get::fetch_fields;
use actix_web::web;
use common::model::template::Template;

pub async fn process(settings: web::Data<Settings>) -> impl actix_web::Responder {
    match list_templates(&settings.db_path).await {
        Ok(templates) => actix_web::HttpResponse::Ok().json(templates),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error listing templates: {}", e)),
    }
}

pub async fn list_templates(db_path: &str) -> Result<Vec<Template>, String> {
    let conn = db::open(db_path)?;

    let mut stmt = conn
        .prepare("SELECT id, name, platform, aspect_ratio FROM templates ORDER BY name")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Template {
                id: row.get(0)?,
                name: row.get(1)?,
                platform: row.get(2)?,
                aspect_ratio: row.get(3)?,
                dynamic_fields: Vec::new(),
            })
        })
        .map_err(|e| e.to_string())?;

    let mut templates: Vec<Template> = Vec::new();
    for row in rows {
        let mut template = row.map_err(|e| e.to_string())?;
        template.dynamic_fields = fetch_fields(&conn, &template.id)?;
        templates.push(template);
    }
    Ok(templates)
}
