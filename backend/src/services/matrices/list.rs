use crate::config::Settings;
use crate::db;
use actix_web::web;
use serde::Serialize;

/// One row of the matrix overview table; the full payload is fetched
/// separately when a matrix is opened.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatrixSummary {
    pub id: String,
    pub name: String,
    pub template_id: String,
    pub status: String,
}

pub async fn process(settings: web::Data<Settings>) -> impl actix_web::Responder {
    match list_matrices(&settings.db_path).await {
        Ok(matrices) => actix_web::HttpResponse::Ok().json(matrices),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error listing matrices: {}", e)),
    }
}

pub async fn list_matrices(db_path: &str) -> Result<Vec<MatrixSummary>, String> {
    let conn = db::open(db_path)?;
    let mut stmt = conn
        .prepare("SELECT id, name, template_id, status FROM matrices ORDER BY name")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            Ok(MatrixSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                template_id: row.get(2)?,
                status: row.get(3)?,
            })
        })
        .map_err(|e| e.to_string())?;

    rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
}
