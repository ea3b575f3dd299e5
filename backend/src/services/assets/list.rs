use crate::config::Settings;
use crate::db;
use actix_web::{web, Responder};
use common::model::asset::{Asset, AssetType};
use common::requests::AssetQuery;
use rusqlite::params;

pub async fn process(
    settings: web::Data<Settings>,
    query: web::Query<AssetQuery>,
) -> impl Responder {
    // Reject an unknown type filter up front instead of returning an
    // empty list that looks like a valid answer.
    let asset_type = match query.asset_type.as_deref() {
        Some(raw) => match AssetType::parse(raw) {
            Some(t) => Some(t),
            None => {
                return actix_web::HttpResponse::BadRequest()
                    .body(format!("Unknown asset type '{}'", raw));
            }
        },
        None => None,
    };

    match list_assets(&settings.db_path, asset_type).await {
        Ok(assets) => actix_web::HttpResponse::Ok().json(assets),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error listing assets: {}", e)),
    }
}

pub async fn list_assets(
    db_path: &str,
    asset_type: Option<AssetType>,
) -> Result<Vec<Asset>, String> {
    let conn = db::open(db_path)?;

    let (sql, filter) = match asset_type {
        Some(t) => (
            "SELECT id, asset_type, url, metadata FROM assets WHERE asset_type = ?1 ORDER BY id",
            Some(t.as_str().to_string()),
        ),
        None => (
            "SELECT id, asset_type, url, metadata FROM assets ORDER BY id",
            None,
        ),
    };

    let mut stmt = conn.prepare(sql).map_err(|e| e.to_string())?;
    let map_row = |row: &rusqlite::Row<'_>| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    };
    let rows: Vec<_> = match filter {
        Some(t) => stmt
            .query_map(params![t], map_row)
            .map_err(|e| e.to_string())?
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?,
        None => stmt
            .query_map([], map_row)
            .map_err(|e| e.to_string())?
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?,
    };

    let mut assets = Vec::new();
    for (id, type_str, url, metadata) in rows {
        let asset_type = AssetType::parse(&type_str)
            .ok_or_else(|| format!("Unknown asset type '{}' on asset '{}'", type_str, id))?;
        let metadata = match metadata {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| e.to_string())?),
            None => None,
        };
        assets.push(Asset {
            id,
            asset_type,
            url,
            metadata,
        });
    }
    Ok(assets)
}
