use crate::config::Settings;
use crate::db;
use actix_web::{web, Responder};
use common::model::asset::Asset;
use rusqlite::{params, Connection};

pub async fn process(settings: web::Data<Settings>, payload: web::Json<Asset>) -> impl Responder {
    match save_asset(&settings.db_path, &payload).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Asset saved"),
        Err(e) => {
            actix_web::HttpResponse::ServiceUnavailable().body(format!("Error saving asset: {}", e))
        }
    }
}

pub async fn save_asset(db_path: &str, payload: &Asset) -> Result<(), String> {
    if payload.id.trim().is_empty() {
        return Err("Asset id must not be empty".to_string());
    }
    let conn = db::open(db_path)?;
    upsert_asset(&conn, payload)
}

pub(crate) fn upsert_asset(conn: &Connection, payload: &Asset) -> Result<(), String> {
    let metadata = match &payload.metadata {
        Some(value) => Some(serde_json::to_string(value).map_err(|e| e.to_string())?),
        None => None,
    };
    conn.execute(
        "INSERT OR REPLACE INTO assets (id, asset_type, url, metadata) VALUES (?1, ?2, ?3, ?4)",
        params![
            &payload.id,
            payload.asset_type.as_str(),
            &payload.url,
            metadata
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assets::list::list_assets;
    use common::model::asset::AssetType;

    fn asset(id: &str, asset_type: AssetType) -> Asset {
        Asset {
            id: id.to_string(),
            asset_type,
            url: format!("https://cdn.example.com/{id}"),
            metadata: Some(serde_json::json!({ "prompt": "sunny beach" })),
        }
    }

    #[test]
    fn upsert_preserves_metadata() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::create_schema(&conn).unwrap();
        upsert_asset(&conn, &asset("a1", AssetType::Image)).unwrap();

        let raw: Option<String> = conn
            .query_row("SELECT metadata FROM assets WHERE id = 'a1'", [], |row| {
                row.get(0)
            })
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw.unwrap()).unwrap();
        assert_eq!(value["prompt"], "sunny beach");
    }

    #[tokio::test]
    async fn listing_filters_by_type() {
        // list_assets opens its own connection, so this test needs a
        // file-backed database.
        let dir = std::env::temp_dir().join(format!("admatrix-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let db_path = dir.join("assets.sqlite");
        let db_path = db_path.to_str().unwrap();

        crate::db::init(db_path).unwrap();
        let conn = Connection::open(db_path).unwrap();
        upsert_asset(&conn, &asset("a1", AssetType::Image)).unwrap();
        upsert_asset(&conn, &asset("a2", AssetType::Video)).unwrap();

        let images = list_assets(db_path, Some(AssetType::Image)).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id, "a1");

        let all = list_assets(db_path, None).await.unwrap();
        assert_eq!(all.len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }
}
