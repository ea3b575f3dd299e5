use serde::{Deserialize, Serialize};

/// A generated or uploaded media item owned by the asset library.
///
/// The matrix model stores only the asset id on a field assignment and
/// never mutates the asset itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub asset_type: AssetType,
    pub url: String,
    /// Opaque producer metadata (prompt, dimensions, codec...), passed
    /// through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
    Audio,
}

impl AssetType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Image => "image",
            AssetType::Video => "video",
            AssetType::Audio => "audio",
        }
    }

    pub fn parse(s: &str) -> Option<AssetType> {
        match s {
            "image" => Some(AssetType::Image),
            "video" => Some(AssetType::Video),
            "audio" => Some(AssetType::Audio),
            _ => None,
        }
    }
}
