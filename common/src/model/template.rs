use crate::model::field::DynamicField;
use serde::{Deserialize, Serialize};

/// A creative layout definition with a fixed list of dynamic fields.
/// Owned by the template library; read-only to the matrix model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub aspect_ratio: String,
    pub dynamic_fields: Vec<DynamicField>,
}
