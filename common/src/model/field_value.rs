use serde::{Deserialize, Serialize};

/// The content bound to one (field, variation) pair.
///
/// At most one `FieldValue` exists per pair. `value` carries inline
/// content (text, color, link); `asset_id` carries a reference into the
/// asset library (image, video, audio). Status is derived from the
/// content on demand, never stored alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub field_id: String,
    pub variation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

impl FieldValue {
    pub fn empty(field_id: &str, variation_id: &str) -> FieldValue {
        FieldValue {
            field_id: field_id.to_string(),
            variation_id: variation_id.to_string(),
            value: None,
            asset_id: None,
        }
    }

    /// Completed iff a non-empty value or an asset reference is present.
    pub fn status(&self) -> FieldStatus {
        let has_value = self.value.as_deref().is_some_and(|v| !v.is_empty());
        if has_value || self.asset_id.is_some() {
            FieldStatus::Completed
        } else {
            FieldStatus::Empty
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == FieldStatus::Completed
    }
}

/// Tri-state completion status.
///
/// A single cell only ever reports `Empty` or `Completed`; `InProgress`
/// appears at the per-field level of the persisted payload when some but
/// not all variations of a field are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldStatus {
    Empty,
    InProgress,
    Completed,
}
