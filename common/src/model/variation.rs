use serde::{Deserialize, Serialize};

/// A named alternative rendition of the selected template
/// (e.g. "Version A").
///
/// Inactive variations are excluded from combination generation and
/// preview. Exactly one variation is marked default at creation time (the
/// first one); the flag is informational and not otherwise enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    /// UUID, generated at creation time.
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub is_default: bool,
}
