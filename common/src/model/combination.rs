use serde::{Deserialize, Serialize};

/// A named, user-curated bundle of variation ids used for structured
/// A/B-style testing.
///
/// Combinations are produced in batch by the matrix model's generation
/// step and toggled individually afterwards. `performance_score` is
/// supplied by an external analytics collaborator, never computed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    pub id: String,
    pub name: String,
    /// Ordered subset of currently-active variation ids at generation
    /// time. Deleting a variation prunes it from every combination.
    pub variation_ids: Vec<String>,
    /// Whether this combination is part of the active test set.
    pub is_selected: bool,
    /// 0-100, externally supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<u32>,
}
