//! # Persisted matrix payload
//!
//! The wire shape handed to the `POST /api/matrices/save` endpoint. The
//! matrix model's only contract here is to produce this shape faithfully
//! from its in-memory state; server-side acceptance is the backend's
//! concern.
//!
//! Shape, as consumed by the dashboard and the save service:
//!
//! ```json
//! {
//!   "name": "...",
//!   "description": "...",
//!   "templateId": "...",
//!   "status": "draft",
//!   "variations": [...],
//!   "combinations": [...],
//!   "fieldAssignments": {
//!     "<fieldId>": {
//!       "status": "completed" | "in-progress" | "empty",
//!       "content": [{ "id", "variationId", "content" }],
//!       "assets": [{ "variationId", "assetId" }]
//!     }
//!   }
//! }
//! ```

use crate::model::combination::Combination;
use crate::model::field_value::FieldStatus;
use crate::model::variation::Variation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub template_id: String,
    pub status: MatrixStatus,
    pub variations: Vec<Variation>,
    pub combinations: Vec<Combination>,
    /// Keyed by field id. BTreeMap keeps serialization order stable.
    pub field_assignments: BTreeMap<String, FieldAssignment>,
}

/// Lifecycle status of a saved matrix. New saves are always drafts; the
/// approval pipeline moves a matrix forward after its checks pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixStatus {
    Draft,
    PendingApproval,
    Approved,
    Published,
}

impl MatrixStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatrixStatus::Draft => "draft",
            MatrixStatus::PendingApproval => "pending_approval",
            MatrixStatus::Approved => "approved",
            MatrixStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<MatrixStatus> {
        match s {
            "draft" => Some(MatrixStatus::Draft),
            "pending_approval" => Some(MatrixStatus::PendingApproval),
            "approved" => Some(MatrixStatus::Approved),
            "published" => Some(MatrixStatus::Published),
            _ => None,
        }
    }
}

/// Per-field slice of the assignment grid.
///
/// `status` aggregates over the field's cells: `completed` when every
/// variation cell is filled, `empty` when none are, `in-progress`
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAssignment {
    pub status: FieldStatus,
    pub content: Vec<FieldContent>,
    pub assets: Vec<FieldAssetRef>,
}

/// One inline (text/color/link) cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldContent {
    /// Stable per-cell id, `<fieldId>:<variationId>`.
    pub id: String,
    pub variation_id: String,
    pub content: String,
}

/// One asset-reference (image/video/audio) cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAssetRef {
    pub variation_id: String,
    pub asset_id: String,
}
