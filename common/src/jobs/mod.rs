use serde::{Deserialize, Serialize};

/// Status of a background approval-pipeline job, polled by the dashboard
/// via `/api/matrices/status/{job_id}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    /// Percentage of the assignment grid checked so far.
    InProgress(u32),
    Completed(String),
    Failed(String),
}
