//! # Approval Submission Service
//!
//! `POST /api/matrices/submit` pushes a saved matrix into the approval
//! pipeline as a background job.
//!
//! ## Workflow:
//!
//! 1.  **HTTP Request**: `process` receives a `SubmitMatrixRequest`
//!     containing the `matrix_id`.
//!
//! 2.  **Job Scheduling**: `schedule_approval_job`:
//!     - creates a unique `job_id`,
//!     - registers the job as `Pending` in the shared `JobsState`,
//!     - immediately returns the `job_id` so the client can poll
//!       `GET /api/matrices/status/{job_id}`,
//!     - spawns a Tokio task to manage the job's lifecycle.
//!
//! 3.  **Background Processing**: the spawned task runs
//!     `approve_blocking` under `tokio::task::spawn_blocking` so the
//!     SQLite reads stay off the async runtime.
//!
//! 4.  **Completeness Check**: the worker loads the stored matrix, the
//!     template's field list, and walks every (field, active variation)
//!     cell. A required field with an empty cell fails the job with a
//!     message naming the field and variation.
//!
//! 5.  **Promotion**: when every cell passes, the stored matrix moves
//!     from `draft` to `pending_approval`.
//!
//! 6.  **Progress Reporting**: the worker sends `ApprovalUpdate`
//!     messages back to the async context, which translates them into
//!     percentage `JobUpdate`s for the central job controller.

use crate::config::Settings;
use crate::db;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::services::templates::get::fetch_fields;
use actix_web::{web, HttpResponse, Responder};
use common::jobs::JobStatus;
use common::model::field::DynamicField;
use common::model::payload::{FieldAssignment, MatrixStatus};
use common::model::variation::Variation;
use common::requests::SubmitMatrixRequest;
use rusqlite::{params, OptionalExtension};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Progress message from the blocking worker back to the async task
/// that owns the job.
#[derive(Debug)]
pub enum ApprovalUpdate {
    /// Overall job status change (e.g. to Failed).
    Job(JobStatus),
    /// One grid cell checked; used to compute the percentage.
    Cell { checked: usize, total: usize },
}

pub(crate) async fn process(
    state: web::Data<JobsState>,
    settings: web::Data<Settings>,
    payload: web::Json<SubmitMatrixRequest>,
) -> impl Responder {
    match schedule_approval_job(state, settings, payload.into_inner()).await {
        Ok(job_id) => HttpResponse::Ok().json(serde_json::json!({ "job_id": job_id })),
        Err(err) => HttpResponse::InternalServerError().body(err),
    }
}

/// Registers the job as `Pending` and spawns the worker; returns the job
/// id for polling.
async fn schedule_approval_job(
    state: web::Data<JobsState>,
    settings: web::Data<Settings>,
    req: SubmitMatrixRequest,
) -> Result<String, String> {
    let job_id = Uuid::new_v4().to_string();
    state
        .jobs
        .write()
        .await
        .insert(job_id.clone(), JobStatus::Pending);

    let tx = state.tx.clone();
    let job_id_clone = job_id.clone();
    let matrix_id = req.matrix_id;
    let db_path = settings.db_path.clone();

    tokio::spawn(async move {
        // Dedicated channel for this job's updates.
        let (check_tx, mut check_rx) = mpsc::channel::<ApprovalUpdate>(100);

        // Listener task translating worker updates into JobUpdates for
        // the central controller.
        let job_updater_tx = tx.clone();
        let job_id_for_updater = job_id_clone.clone();
        tokio::spawn(async move {
            while let Some(update) = check_rx.recv().await {
                let status = match update {
                    ApprovalUpdate::Job(job_status) => job_status,
                    ApprovalUpdate::Cell { checked, total } => {
                        let progress = if total > 0 {
                            (checked as f32 / total as f32 * 100.0) as u32
                        } else {
                            100
                        };
                        JobStatus::InProgress(progress)
                    }
                };
                let _ = job_updater_tx
                    .send(JobUpdate::new(job_id_for_updater.clone(), status))
                    .await;
            }
        });

        let matrix_id_for_blocking = matrix_id.clone();
        let handle = tokio::task::spawn_blocking(move || {
            approve_blocking(check_tx, &db_path, &matrix_id_for_blocking)
        });

        match handle.await {
            Ok(Ok(cells)) => {
                let _ = tx
                    .send(JobUpdate::new(
                        job_id_clone,
                        JobStatus::Completed(format!(
                            "Matrix submitted for approval ({cells} cells checked)"
                        )),
                    ))
                    .await;
            }
            Ok(Err(e)) => {
                let _ = tx
                    .send(JobUpdate::new(job_id_clone, JobStatus::Failed(e)))
                    .await;
            }
            Err(e) => {
                let _ = tx
                    .send(JobUpdate::new(
                        job_id_clone,
                        JobStatus::Failed(format!("Approval job failed: {e}")),
                    ))
                    .await;
            }
        }
    });

    Ok(job_id)
}

/// Synchronous worker: loads the matrix and its template, checks every
/// cell, and promotes the matrix on success. Returns the number of cells
/// checked.
fn approve_blocking(
    tx: mpsc::Sender<ApprovalUpdate>,
    db_path: &str,
    matrix_id: &str,
) -> Result<usize, String> {
    let conn = db::open(db_path)?;

    let row = conn
        .query_row(
            "SELECT template_id, variations, field_assignments FROM matrices WHERE id = ?1",
            params![matrix_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| e.to_string())?;
    let Some((template_id, variations, assignments)) = row else {
        return Err(format!("Matrix '{}' not found", matrix_id));
    };

    let variations: Vec<Variation> =
        serde_json::from_str(&variations).map_err(|e| e.to_string())?;
    let assignments: BTreeMap<String, FieldAssignment> =
        serde_json::from_str(&assignments).map_err(|e| e.to_string())?;
    let fields = fetch_fields(&conn, &template_id)?;

    let checked = check_assignments(&fields, &variations, &assignments, |checked, total| {
        let _ = tx.blocking_send(ApprovalUpdate::Cell { checked, total });
    })?;

    conn.execute(
        "UPDATE matrices SET status = ?1 WHERE id = ?2",
        params![MatrixStatus::PendingApproval.as_str(), matrix_id],
    )
    .map_err(|e| e.to_string())?;

    Ok(checked)
}

/// Walks every (field, active variation) cell of the grid. Fails on the
/// first required field whose cell holds neither inline content nor an
/// asset reference. Inactive variations are skipped: they are excluded
/// from preview and testing, so they cannot block approval.
pub(crate) fn check_assignments<F: FnMut(usize, usize)>(
    fields: &[DynamicField],
    variations: &[Variation],
    assignments: &BTreeMap<String, FieldAssignment>,
    mut on_cell: F,
) -> Result<usize, String> {
    let active: Vec<&Variation> = variations.iter().filter(|v| v.is_active).collect();
    let total = fields.len() * active.len();
    let mut checked = 0usize;

    for field in fields {
        let assignment = assignments.get(&field.id);
        for variation in &active {
            let filled = assignment.is_some_and(|a| {
                a.content
                    .iter()
                    .any(|c| c.variation_id == variation.id && !c.content.is_empty())
                    || a.assets.iter().any(|r| r.variation_id == variation.id)
            });
            if field.required && !filled {
                return Err(format!(
                    "Required field '{}' is empty in variation '{}'",
                    field.name, variation.name
                ));
            }
            checked += 1;
            on_cell(checked, total);
        }
    }
    Ok(checked)
}
