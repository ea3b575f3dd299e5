//! Manages the state of long-running, asynchronous background jobs.
//!
//! The approval pipeline runs outside the immediate request/response
//! cycle: `POST /api/matrices/submit` schedules a job and returns its id,
//! and the dashboard polls `GET /api/matrices/status/{job_id}` until the
//! job finishes (see `backend/src/services/matrices/submit.rs`).
//!
//! The main components are:
//! - `JobsState`: a clonable, thread-safe struct holding the shared state
//!   of all jobs, injected into the Actix application state in `main.rs`.
//! - `JobUpdate`: a message struct used to communicate status changes
//!   from a background job back to the central state manager.
//! - `start_job_updater`: a long-running task that listens for
//!   `JobUpdate` messages on an MPSC channel and updates the shared
//!   `JobsState` accordingly.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// A thread-safe, shareable container for the state of all background
/// jobs.
#[derive(Clone)]
pub struct JobsState {
    /// Map from a unique job id to its current `JobStatus`; the single
    /// source of truth for job progress. Protected by an `Arc<RwLock>`
    /// so the status endpoint can read concurrently while the updater
    /// task writes.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender half of the updater channel. Background tasks push
    /// `JobUpdate` messages here instead of taking write access to the
    /// `jobs` map themselves.
    pub tx: mpsc::Sender<JobUpdate>,
}

/// A status update for a specific background job.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobUpdate {
    pub fn new(job_id: String, status: JobStatus) -> JobUpdate {
        JobUpdate { job_id, status }
    }
}

/// Central job state updater task. Spawned once from `main`; runs until
/// every sender is dropped.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id.clone(), update.status);
    }
}
