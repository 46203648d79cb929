//! Tracks the state of background jobs.
//!
//! Jobs run outside the request/response cycle (the persistence step of a
//! CSV upload is the main one) and report progress over an MPSC channel. A
//! single updater task drains the channel into the shared status map, which
//! the `/api/data_sources/csv/status/{job_id}` endpoint reads.

use common::jobs::JobStatus;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Clonable handle on the status of all jobs, shared as `web::Data`.
#[derive(Clone)]
pub struct JobsState {
    /// Job id to current status. Written only by [`start_job_updater`] and
    /// [`JobsState::register`].
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender workers use to report status changes.
    pub tx: mpsc::Sender<JobUpdate>,

    /// Finished jobs kept for status polling; older ones are evicted.
    pub finished_limit: usize,
}

/// Default number of finished jobs whose status stays readable.
pub const FINISHED_JOBS_RETAINED: usize = 1000;

/// A status change for one job.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobsState {
    /// Creates the state and the receiving end to hand to [`start_job_updater`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
            finished_limit: FINISHED_JOBS_RETAINED,
        };
        (state, rx)
    }

    /// Allocates a new job id in the `Pending` state.
    pub async fn register(&self) -> String {
        let job_id = uuid::Uuid::new_v4().to_string();
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), JobStatus::Pending);
        job_id
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// Drains `rx` into the shared status map until every sender is dropped.
///
/// Once more than `finished_limit` jobs have finished, the oldest finished
/// ones are removed from the map.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    let mut finished: VecDeque<String> = VecDeque::new();
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        if update.status.is_finished() {
            finished.push_back(update.job_id.clone());
        }
        jobs.insert(update.job_id, update.status);

        while finished.len() > state.finished_limit {
            if let Some(oldest) = finished.pop_front() {
                jobs.remove(&oldest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_updates_reach_the_status_map() {
        let (state, rx) = JobsState::new(8);
        let updater = tokio::spawn(start_job_updater(state.clone(), rx));

        let job_id = state.register().await;
        assert_eq!(state.status(&job_id).await, Some(JobStatus::Pending));

        state
            .tx
            .send(JobUpdate {
                job_id: job_id.clone(),
                status: JobStatus::Completed("done".to_string()),
            })
            .await
            .unwrap();

        for _ in 0..50 {
            if state.status(&job_id).await.is_some_and(|s| s.is_finished()) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(
            state.status(&job_id).await,
            Some(JobStatus::Completed("done".to_string()))
        );
        assert_eq!(state.status("unknown").await, None);
        updater.abort();
    }

    #[actix_web::test]
    async fn test_oldest_finished_jobs_are_evicted() {
        let (state, rx) = JobsState::new(8);
        let state = JobsState {
            finished_limit: 2,
            ..state
        };
        let updater = tokio::spawn(start_job_updater(state.clone(), rx));

        let mut ids = Vec::new();
        for _ in 0..3 {
            let job_id = state.register().await;
            state
                .tx
                .send(JobUpdate {
                    job_id: job_id.clone(),
                    status: JobStatus::Completed("done".to_string()),
                })
                .await
                .unwrap();
            ids.push(job_id);
        }
        let running = state.register().await;

        for _ in 0..50 {
            if state.status(&ids[0]).await.is_none() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(state.status(&ids[0]).await, None);
        assert!(state.status(&ids[1]).await.is_some());
        assert!(state.status(&ids[2]).await.is_some());
        assert_eq!(state.status(&running).await, Some(JobStatus::Pending));
        updater.abort();
    }
}
