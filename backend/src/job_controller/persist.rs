//! Background job mirroring an in-memory inventory to storage.
//!
//! Every in-memory change of a user's collection gets the next revision of
//! that user, taken under the same lock as the change. Jobs for one user
//! write one at a time, and a job whose revision is older than the stored
//! one skips its write, so storage always converges on the newest snapshot
//! whatever order the jobs run in.

use common::jobs::JobStatus;
use common::model::inventory::InventoryItem;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::state::{JobUpdate, JobsState};
use crate::db::{inventory, Database};

/// A user's collection as it was right after one change.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub revision: u64,
    pub items: Vec<InventoryItem>,
}

#[derive(Default)]
struct Ledger {
    issued: AtomicU64,
    /// Revision of the rows currently in storage.
    stored: Mutex<u64>,
}

/// Clonable handle serializing replace-all writes per user.
#[derive(Clone)]
pub struct InventoryWriter {
    db: Database,
    ledgers: Arc<Mutex<HashMap<String, Arc<Ledger>>>>,
}

impl InventoryWriter {
    pub fn new(db: Database) -> Self {
        InventoryWriter {
            db,
            ledgers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn ledger(&self, user_id: &str) -> Arc<Ledger> {
        self.ledgers
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .clone()
    }

    /// Next revision of `user_id`. Must be taken while the snapshot it tags
    /// is still protected by the dashboard lock.
    pub async fn next_revision(&self, user_id: &str) -> u64 {
        self.ledger(user_id).await.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Schedules a replace-all of `user_id`'s stored inventory with the
    /// snapshot and returns the job id right away.
    ///
    /// The in-memory collection has already been updated by the caller, so a
    /// failure here is reported as "loaded locally but not saved".
    pub async fn schedule_replace_all(
        &self,
        jobs: &JobsState,
        user_id: String,
        snapshot: Snapshot,
    ) -> String {
        let job_id = jobs.register().await;
        let tx = jobs.tx.clone();
        let id = job_id.clone();
        let db = self.db.clone();
        let ledger = self.ledger(&user_id).await;

        tokio::spawn(async move {
            let Snapshot { revision, items } = snapshot;
            let count = items.len();
            let _ = tx
                .send(JobUpdate {
                    job_id: id.clone(),
                    status: JobStatus::InProgress(0),
                })
                .await;

            let mut stored = ledger.stored.lock().await;
            let status = if *stored > revision {
                info!(
                    "Skipped stale inventory snapshot {} < {} (job {})",
                    revision, *stored, id
                );
                JobStatus::Completed(format!(
                    "{} items imported; a newer save already covers them",
                    count
                ))
            } else {
                let handle = tokio::task::spawn_blocking(move || {
                    let mut conn = db.connect()?;
                    inventory::replace_all(&mut conn, &user_id, &items)
                });

                match handle.await {
                    Ok(Ok(())) => {
                        *stored = revision;
                        info!("Persisted {} inventory items (job {})", count, id);
                        JobStatus::Completed(format!(
                            "{} items imported and saved to your account",
                            count
                        ))
                    }
                    Ok(Err(e)) => {
                        warn!("Persisting inventory failed (job {}): {}", id, e);
                        JobStatus::Failed(format!("Data loaded locally but not saved: {}", e))
                    }
                    Err(join_err) => {
                        warn!("Persistence task panicked (job {}): {}", id, join_err);
                        JobStatus::Failed(format!(
                            "Data loaded locally but not saved: join error: {}",
                            join_err
                        ))
                    }
                }
            };
            drop(stored);

            let _ = tx.send(JobUpdate { job_id: id, status }).await;
        });

        job_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_controller::state::start_job_updater;
    use common::model::inventory::sample_inventory;
    use std::time::Duration;

    async fn wait_for(jobs: &JobsState, job_id: &str) -> JobStatus {
        for _ in 0..500 {
            if let Some(status) = jobs.status(job_id).await {
                if status.is_finished() {
                    return status;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("job {} did not finish", job_id);
    }

    fn setup() -> (tempfile::TempDir, Database, JobsState, InventoryWriter) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("smartmed.sqlite"));
        db.initialize().unwrap();
        let (jobs, rx) = JobsState::new(64);
        tokio::spawn(start_job_updater(jobs.clone(), rx));
        let writer = InventoryWriter::new(db.clone());
        (dir, db, jobs, writer)
    }

    #[actix_web::test]
    async fn test_back_to_back_snapshots_store_the_last_one() {
        let (_dir, db, jobs, writer) = setup();
        let all = sample_inventory();

        for _round in 0..20 {
            let mut job_ids = Vec::new();
            for n in 1..=all.len() {
                let revision = writer.next_revision("u").await;
                let snapshot = Snapshot {
                    revision,
                    items: all.iter().take(n).cloned().collect(),
                };
                job_ids.push(writer.schedule_replace_all(&jobs, "u".to_string(), snapshot).await);
            }
            for job_id in &job_ids {
                assert!(matches!(wait_for(&jobs, job_id).await, JobStatus::Completed(_)));
            }

            let conn = db.connect().unwrap();
            assert_eq!(inventory::list_all(&conn, "u").unwrap(), all);
            inventory::replace_all(&mut db.connect().unwrap(), "u", &[]).unwrap();
        }
    }

    #[actix_web::test]
    async fn test_older_snapshot_never_overwrites_newer() {
        let (_dir, db, jobs, writer) = setup();
        let older = Snapshot {
            revision: writer.next_revision("u").await,
            items: sample_inventory().into_iter().take(2).collect(),
        };
        let newer = Snapshot {
            revision: writer.next_revision("u").await,
            items: sample_inventory(),
        };

        let job = writer.schedule_replace_all(&jobs, "u".to_string(), newer).await;
        wait_for(&jobs, &job).await;
        let stale = writer.schedule_replace_all(&jobs, "u".to_string(), older).await;
        assert_eq!(
            wait_for(&jobs, &stale).await,
            JobStatus::Completed("2 items imported; a newer save already covers them".to_string())
        );

        let conn = db.connect().unwrap();
        assert_eq!(inventory::list_all(&conn, "u").unwrap().len(), 10);
    }

    #[actix_web::test]
    async fn test_revisions_are_per_user() {
        let (_dir, _db, _jobs, writer) = setup();
        assert_eq!(writer.next_revision("a").await, 1);
        assert_eq!(writer.next_revision("a").await, 2);
        assert_eq!(writer.next_revision("b").await, 1);
    }
}
