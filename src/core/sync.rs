use crate::core::attendance::{AttendanceStore, Upsert};
use crate::core::keys;
use crate::core::queue::OfflineQueue;
use crate::db::kv::{KeyValueStore, audit_quietly};
use crate::errors::{AppError, AppResult};
use crate::models::queue_item::QueueItem;
use crate::ui::messages::{synced, warning};

/// Outcome of replaying the offline queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Items taken from the queue.
    pub synced: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Items whose record was already stored as-is.
    pub unchanged: usize,
}

/// Reconciles the offline queue into the attendance store.
pub struct SyncCoordinator;

impl SyncCoordinator {
    /// Apply `items` in order to a copy of `attendance` (last write per slot wins).
    pub fn merge(attendance: &AttendanceStore, items: &[QueueItem]) -> (AttendanceStore, SyncReport) {
        let mut merged = attendance.clone();
        let mut report = SyncReport {
            synced: items.len(),
            ..SyncReport::default()
        };

        for item in items {
            match merged.upsert(&item.course_id, item.record) {
                Upsert::Inserted => report.inserted += 1,
                Upsert::Replaced => report.updated += 1,
                Upsert::Unchanged => report.unchanged += 1,
            }
        }

        (merged, report)
    }

    /// Drain the queue into `attendance` and persist the result once.
    ///
    /// The merged history is persisted before the persisted queue is cleared.
    /// If persisting fails the drained items go back into the queue and
    /// nothing in `attendance` changes.
    pub fn reconcile<S: KeyValueStore + ?Sized>(
        store: &mut S,
        student_id: &str,
        attendance: &mut AttendanceStore,
        queue: &mut OfflineQueue,
    ) -> AppResult<SyncReport> {
        if queue.is_empty() {
            return Ok(SyncReport::default());
        }

        let drained = queue.drain_all();
        let (merged, report) = Self::merge(attendance, &drained);

        if let Err(e) = merged.save(store, student_id) {
            let pending = drained.len();
            queue.restore(drained);
            audit_quietly(store, "sync", student_id, &format!("Sync aborted: {}", e));
            return Err(AppError::SyncFailed {
                pending,
                reason: e.to_string(),
            });
        }

        *attendance = merged;

        // A replay of a queue that failed to clear only rewrites identical
        // records, so this step is allowed to fail softly.
        if let Err(e) = store.remove(&keys::queue(student_id)) {
            warning(format!("Synced data saved, but the offline queue could not be cleared: {}", e));
        }

        audit_quietly(
            store,
            "sync",
            student_id,
            &format!(
                "{} queued record(s) applied ({} new, {} updated, {} unchanged)",
                report.synced, report.inserted, report.updated, report.unchanged
            ),
        );
        synced(report.synced);

        Ok(report)
    }
}
