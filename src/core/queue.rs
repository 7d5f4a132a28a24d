use crate::core::attendance::Upsert;
use crate::core::keys;
use crate::db::kv::{KeyValueStore, load_or_default, save_json};
use crate::errors::AppResult;
use crate::models::queue_item::QueueItem;
use chrono::NaiveDate;

/// Writes recorded while offline, in arrival order.
/// Holds at most one item per (courseId, date).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfflineQueue {
    items: Vec<QueueItem>,
}

impl OfflineQueue {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, student_id: &str) -> AppResult<Self> {
        let items: Vec<QueueItem> = load_or_default(store, &keys::queue(student_id))?;
        let mut queue = Self::default();
        for item in items {
            queue.enqueue(item);
        }
        Ok(queue)
    }

    /// Persist the queue; an empty queue removes its key.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, student_id: &str) -> AppResult<()> {
        if self.items.is_empty() {
            store.remove(&keys::queue(student_id))
        } else {
            save_json(store, &keys::queue(student_id), &self.items)
        }
    }

    /// Replace a pending write for the same (courseId, date) in place,
    /// otherwise append.
    pub fn enqueue(&mut self, item: QueueItem) -> Upsert {
        match self
            .items
            .iter_mut()
            .find(|q| q.same_slot(&item.course_id, item.record.date))
        {
            Some(existing) if *existing == item => Upsert::Unchanged,
            Some(existing) => {
                *existing = item;
                Upsert::Replaced
            }
            None => {
                self.items.push(item);
                Upsert::Inserted
            }
        }
    }

    /// Take every pending item, leaving the queue empty.
    pub fn drain_all(&mut self) -> Vec<QueueItem> {
        std::mem::take(&mut self.items)
    }

    /// Put drained items back ahead of anything queued since.
    pub fn restore(&mut self, drained: Vec<QueueItem>) {
        let newer = std::mem::replace(&mut self.items, drained);
        for item in newer {
            self.enqueue(item);
        }
    }

    /// Drop the pending write for a slot, if any.
    pub fn discard(&mut self, course_id: &str, date: NaiveDate) -> bool {
        let before = self.items.len();
        self.items.retain(|q| !q.same_slot(course_id, date));
        self.items.len() != before
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;
    use crate::models::record::AttendanceRecord;
    use crate::models::status::AttendanceStatus;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn second_write_for_same_slot_replaces_first() {
        let mut q = OfflineQueue::default();
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(20))));
        q.enqueue(QueueItem::new("MIN101", AttendanceRecord::present(day(20))));
        let r = q.enqueue(QueueItem::new("GEO202", AttendanceRecord::absent(day(20))));

        assert_eq!(r, Upsert::Replaced);
        assert_eq!(q.len(), 2);
        assert_eq!(q.items()[0].course_id, "GEO202");
        assert_eq!(q.items()[0].record.status, AttendanceStatus::Absent);
    }

    #[test]
    fn drain_all_empties_the_queue() {
        let mut q = OfflineQueue::default();
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(20))));
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(21))));

        let drained = q.drain_all();
        assert_eq!(drained.len(), 2);
        assert!(q.is_empty());
        assert!(q.drain_all().is_empty());
    }

    #[test]
    fn restore_keeps_newer_writes() {
        let mut q = OfflineQueue::default();
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(20))));
        let drained = q.drain_all();

        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::absent(day(20))));
        q.enqueue(QueueItem::new("MIN101", AttendanceRecord::present(day(22))));
        q.restore(drained);

        assert_eq!(q.len(), 2);
        assert_eq!(q.items()[0].record.status, AttendanceStatus::Absent);
        assert_eq!(q.items()[1].course_id, "MIN101");
    }

    #[test]
    fn discard_removes_only_the_slot() {
        let mut q = OfflineQueue::default();
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(20))));
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(21))));

        assert!(q.discard("GEO202", day(20)));
        assert!(!q.discard("GEO202", day(20)));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn empty_queue_removes_its_key() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        let mut q = OfflineQueue::default();
        q.enqueue(QueueItem::new("GEO202", AttendanceRecord::present(day(20))));
        q.save(&mut pool, "S1").unwrap();
        assert!(pool.get("queue:S1").unwrap().is_some());
        assert_eq!(OfflineQueue::load(&pool, "S1").unwrap(), q);

        q.drain_all();
        q.save(&mut pool, "S1").unwrap();
        assert!(pool.get("queue:S1").unwrap().is_none());
    }
}
