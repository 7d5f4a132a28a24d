//! Session context: the active student, their attendance history, their
//! offline queue and the connectivity state.
//!
//! A `Session` is constructed explicitly over a [`KeyValueStore`] and handed
//! to whatever needs it. `open` hydrates it from the store, `close` flushes it
//! back. Every mutation is also persisted as it happens.

use crate::core::attendance::{AttendanceStore, Upsert};
use crate::core::connectivity::{Connectivity, ConnectivityMonitor, Transition};
use crate::core::keys;
use crate::core::queue::OfflineQueue;
use crate::core::stats::CourseStats;
use crate::core::sync::{SyncCoordinator, SyncReport};
use crate::db::kv::{KeyValueStore, audit_quietly, load_or_default, save_json};
use crate::errors::{AppError, AppResult};
use crate::models::queue_item::QueueItem;
use crate::models::record::AttendanceRecord;
use crate::models::student::Student;
use crate::ui::messages::warning;

/// Where a mark ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Written to the attendance store.
    Applied(Upsert),
    /// Written to the offline queue.
    Queued(Upsert),
}

pub struct Session<S: KeyValueStore> {
    store: S,
    student: Option<Student>,
    attendance: AttendanceStore,
    queue: OfflineQueue,
    monitor: ConnectivityMonitor,
}

impl<S: KeyValueStore> Session<S> {
    /// Hydrate the session from `store`.
    pub fn open(store: S) -> AppResult<Self> {
        let student: Option<Student> = load_or_default(&store, keys::ACTIVE_STUDENT)?;
        let connectivity: Connectivity = load_or_default(&store, keys::CONNECTIVITY)?;

        let (attendance, queue) = match &student {
            Some(s) => (
                AttendanceStore::load(&store, &s.id)?,
                OfflineQueue::load(&store, &s.id)?,
            ),
            None => (AttendanceStore::default(), OfflineQueue::default()),
        };

        Ok(Self {
            store,
            student,
            attendance,
            queue,
            monitor: ConnectivityMonitor::new(connectivity),
        })
    }

    /// Flush everything back to the store and hand the store back.
    pub fn close(mut self) -> AppResult<S> {
        self.flush()?;
        Ok(self.store)
    }

    fn flush(&mut self) -> AppResult<()> {
        save_json(&mut self.store, keys::CONNECTIVITY, &self.monitor.state())?;
        if let Some(s) = &self.student {
            self.attendance.save(&mut self.store, &s.id)?;
            self.queue.save(&mut self.store, &s.id)?;
        }
        Ok(())
    }

    fn active_id(&self) -> AppResult<String> {
        self.student
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or(AppError::NoActiveStudent)
    }

    /// Record attendance for the active student.
    ///
    /// Online, the record is applied and persisted at once, and a pending
    /// offline write for the same slot is dropped so it cannot later replace
    /// this newer value. Offline, the record goes to the queue.
    pub fn mark(&mut self, course_id: &str, record: AttendanceRecord) -> AppResult<MarkOutcome> {
        let student_id = self.active_id()?;

        if !self.monitor.state().is_online() {
            let effect = self.queue.enqueue(QueueItem::new(course_id, record));
            self.queue.save(&mut self.store, &student_id)?;
            audit_quietly(
                &self.store,
                "queue",
                course_id,
                &format!("{} {} queued offline", record.date_str(), record.status.as_str()),
            );
            return Ok(MarkOutcome::Queued(effect));
        }

        let mut next = self.attendance.clone();
        let effect = next.upsert(course_id, record);
        next.save(&mut self.store, &student_id)?;
        self.attendance = next;

        if self.queue.discard(course_id, record.date) {
            self.queue.save(&mut self.store, &student_id)?;
        }

        audit_quietly(
            &self.store,
            "mark",
            course_id,
            &format!("{} {} for {}", record.date_str(), record.status.as_str(), student_id),
        );
        Ok(MarkOutcome::Applied(effect))
    }

    /// Make `student` the active student.
    ///
    /// The current student's state is flushed and dropped; the new student's
    /// history and queue are loaded from the store (empty if none). Writes
    /// left queued for that student are replayed when already online.
    pub fn switch_student(&mut self, student: Student) -> AppResult<()> {
        self.flush()?;

        let attendance = AttendanceStore::load(&self.store, &student.id)?;
        let queue = OfflineQueue::load(&self.store, &student.id)?;
        save_json(&mut self.store, keys::ACTIVE_STUDENT, &student)?;

        audit_quietly(&self.store, "switch", &student.id, &format!("Active student: {}", student.name));

        self.attendance = attendance;
        self.queue = queue;
        self.student = Some(student);

        if self.monitor.state().is_online()
            && !self.queue.is_empty()
            && let Err(e) = self.sync_now()
        {
            warning(format!("Pending offline records were kept for a later sync: {}", e));
        }
        Ok(())
    }

    /// Report a connectivity observation. An offline → online edge replays
    /// the queue; staying online does nothing.
    pub fn set_connectivity(&mut self, next: Connectivity) -> AppResult<Option<SyncReport>> {
        let transition = self.monitor.observe(next);
        save_json(&mut self.store, keys::CONNECTIVITY, &next)?;

        if transition != Transition::Unchanged {
            audit_quietly(&self.store, "net", next.as_str(), "Connectivity changed");
        }

        match transition {
            Transition::WentOnline if self.student.is_some() => self.sync_now().map(Some),
            _ => Ok(None),
        }
    }

    /// Replay the queue now. Only allowed while online.
    pub fn sync_now(&mut self) -> AppResult<SyncReport> {
        if !self.monitor.state().is_online() {
            return Err(AppError::Offline);
        }
        let student_id = self.active_id()?;
        SyncCoordinator::reconcile(
            &mut self.store,
            &student_id,
            &mut self.attendance,
            &mut self.queue,
        )
    }

    pub fn course_stats(&self, course_id: &str) -> CourseStats {
        self.attendance.course_stats(course_id)
    }

    /// Active student with the enrolled photo attached.
    pub fn student_with_photo(&self) -> AppResult<Student> {
        let student = self.student.clone().ok_or(AppError::NoActiveStudent)?;
        let photo: Option<String> = load_or_default(&self.store, &keys::photo(&student.id))?;
        Ok(match photo {
            Some(p) => student.with_photo(p),
            None => student,
        })
    }

    pub fn set_enrolled_photo(&mut self, student_id: &str, photo: &str) -> AppResult<()> {
        save_json(&mut self.store, &keys::photo(student_id), &photo)?;
        audit_quietly(&self.store, "photo", student_id, "Enrolled photo updated");
        Ok(())
    }

    pub fn student(&self) -> Option<&Student> {
        self.student.as_ref()
    }

    pub fn attendance(&self) -> &AttendanceStore {
        &self.attendance
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    pub fn connectivity(&self) -> Connectivity {
        self.monitor.state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;
    use crate::models::status::AttendanceStatus;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session_for(id: &str) -> Session<DbPool> {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let mut s = Session::open(pool).unwrap();
        s.switch_student(Student::new(id, "Kofi Mensah")).unwrap();
        s
    }

    #[test]
    fn marking_without_student_fails() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let mut s = Session::open(pool).unwrap();
        let r = s.mark("MIN101", AttendanceRecord::present(date(2024, 7, 15)));
        assert!(matches!(r, Err(AppError::NoActiveStudent)));
    }

    #[test]
    fn overwrite_keeps_single_record() {
        let mut s = session_for("UMAT2024001");
        s.mark("MIN101", AttendanceRecord::present(date(2024, 7, 15))).unwrap();
        let out = s.mark("MIN101", AttendanceRecord::absent(date(2024, 7, 15))).unwrap();

        assert_eq!(out, MarkOutcome::Applied(Upsert::Replaced));
        let records = s.attendance().records("MIN101");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);

        let persisted = AttendanceStore::load(s.store(), "UMAT2024001").unwrap();
        assert_eq!(persisted.records("MIN101"), records);
    }

    #[test]
    fn offline_write_syncs_on_reconnect() {
        let mut s = session_for("UMAT2024001");
        assert_eq!(s.set_connectivity(Connectivity::Offline).unwrap(), None);

        let out = s.mark("GEO202", AttendanceRecord::present(date(2024, 7, 20))).unwrap();
        assert_eq!(out, MarkOutcome::Queued(Upsert::Inserted));
        assert!(s.attendance().records("GEO202").is_empty());

        let report = s.set_connectivity(Connectivity::Online).unwrap().unwrap();
        assert_eq!(report.synced, 1);
        assert!(s.queue().is_empty());
        assert_eq!(
            s.attendance().records("GEO202"),
            &[AttendanceRecord::present(date(2024, 7, 20))]
        );
    }

    #[test]
    fn staying_online_does_not_sync() {
        let mut s = session_for("S1");
        assert_eq!(s.set_connectivity(Connectivity::Online).unwrap(), None);
    }

    #[test]
    fn queue_survives_a_reopen() {
        let mut s = session_for("S1");
        s.set_connectivity(Connectivity::Offline).unwrap();
        s.mark("GEO202", AttendanceRecord::present(date(2024, 7, 20))).unwrap();
        s.mark("GEO202", AttendanceRecord::absent(date(2024, 7, 20))).unwrap();

        let store = s.close().unwrap();
        let mut s = Session::open(store).unwrap();
        assert_eq!(s.connectivity(), Connectivity::Offline);
        assert_eq!(s.queue().len(), 1);

        s.set_connectivity(Connectivity::Online).unwrap();
        assert_eq!(
            s.attendance().records("GEO202"),
            &[AttendanceRecord::absent(date(2024, 7, 20))]
        );
    }

    #[test]
    fn online_mark_supersedes_stale_queue_entry() {
        let mut s = session_for("S1");
        s.set_connectivity(Connectivity::Offline).unwrap();
        s.mark("GEO202", AttendanceRecord::absent(date(2024, 7, 20))).unwrap();

        // Back online without replaying (e.g. a previous sync failed).
        s.monitor = ConnectivityMonitor::new(Connectivity::Online);
        s.mark("GEO202", AttendanceRecord::present(date(2024, 7, 20))).unwrap();
        assert!(s.queue().is_empty());

        s.sync_now().unwrap();
        assert_eq!(
            s.attendance().records("GEO202")[0].status,
            AttendanceStatus::Present
        );
    }

    #[test]
    fn switching_students_round_trips() {
        let mut s = session_for("A");
        s.mark("MIN101", AttendanceRecord::present(date(2024, 7, 15))).unwrap();
        s.mark("CSE305", AttendanceRecord::absent(date(2024, 7, 17))).unwrap();
        let a_data = s.attendance().clone();

        s.switch_student(Student::new("B", "Ama Owusu")).unwrap();
        assert_eq!(s.attendance().total_records(), 0);
        s.mark("MIN101", AttendanceRecord::absent(date(2024, 7, 15))).unwrap();

        s.switch_student(Student::new("A", "Kofi Mensah")).unwrap();
        assert_eq!(s.attendance(), &a_data);
    }

    #[test]
    fn inactive_student_queue_syncs_when_switched_back() {
        let mut s = session_for("A");
        s.set_connectivity(Connectivity::Offline).unwrap();
        s.mark("GEO202", AttendanceRecord::present(date(2024, 7, 20))).unwrap();

        s.switch_student(Student::new("B", "Ama Owusu")).unwrap();
        let report = s.set_connectivity(Connectivity::Online).unwrap().unwrap();
        assert_eq!(report.synced, 0);

        s.switch_student(Student::new("A", "Kofi Mensah")).unwrap();
        assert!(s.queue().is_empty());
        assert_eq!(
            s.attendance().records("GEO202"),
            &[AttendanceRecord::present(date(2024, 7, 20))]
        );

        let persisted = OfflineQueue::load(s.store(), "A").unwrap();
        assert!(persisted.is_empty());
        let persisted = AttendanceStore::load(s.store(), "A").unwrap();
        assert_eq!(persisted.records("GEO202").len(), 1);
    }

    #[test]
    fn switching_while_offline_keeps_queue_pending() {
        let mut s = session_for("A");
        s.set_connectivity(Connectivity::Offline).unwrap();
        s.mark("GEO202", AttendanceRecord::absent(date(2024, 7, 20))).unwrap();

        s.switch_student(Student::new("B", "Ama Owusu")).unwrap();
        s.switch_student(Student::new("A", "Kofi Mensah")).unwrap();
        assert_eq!(s.queue().len(), 1);
        assert!(s.attendance().records("GEO202").is_empty());
    }

    #[test]
    fn sync_requires_online() {
        let mut s = session_for("S1");
        s.set_connectivity(Connectivity::Offline).unwrap();
        assert!(matches!(s.sync_now(), Err(AppError::Offline)));
    }

    #[test]
    fn enrolled_photo_is_attached_on_demand() {
        let mut s = session_for("S1");
        assert_eq!(s.student_with_photo().unwrap().enrolled_photo_data_uri, None);

        s.set_enrolled_photo("S1", "data:image/png;base64,AAAA").unwrap();
        assert_eq!(
            s.student_with_photo().unwrap().enrolled_photo_data_uri.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }
}
