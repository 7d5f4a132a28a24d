//! Lecturer roll-up: per-student standing in one course across every
//! registered student.

use crate::ai::{AttendanceOracle, ReportRequest, ReportRow};
use crate::config::Config;
use crate::core::attendance::AttendanceStore;
use crate::core::stats::CourseStats;
use crate::db::kv::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::course::Course;
use crate::models::student::Student;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standing {
    Good,
    AtRisk,
    Poor,
}

impl Standing {
    pub fn label(&self) -> &'static str {
        match self {
            Standing::Good => "Good",
            Standing::AtRisk => "At Risk",
            Standing::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub at_risk: f64,
    pub poor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            at_risk: 75.0,
            poor: 50.0,
        }
    }
}

impl Thresholds {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            at_risk: cfg.at_risk_threshold,
            poor: cfg.poor_threshold,
        }
    }

    pub fn classify(&self, percentage: f64) -> Standing {
        if percentage >= self.at_risk {
            Standing::Good
        } else if percentage >= self.poor {
            Standing::AtRisk
        } else {
            Standing::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub student: Student,
    pub stats: CourseStats,
    pub standing: Standing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRoster {
    pub course: Course,
    /// Sorted by ascending percentage.
    pub entries: Vec<RosterEntry>,
    /// Course-wide counters over every student.
    pub overall: CourseStats,
}

impl CourseRoster {
    pub fn student_count(&self) -> usize {
        self.entries.len()
    }

    pub fn to_report_request(&self) -> ReportRequest {
        ReportRequest {
            course_name: self.course.name.clone(),
            student_attendance: self
                .entries
                .iter()
                .map(|e| ReportRow {
                    name: e.student.name.clone(),
                    id: e.student.id.clone(),
                    percentage: (e.stats.percentage * 10.0).round() / 10.0,
                    status: e.standing.label().to_string(),
                })
                .collect(),
        }
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Build the roster of `course` for `students`, reading each student's
    /// persisted history from `store`.
    pub fn build_roster<S: KeyValueStore + ?Sized>(
        store: &S,
        course: &Course,
        students: &[Student],
        thresholds: Thresholds,
    ) -> AppResult<CourseRoster> {
        let mut entries = Vec::with_capacity(students.len());
        let mut overall = CourseStats::default();

        for student in students {
            let stats = AttendanceStore::load(store, &student.id)?.course_stats(&course.id);
            overall = overall.combine(stats);
            entries.push(RosterEntry {
                student: student.clone(),
                stats,
                standing: thresholds.classify(stats.percentage),
            });
        }

        entries.sort_by(|a, b| a.stats.percentage.total_cmp(&b.stats.percentage));

        Ok(CourseRoster {
            course: course.clone(),
            entries,
            overall,
        })
    }

    /// Ask the oracle for a narrative summary of `roster`.
    pub fn summarize(oracle: &dyn AttendanceOracle, roster: &CourseRoster) -> AppResult<String> {
        oracle
            .summarize(&roster.to_report_request())
            .map(|s| s.report)
            .map_err(|e| AppError::ReportFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ReportSummary, VerificationRequest, VerificationResult};
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;
    use crate::models::record::AttendanceRecord;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn geo() -> Course {
        Course {
            id: "GEO202".into(),
            name: "Structural Geology".into(),
            total_classes: Some(24),
        }
    }

    fn seed(pool: &mut DbPool, id: &str, statuses: &[bool]) {
        let mut store = AttendanceStore::default();
        for (i, present) in statuses.iter().enumerate() {
            let date = day(15 + i as u32);
            let record = if *present {
                AttendanceRecord::present(date)
            } else {
                AttendanceRecord::absent(date)
            };
            store.upsert("GEO202", record);
        }
        store.save(pool, id).unwrap();
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let t = Thresholds::default();
        assert_eq!(t.classify(75.0), Standing::Good);
        assert_eq!(t.classify(74.9), Standing::AtRisk);
        assert_eq!(t.classify(50.0), Standing::AtRisk);
        assert_eq!(t.classify(49.9), Standing::Poor);
        assert_eq!(t.classify(0.0), Standing::Poor);
    }

    #[test]
    fn roster_is_sorted_by_percentage() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        seed(&mut pool, "A", &[true, true, true, true]);
        seed(&mut pool, "B", &[true, false, false]);
        seed(&mut pool, "C", &[true, true, false]);

        let students = vec![
            Student::new("A", "Ama"),
            Student::new("B", "Bright"),
            Student::new("C", "Comfort"),
        ];
        let roster =
            ReportLogic::build_roster(&pool, &geo(), &students, Thresholds::default()).unwrap();

        let ids: Vec<&str> = roster.entries.iter().map(|e| e.student.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
        assert_eq!(roster.entries[0].standing, Standing::Poor);
        assert_eq!(roster.entries[1].standing, Standing::AtRisk);
        assert_eq!(roster.entries[2].standing, Standing::Good);
        assert_eq!((roster.overall.present, roster.overall.total), (7, 10));
        assert_eq!(roster.student_count(), 3);
    }

    #[test]
    fn student_without_records_is_poor_at_zero() {
        let pool = {
            let p = DbPool::in_memory().unwrap();
            init_db(&p.conn).unwrap();
            p
        };
        let roster = ReportLogic::build_roster(
            &pool,
            &geo(),
            &[Student::new("Z", "Zed")],
            Thresholds::default(),
        )
        .unwrap();
        assert_eq!(roster.entries[0].stats.percentage, 0.0);
        assert_eq!(roster.entries[0].standing, Standing::Poor);
    }

    struct FailingOracle;

    impl AttendanceOracle for FailingOracle {
        fn verify(&self, _: &VerificationRequest) -> AppResult<VerificationResult> {
            Err(AppError::Other("unreachable".into()))
        }
        fn summarize(&self, _: &ReportRequest) -> AppResult<ReportSummary> {
            Err(AppError::Other("timeout".into()))
        }
    }

    #[test]
    fn summary_failure_is_a_report_error() {
        let roster = CourseRoster {
            course: geo(),
            entries: vec![],
            overall: CourseStats::default(),
        };
        let err = ReportLogic::summarize(&FailingOracle, &roster).unwrap_err();
        assert!(matches!(err, AppError::ReportFailed(_)));
    }
}
