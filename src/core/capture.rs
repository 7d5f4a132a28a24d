//! Photo capture: verify a live photo against the enrolled one, then mark
//! the student present.

use crate::ai::{AttendanceOracle, VerificationRequest, VerificationResult};
use crate::core::session::{MarkOutcome, Session};
use crate::db::kv::{KeyValueStore, audit_quietly};
use crate::errors::{AppError, AppResult};
use crate::models::course::Course;
use crate::models::record::AttendanceRecord;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The service flagged the capture; nothing was marked.
    Rejected(VerificationResult),
    /// Verified, but the user did not confirm.
    Declined(VerificationResult),
    Marked {
        verdict: VerificationResult,
        outcome: MarkOutcome,
    },
}

pub struct CaptureLogic;

impl CaptureLogic {
    /// Call the verification service. Any failure is reported as a failed
    /// verification, never as a negative match.
    pub fn verify(
        oracle: &dyn AttendanceOracle,
        live_photo_data_uri: &str,
        enrolled_photo_data_uri: &str,
    ) -> AppResult<VerificationResult> {
        let request = VerificationRequest {
            live_photo_data_uri: live_photo_data_uri.to_string(),
            enrolled_photo_data_uri: enrolled_photo_data_uri.to_string(),
        };
        oracle
            .verify(&request)
            .map_err(|e| AppError::VerificationFailed(e.to_string()))
    }

    /// Verify `live_photo_data_uri` for the active student and, once
    /// `confirm` accepts the verdict, mark them present in `course` on `date`.
    pub fn capture<S, F>(
        session: &mut Session<S>,
        oracle: &dyn AttendanceOracle,
        course: &Course,
        live_photo_data_uri: &str,
        date: NaiveDate,
        confirm: F,
    ) -> AppResult<CaptureOutcome>
    where
        S: KeyValueStore,
        F: FnOnce(&VerificationResult) -> AppResult<bool>,
    {
        let student = session.student_with_photo()?;
        let enrolled = student
            .enrolled_photo_data_uri
            .clone()
            .ok_or_else(|| AppError::NoEnrolledPhoto(student.id.clone()))?;

        let verdict = Self::verify(oracle, live_photo_data_uri, &enrolled)?;

        if verdict.is_impersonation {
            audit_quietly(
                session.store(),
                "capture",
                &course.id,
                &format!(
                    "Rejected for {} ({:.0}%): {}",
                    student.id,
                    verdict.confidence_pct(),
                    verdict.reason
                ),
            );
            return Ok(CaptureOutcome::Rejected(verdict));
        }

        if !confirm(&verdict)? {
            return Ok(CaptureOutcome::Declined(verdict));
        }

        let outcome = session.mark(&course.id, AttendanceRecord::present(date))?;
        Ok(CaptureOutcome::Marked { verdict, outcome })
    }
}
