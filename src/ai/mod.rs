//! Contract with the external AI service: photo verification and course
//! report summaries. The decision logic lives entirely on the service side;
//! this module only shapes the payloads and checks what comes back.

pub mod client;
pub mod data_uri;

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};

pub use client::HttpOracle;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub live_photo_data_uri: String,
    pub enrolled_photo_data_uri: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_impersonation: bool,
    /// Likelihood of a valid, in-class attendance, in [0, 1].
    pub confidence: f64,
    pub reason: String,
}

impl VerificationResult {
    /// Reject judgments whose confidence is not a probability.
    pub fn validated(self) -> Result<Self, String> {
        if self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence) {
            Ok(self)
        } else {
            Err(format!("confidence out of range: {}", self.confidence))
        }
    }

    pub fn confidence_pct(&self) -> f64 {
        self.confidence * 100.0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub course_name: String,
    pub student_attendance: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub id: String,
    pub percentage: f64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSummary {
    pub report: String,
}

/// The external model, seen as an opaque oracle.
pub trait AttendanceOracle {
    fn verify(&self, request: &VerificationRequest) -> AppResult<VerificationResult>;
    fn summarize(&self, request: &ReportRequest) -> AppResult<ReportSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_judgment() {
        let raw = r#"{"isImpersonation":false,"confidence":0.93,"reason":"Excellent face match and classroom background detected."}"#;
        let r: VerificationResult = serde_json::from_str(raw).unwrap();
        assert!(!r.is_impersonation);
        assert_eq!(r.clone().validated().unwrap(), r);
        assert!((r.confidence_pct() - 93.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_confidence_outside_unit_interval() {
        let r = VerificationResult {
            is_impersonation: false,
            confidence: 1.7,
            reason: String::new(),
        };
        assert!(r.validated().is_err());
    }

    #[test]
    fn request_uses_camel_case_fields() {
        let req = ReportRequest {
            course_name: "Structural Geology".into(),
            student_attendance: vec![ReportRow {
                name: "Kofi Mensah".into(),
                id: "UMAT2024001".into(),
                percentage: 66.7,
                status: "At Risk".into(),
            }],
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["courseName"], "Structural Geology");
        assert_eq!(v["studentAttendance"][0]["status"], "At Risk");
    }
}
