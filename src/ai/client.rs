use super::{AttendanceOracle, ReportRequest, ReportSummary, VerificationRequest, VerificationResult};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const ENDPOINT_ENV: &str = "RATTENDANCE_AI_ENDPOINT";
const API_KEY_ENV: &str = "RATTENDANCE_AI_KEY";

/// JSON-over-HTTP client for the AI service.
///
/// One `Client` (and its connection pool) is shared by every request.
pub struct HttpOracle {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl HttpOracle {
    pub fn new(endpoint: Option<String>, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            api_key,
        })
    }

    /// Endpoint from `RATTENDANCE_AI_ENDPOINT`, falling back to the config file.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .or_else(|| cfg.ai_endpoint.clone());
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self::new(endpoint, api_key, Duration::from_secs(cfg.ai_timeout_secs))
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        let base = self
            .endpoint
            .as_deref()
            .ok_or_else(|| AppError::Config("AI endpoint not configured".into()))?;
        let url = format!("{}/{}", base.trim_end_matches('/'), path);

        let mut req = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send()?.error_for_status()?;
        Ok(resp.json::<T>()?)
    }
}

impl AttendanceOracle for HttpOracle {
    fn verify(&self, request: &VerificationRequest) -> AppResult<VerificationResult> {
        let result: VerificationResult = self.post("verify", request)?;
        result.validated().map_err(AppError::Other)
    }

    fn summarize(&self, request: &ReportRequest) -> AppResult<ReportSummary> {
        self.post("report", request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_endpoint_fails_without_network() {
        let oracle = HttpOracle::new(Some("  ".into()), None, Duration::from_secs(1)).unwrap();
        let req = VerificationRequest {
            live_photo_data_uri: "data:image/png;base64,AA==".into(),
            enrolled_photo_data_uri: "data:image/png;base64,AA==".into(),
        };
        assert!(matches!(oracle.verify(&req), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_endpoint_is_reported_on_every_call() {
        let oracle = HttpOracle::new(None, Some("secret".into()), Duration::from_secs(1)).unwrap();
        let req = ReportRequest {
            course_name: "Mineral Processing".into(),
            student_attendance: Vec::new(),
        };
        for _ in 0..3 {
            assert!(matches!(oracle.summarize(&req), Err(AppError::Config(_))));
        }
    }
}
