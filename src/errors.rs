//! Unified application error type.
//! All modules (db, core, ai, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid attendance status: {0} (use 'present' or 'absent')")]
    InvalidStatus(String),

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    #[error("Student already registered: {0}")]
    StudentExists(String),

    #[error("No active student. Run `student signup` or `student switch` first")]
    NoActiveStudent,

    #[error("No enrolled photo for student {0}")]
    NoEnrolledPhoto(String),

    // ---------------------------
    // Connectivity / sync
    // ---------------------------
    #[error("Cannot sync while offline")]
    Offline,

    #[error("Sync failed, {pending} record(s) kept in the offline queue: {reason}")]
    SyncFailed { pending: usize, reason: String },

    // ---------------------------
    // External AI service
    // ---------------------------
    #[error("Verification failed: could not complete the verification process ({0})")]
    VerificationFailed(String),

    #[error("Report generation failed: {0}")]
    ReportFailed(String),

    #[error("AI service error: {0}")]
    Http(#[from] reqwest::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
