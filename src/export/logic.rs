// src/export/logic.rs

use crate::core::session::Session;
use crate::db::pool::DbPool;
use crate::db::queries::{load_courses, require_course};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::records_to_rows;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the active student's attendance records.
    ///
    /// - `file`: absolute path of the output file
    /// - `course`: restrict the export to one course
    /// - `force`: overwrite an existing file without asking
    ///
    /// Returns the number of rows written.
    pub fn export(
        session: &Session<DbPool>,
        format: ExportFormat,
        file: &str,
        course: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let student = session.student().ok_or(AppError::NoActiveStudent)?;

        let only_course = match course {
            Some(c) => Some(require_course(session.store(), Some(c))?.id),
            None => None,
        };

        let courses = load_courses(session.store())?;
        let rows = records_to_rows(
            &student.id,
            session.attendance(),
            &courses,
            only_course.as_deref(),
        );

        if rows.is_empty() {
            warning("No attendance records to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
