//! Key layout of the persistent store.
//! Per-student slices are namespaced so that switching students never mixes
//! histories or pending writes.

pub const ACTIVE_STUDENT: &str = "session:student";
pub const CONNECTIVITY: &str = "session:connectivity";

pub fn attendance(student_id: &str) -> String {
    format!("attendance:{student_id}")
}

pub fn queue(student_id: &str) -> String {
    format!("queue:{student_id}")
}

pub fn photo(student_id: &str) -> String {
    format!("photo:{student_id}")
}
