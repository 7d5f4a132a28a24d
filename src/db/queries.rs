use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::course::Course;
use crate::models::student::Student;
use chrono::Local;
use rusqlite::{OptionalExtension, Result, Row, params};

fn map_course(row: &Row) -> Result<Course> {
    Ok(Course {
        id: row.get("id")?,
        name: row.get("name")?,
        total_classes: row.get("total_classes")?,
    })
}

fn map_student(row: &Row) -> Result<Student> {
    Ok(Student::new(
        row.get::<_, String>("id")?,
        row.get::<_, String>("name")?,
    ))
}

pub fn load_courses(pool: &DbPool) -> AppResult<Vec<Course>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, name, total_classes FROM courses ORDER BY id ASC")?;

    let rows = stmt.query_map([], map_course)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_course(pool: &DbPool, id: &str) -> AppResult<Option<Course>> {
    let course = pool
        .conn
        .query_row(
            "SELECT id, name, total_classes FROM courses WHERE id = ?1",
            [id.trim().to_uppercase()],
            map_course,
        )
        .optional()?;
    Ok(course)
}

/// Resolve a course id typed by the user, rejecting blanks and unknown ids.
pub fn require_course(pool: &DbPool, id: Option<&str>) -> AppResult<Course> {
    let id = id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::MissingInput("no course selected (use --course)".into()))?;

    find_course(pool, id)?.ok_or_else(|| AppError::UnknownCourse(id.to_string()))
}

pub fn load_students(pool: &DbPool) -> AppResult<Vec<Student>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, name FROM students ORDER BY name ASC, id ASC")?;

    let rows = stmt.query_map([], map_student)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_student(pool: &DbPool, id: &str) -> AppResult<Option<Student>> {
    let student = pool
        .conn
        .query_row(
            "SELECT id, name FROM students WHERE id = ?1",
            [id.trim()],
            map_student,
        )
        .optional()?;
    Ok(student)
}

pub fn insert_student(pool: &DbPool, student: &Student) -> AppResult<()> {
    if find_student(pool, &student.id)?.is_some() {
        return Err(AppError::StudentExists(student.id.clone()));
    }

    pool.conn.execute(
        "INSERT INTO students (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![student.id, student.name, Local::now().to_rfc3339()],
    )?;
    Ok(())
}
