use crate::core::session::Session;
use crate::db::kv::audit_quietly;
use crate::db::pool::DbPool;
use crate::db::queries::{find_student, insert_student};
use crate::errors::{AppError, AppResult};
use crate::models::student::{PLACEHOLDER_PHOTO, Student};

pub struct StudentLogic;

impl StudentLogic {
    /// Register a student and make them active. Without a photo the
    /// placeholder reference is enrolled.
    pub fn signup(
        session: &mut Session<DbPool>,
        id: &str,
        name: &str,
        photo_data_uri: Option<String>,
    ) -> AppResult<Student> {
        let id = id.trim();
        let name = name.trim();
        if id.is_empty() {
            return Err(AppError::MissingInput("student id".into()));
        }
        if name.is_empty() {
            return Err(AppError::MissingInput("student name".into()));
        }

        let student = Student::new(id, name);
        insert_student(session.store(), &student)?;
        audit_quietly(session.store(), "signup", id, &format!("Registered {}", name));

        let photo = photo_data_uri.unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string());
        session.set_enrolled_photo(id, &photo)?;
        session.switch_student(student.clone())?;

        Ok(student)
    }

    /// Make a registered student active.
    pub fn switch(session: &mut Session<DbPool>, id: &str) -> AppResult<Student> {
        let student = find_student(session.store(), id)?
            .ok_or_else(|| AppError::UnknownStudent(id.trim().to_string()))?;
        session.switch_student(student.clone())?;
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn session() -> Session<DbPool> {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        Session::open(pool).unwrap()
    }

    #[test]
    fn signup_activates_and_enrolls_placeholder() {
        let mut s = session();
        StudentLogic::signup(&mut s, "UMAT2024002", "Ama Owusu", None).unwrap();

        let active = s.student_with_photo().unwrap();
        assert_eq!(active.id, "UMAT2024002");
        assert_eq!(active.enrolled_photo_data_uri.as_deref(), Some(PLACEHOLDER_PHOTO));
    }

    #[test]
    fn duplicate_signup_is_rejected() {
        let mut s = session();
        StudentLogic::signup(&mut s, "S1", "Ama", None).unwrap();
        let err = StudentLogic::signup(&mut s, "S1", "Ama", None).unwrap_err();
        assert!(matches!(err, AppError::StudentExists(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut s = session();
        let err = StudentLogic::signup(&mut s, "S1", "  ", None).unwrap_err();
        assert!(matches!(err, AppError::MissingInput(_)));
        assert!(s.student().is_none());
    }

    #[test]
    fn switch_requires_registration() {
        let mut s = session();
        let err = StudentLogic::switch(&mut s, "NOPE").unwrap_err();
        assert!(matches!(err, AppError::UnknownStudent(_)));
    }
}
