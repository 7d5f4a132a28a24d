pub mod course;
pub mod queue_item;
pub mod record;
pub mod status;
pub mod student;
