pub mod attendance;
pub mod backup;
pub mod capture;
pub mod connectivity;
pub mod demo;
pub mod keys;
pub mod log;
pub mod queue;
pub mod report;
pub mod session;
pub mod stats;
pub mod student;
pub mod sync;
