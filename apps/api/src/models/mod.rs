pub mod student;
pub mod subject;
