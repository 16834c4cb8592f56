use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that stop a report from being generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No courses found for program '{program}' in semester '{semester}'")]
    EmptyCatalog { program: String, semester: String },
}
