use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

pub const USAGE: &str =
    "Usage: commit-report -start=YYYY-MM-DD -end=YYYY-MM-DD -repos=path/to/repo1,path/to/repo2";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Git error: {0}")]
    Git(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl ReportError {
    /// Errors that only disqualify a single repository from the report.
    pub fn is_per_repository(&self) -> bool {
        matches!(self, ReportError::Git(_) | ReportError::Io(_))
    }
}
