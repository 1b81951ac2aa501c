//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("{failed} case(s) failed")]
    CasesFailed { failed: usize },

    #[error("cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::from(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::CasesFailed { .. } => exitcode::FAILURE,
            CliError::Output(_) => exitcode::SOFTWARE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_)
                    | ApplicationError::UnsupportedFunction(_)
                    | ApplicationError::UnsupportedReturnType { .. }
                    | ApplicationError::InvalidCaseFile { .. } => exitcode::DATAERR,
                    ApplicationError::ProblemsDirNotFound(_) => exitcode::NOINPUT,
                    ApplicationError::Config { .. } => exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_error_when_converted_then_data_error_exit_code() {
        let err = CliError::from(DomainError::EmptyNumber);
        assert_eq!(err.exit_code(), exitcode::DATAERR);
        assert_eq!(err.to_string(), "number has no digits");
    }

    #[test]
    fn given_failed_cases_when_exiting_then_plain_failure() {
        let err = CliError::CasesFailed { failed: 2 };
        assert_eq!(err.exit_code(), exitcode::FAILURE);
        assert_eq!(err.to_string(), "2 case(s) failed");
    }

    #[test]
    fn given_missing_problems_dir_when_exiting_then_no_input() {
        let err = CliError::from(ApplicationError::ProblemsDirNotFound("x".into()));
        assert_eq!(err.exit_code(), exitcode::NOINPUT);
    }
}
