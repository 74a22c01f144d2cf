use faultline_error::{
    Classify, DefectError, Domain, ExternalError, Failure, Subkind, terminate::panic_message,
};
use thiserror::Error;

/// Failures that originate in the CLI itself rather than in the layers it drives.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("could not read from the terminal: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("`max_attempts` must be at least 1")]
    NoAttempts,
}

impl From<CliError> for Failure {
    fn from(e: CliError) -> Failure {
        let message = e.to_string();
        let failure: Failure = match e {
            CliError::Config(config::ConfigError::NotFound(_)) => {
                Failure::external(message).with_subkind(Subkind::NOT_FOUND)
            }
            CliError::Config(config::ConfigError::Frozen) => {
                Failure::defect(message).with_subkind(Subkind::ILLEGAL_STATE)
            }
            CliError::Config(_) => {
                Failure::external(message).with_subkind(Subkind::MALFORMED_INPUT)
            }
            CliError::Prompt(io) => {
                let failure = Failure::new(Classify::kind(&io), message);
                match Classify::subkind(&io) {
                    Some(subkind) => failure.with_subkind(subkind),
                    None => failure,
                }
            }
            CliError::Join(join) if join.is_panic() => {
                DefectError::Panicked(panic_message(&*join.into_panic())).into()
            }
            CliError::Join(_) => {
                ExternalError::Interrupted("background task was cancelled".into()).into()
            }
            CliError::NoAttempts => {
                DefectError::invalid_argument("max_attempts", "must be at least 1").into()
            }
        };
        failure.in_domain(Domain::CLI)
    }
}
