//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add terminal I/O concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// No answer could be read for an interactive prompt
    #[error("could not read {what}: {source}")]
    Prompt {
        what: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Prompt failure for the answer described by `what` ("link", "index", ...).
    pub fn prompt(what: impl Into<String>, source: std::io::Error) -> Self {
        Self::Prompt {
            what: what.into(),
            source,
        }
    }

    /// Input was closed (Ctrl-D) rather than broken.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::Prompt { source, .. } if source.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn given_eof_when_prompting_then_end_of_input() {
        let err = InfraError::prompt(
            "index",
            io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"),
        );

        assert!(err.is_end_of_input());
        assert_eq!(err.to_string(), "could not read index: end of input");
    }

    #[test]
    fn given_broken_pipe_when_prompting_then_not_end_of_input() {
        let err = InfraError::prompt("link", io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!err.is_end_of_input());
    }
}
