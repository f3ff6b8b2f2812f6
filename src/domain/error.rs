//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent links-file format and business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("bad config at {}, line without title at line {line}: '{content}'", path.display())]
    LinkBeforeTitle {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("bad config at {}, duplicate title found: '{title}' on line {line}", path.display())]
    DuplicateTitle {
        path: PathBuf,
        line: usize,
        title: String,
    },

    #[error("{0} not in config file")]
    TitleNotFound(String),

    #[error("title already exists: {0}")]
    TitleExists(String),

    #[error("invalid title '{title}': {reason}")]
    InvalidTitle { title: String, reason: String },

    #[error("invalid link '{link}': {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("index {index} out of range (title has {len} links)")]
    IndexOutOfRange { index: usize, len: usize },
}
