//! Errors raised while building or writing a report design document.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("skeleton is not well-formed markup: {message}")]
    SkeletonParse { message: String },

    #[error("skeleton has no root element")]
    MissingRoot,

    #[error("xml write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid utf-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DesignError {
    pub(crate) fn parse(message: impl std::fmt::Display) -> Self {
        DesignError::SkeletonParse {
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
