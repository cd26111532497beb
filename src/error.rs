//! Crate-level error type

use crate::config::ConfigError;
use crate::mapping::MappingError;
use crate::posts::PostError;
use crate::query::QueryError;
use crate::script::ScriptError;
use thiserror::Error;

/// Any error surfaced by the tag filter crate
#[derive(Debug, Error)]
pub enum TagFilterError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tag filter operations
pub type TagFilterResult<T> = Result<T, TagFilterError>;
