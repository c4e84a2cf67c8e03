use thiserror::Error;

use crate::object::{Id, Kind, ParseObjectError};

/// Describes the potential error conditions that might arise from `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("object {id} is a {actual}, not a {expected}")]
    UnexpectedKind { id: Id, expected: Kind, actual: Kind },

    #[error("object {id} is malformed: {source}")]
    Malformed {
        id: Id,
        #[source]
        source: ParseObjectError,
    },

    #[error("object {id} is corrupt: its content hashes to {actual}")]
    Corrupt { id: Id, actual: Id },

    #[error("object store lock was poisoned")]
    Poisoned,

    /// Not produced by `InMemoryRepo`. For `Repo` backends that read and
    /// write objects through the file system or network.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Not produced by `InMemoryRepo`. For `Repo` backends whose storage
    /// layer has its own error type.
    #[error(transparent)]
    OtherError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A specialized `Result` type for `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
