//! Represents an abstract git object store.
//!
//! ## Design Goals
//!
//! Objects may be stored in many different mechanisms. This crate includes
//! an in-memory store (see [`InMemoryRepo`]); you could envision stores kept
//! on disk, on a remote file system, or in a database.

use std::sync::Arc;

use log::{trace, warn};

use crate::object::{Commit, Id, Kind, Object, Signature, Tree};

mod error;
pub use error::{Error, Result};

mod in_memory;
pub use in_memory::InMemoryRepo;

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing git objects.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: reading and writing
/// the raw bytes of an object by ID.
///
/// The provided methods build typed access on top of those: verifying and
/// parsing what was read, and creating new commits.
pub trait Repo {
    /// Returns the kind and raw content of the object with the given ID.
    ///
    /// Returns [`Error::ObjectNotFound`] if there is no such object.
    fn get_raw(&self, id: &Id) -> Result<(Kind, Arc<[u8]>)>;

    /// Stores an object and returns its ID.
    ///
    /// Storing the same kind and content again is a no-op that returns the same ID.
    fn put(&self, kind: Kind, data: &[u8]) -> Result<Id>;

    /// Returns true if an object with the given ID is stored.
    fn contains(&self, id: &Id) -> Result<bool> {
        match self.get_raw(id) {
            Ok(_) => Ok(true),
            Err(Error::ObjectNotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Reads and parses the object with the given ID.
    ///
    /// The object is parsed as the kind it was stored with. The content is
    /// re-hashed first; if it doesn't match `id`, [`Error::Corrupt`] is returned.
    fn get(&self, id: &Id) -> Result<Object> {
        let (kind, data) = self.get_raw(id)?;

        let actual = Id::for_object(kind, &data);
        if actual != *id {
            warn!("object {} is corrupt: content hashes to {}", id, actual);
            return Err(Error::Corrupt { id: *id, actual });
        }

        trace!("read {} {} ({} bytes)", kind, id, data.len());

        Object::parse(kind, &data).map_err(|source| Error::Malformed { id: *id, source })
    }

    /// Reads the commit with the given ID.
    fn get_commit(&self, id: &Id) -> Result<Commit> {
        match self.get(id)? {
            Object::Commit(commit) => Ok(commit),
            other => Err(Error::UnexpectedKind {
                id: *id,
                expected: Kind::Commit,
                actual: other.kind(),
            }),
        }
    }

    /// Reads the tree with the given ID.
    fn get_tree(&self, id: &Id) -> Result<Tree> {
        match self.get(id)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(Error::UnexpectedKind {
                id: *id,
                expected: Kind::Tree,
                actual: other.kind(),
            }),
        }
    }

    /// Creates a new commit in this repo and returns its ID.
    ///
    /// See [`Commit::create`].
    fn create_commit(
        &self,
        author: Signature,
        committer: Signature,
        message: &str,
        tree_id: Id,
        parent_ids: &[Id],
    ) -> Result<Id> {
        Commit::create(author, committer, message, tree_id, parent_ids, self)
    }
}
