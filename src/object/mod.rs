//! Represents the git concept of an "object": a typed blob of bytes
//! identified by the hash of its kind, length, and content.
//!
//! Each kind of object has its own type ([`Blob`], [`Tree`], [`Commit`], [`Tag`]).
//! [`Object`] wraps whichever of these was read from a repository.

use thiserror::Error;

mod blob;
pub use blob::Blob;

mod commit;
pub use commit::{Commit, ParseCommitError};

mod id;
pub use id::{Id, ParseIdError, HEX_LEN, ID_LEN};

mod kind;
pub use kind::{Kind, ParseKindError};

pub(crate) mod parse_utils;

mod signature;
pub use signature::{Signature, SignatureError};

mod tag;
pub use tag::{ParseTagError, Tag};

mod tree;
pub use tree::{FileMode, ParseTreeError, Tree, TreeEntry};

/// An error which can be returned when an object's content doesn't
/// parse as the kind it was stored as.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseObjectError {
    #[error("malformed commit: {0}")]
    Commit(#[from] ParseCommitError),

    #[error("malformed tree: {0}")]
    Tree(#[from] ParseTreeError),

    #[error("malformed tag: {0}")]
    Tag(#[from] ParseTagError),
}

/// Any git object, as read from a repository.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Parses `data` as an object of the given kind.
    pub fn parse(kind: Kind, data: &[u8]) -> Result<Object, ParseObjectError> {
        Ok(match kind {
            Kind::Blob => Object::Blob(Blob::new(data)),
            Kind::Tree => Object::Tree(Tree::parse(data)?),
            Kind::Commit => Object::Commit(Commit::parse(data)?),
            Kind::Tag => Object::Tag(Tag::parse(data)?),
        })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Object::Blob(_) => Kind::Blob,
            Object::Tree(_) => Kind::Tree,
            Object::Commit(_) => Kind::Commit,
            Object::Tag(_) => Kind::Tag,
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Object::Blob(b) => b.id(),
            Object::Tree(t) => t.id(),
            Object::Commit(c) => c.id(),
            Object::Tag(t) => t.id(),
        }
    }

    /// Returns the object's canonical content bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Object::Blob(b) => b.as_bytes(),
            Object::Tree(t) => t.as_bytes(),
            Object::Commit(c) => c.as_bytes(),
            Object::Tag(t) => t.as_bytes(),
        }
    }

    pub fn into_commit(self) -> Option<Commit> {
        match self {
            Object::Commit(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_blob(self) -> Option<Blob> {
        match self {
            Object::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_tag(self) -> Option<Tag> {
        match self {
            Object::Tag(t) => Some(t),
            _ => None,
        }
    }
}
