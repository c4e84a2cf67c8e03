use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Describes the fundamental git object type (blob, tree, commit, or tag).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
///
/// The kind is recorded alongside every stored object; it is never inferred
/// from the shape of the content.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
}

/// Returned when a string is not the name of any object kind.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown object type `{0}`")]
pub struct ParseKindError(pub String);

impl Kind {
    /// Returns the name git uses for this kind in object headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
            Kind::Tag => "tag",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Kind::Blob),
            "tree" => Ok(Kind::Tree),
            "commit" => Ok(Kind::Commit),
            "tag" => Ok(Kind::Tag),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}
