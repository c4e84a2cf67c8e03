use std::fmt::{self, Write};
use std::str::FromStr;

use sha1::{Digest, Sha1};
use thiserror::Error;

use super::Kind;

/// Number of bytes in a (SHA-1) object ID.
pub const ID_LEN: usize = 20;

/// Number of hex digits in the string form of an object ID.
pub const HEX_LEN: usize = ID_LEN * 2;

/// An error which can be returned when parsing a git object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID string is too large to store in target integer type.
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID string is too small to store in target integer type.
    #[error("value is less than 40 digits long")]
    Underflow,

    /// Value was zero where a real object ID is required
    /// (inside a commit, tag, or tree).
    #[error("ID would be zero")]
    Zero,
}

/// An object ID is a string that identifies an object within a repository.
/// It is stored as a 20-byte signature, but can also be represented as 40 hex digits.
///
/// Comparisons and ordering are byte-wise.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut bytes = [0u8; ID_LEN];
                bytes.copy_from_slice(id);
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 hex digits.
    /// Either case is accepted; the ID always displays in lowercase.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            HEX_LEN => {
                let mut bytes = [0u8; ID_LEN];
                for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }

                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < HEX_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Computes the SHA-1 hash of an arbitrary byte sequence.
    pub fn hash<T: AsRef<[u8]>>(data: T) -> Id {
        let digest = Sha1::digest(data.as_ref());
        Id::from_digest(digest.as_slice())
    }

    /// Computes the ID git assigns to an object of the given kind and content.
    ///
    /// The hash covers a `<kind> <length>\0` header followed by the content.
    /// This is functionally equivalent to
    /// [`git hash-object -t <kind>`](https://git-scm.com/docs/git-hash-object).
    pub fn for_object(kind: Kind, content: &[u8]) -> Id {
        let mut hasher = Sha1::new();

        hasher.update(kind.to_string());
        hasher.update(b" ");
        hasher.update(content.len().to_string());
        hasher.update(b"\0");
        hasher.update(content);

        Id::from_digest(hasher.finalize().as_slice())
    }

    /// Returns true if every byte is zero. No object hashes to this ID.
    pub fn is_zero(&self) -> bool {
        self.id.iter().all(|x| *x == 0)
    }

    /// Returns the raw 20-byte form of this ID.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    fn from_digest(digest: &[u8]) -> Id {
        // SHA-1 always yields 20 bytes, and a zero digest is not a concern.
        let mut id = [0u8; ID_LEN];
        id.copy_from_slice(digest);
        Id { id }
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self)
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
