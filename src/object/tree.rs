use std::collections::HashSet;
use std::fmt;
use std::str;

use thiserror::Error;

use super::{parse_utils, Id, Kind, ParseIdError, ID_LEN};

/// Describes the file type as represented on disk.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
}

impl FileMode {
    /// Convert from git file-mode integer to `FileMode` enum.
    ///
    /// Returns `None` if the value is not one of the recognized constants.
    pub fn from_value(value: u32) -> Option<FileMode> {
        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o120000 => Some(FileMode::SymbolicLink),
            0o040000 => Some(FileMode::Tree),
            0o160000 => Some(FileMode::Submodule),
            _ => None,
        }
    }

    /// Convert from `FileMode` enum to git file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::SymbolicLink => 0o120000,
            FileMode::Tree => 0o040000,
            FileMode::Submodule => 0o160000,
        }
    }

    /// Parse the octal mode as written in a tree record (no leading zeros).
    fn from_octal_slice(s: &[u8]) -> Option<FileMode> {
        if s.is_empty() || s.starts_with(b"0") {
            return None;
        }

        let s = str::from_utf8(s).ok()?;
        FileMode::from_value(u32::from_str_radix(s, 8).ok()?)
    }
}

/// An error which can be returned when parsing or building a tree.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseTreeError {
    #[error("invalid file mode `{0}`")]
    InvalidMode(String),

    #[error("invalid entry name `{0}`")]
    InvalidName(String),

    #[error("entry `{0}` is truncated")]
    Truncated(String),

    #[error("entry `{name}` has an invalid object ID: {source}")]
    InvalidId {
        name: String,
        #[source]
        source: ParseIdError,
    },

    #[error("entry `{0}` is out of order")]
    NotSorted(String),

    #[error("duplicate entry `{0}`")]
    DuplicateName(String),
}

/// A single record in a tree: a named reference to a blob, subtree, or submodule commit.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TreeEntry {
    mode: FileMode,
    name: Vec<u8>,
    id: Id,
}

impl TreeEntry {
    /// Creates a new tree entry. The name is an uninterpreted sequence of bytes,
    /// not necessarily UTF-8.
    pub fn new<N: Into<Vec<u8>>>(mode: FileMode, name: N, id: Id) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.into(),
            id,
        }
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Returns the name if it is valid UTF-8.
    pub fn name_str(&self) -> Option<&str> {
        str::from_utf8(&self.name).ok()
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the kind of object this entry points to.
    pub fn kind(&self) -> Kind {
        match self.mode {
            FileMode::Tree => Kind::Tree,
            FileMode::Submodule => Kind::Commit,
            _ => Kind::Blob,
        }
    }
}

/// A git tree object: an ordered directory listing.
///
/// Like every object in this crate, a `Tree` is immutable once constructed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    id: Id,
    entries: Vec<TreeEntry>,
    data: Vec<u8>,
}

impl Tree {
    /// Builds a tree from a set of entries, sorting them into git's canonical order.
    pub fn new(mut entries: Vec<TreeEntry>) -> Result<Tree, ParseTreeError> {
        entries.sort_by(|a, b| entry_cmp(&a.name, a.mode, &b.name, b.mode));

        let mut names = HashSet::new();
        let mut data = Vec::new();

        for entry in entries.iter() {
            check_name(&entry.name)?;
            if !names.insert(entry.name.as_slice()) {
                return Err(ParseTreeError::DuplicateName(lossy(&entry.name)));
            }

            data.extend_from_slice(format!("{:o} ", entry.mode.to_value()).as_bytes());
            data.extend_from_slice(&entry.name);
            data.push(0);
            data.extend_from_slice(entry.id.as_bytes());
        }

        Ok(Tree {
            id: Id::for_object(Kind::Tree, &data),
            entries,
            data,
        })
    }

    /// Parses the content of a tree object.
    ///
    /// Each record is `<octal mode> <name>\0<20-byte object ID>`.
    /// Records must be in git's canonical order with no duplicate names.
    pub fn parse(data: &[u8]) -> Result<Tree, ParseTreeError> {
        let mut entries: Vec<TreeEntry> = Vec::new();
        let mut names = HashSet::new();
        let mut rest = data;

        while !rest.is_empty() {
            let nul = match rest.iter().position(|b| *b == 0) {
                Some(n) => n,
                None => return Err(ParseTreeError::Truncated(lossy(rest))),
            };

            let record = &rest[..nul];
            if !record.contains(&b' ') {
                return Err(ParseTreeError::InvalidMode(lossy(record)));
            }

            let (mode, name) = parse_utils::split_once(record, &b' ');
            let mode = FileMode::from_octal_slice(mode)
                .ok_or_else(|| ParseTreeError::InvalidMode(lossy(mode)))?;
            check_name(name)?;

            let id_start = nul + 1;
            if rest.len() < id_start + ID_LEN {
                return Err(ParseTreeError::Truncated(lossy(name)));
            }

            let id = Id::new(&rest[id_start..id_start + ID_LEN])
                .and_then(|id| {
                    if id.is_zero() {
                        Err(ParseIdError::Zero)
                    } else {
                        Ok(id)
                    }
                })
                .map_err(|source| ParseTreeError::InvalidId {
                    name: lossy(name),
                    source,
                })?;

            if let Some(previous) = entries.last() {
                if entry_cmp(&previous.name, previous.mode, name, mode) != std::cmp::Ordering::Less
                {
                    return Err(ParseTreeError::NotSorted(lossy(name)));
                }
            }

            if !names.insert(name) {
                return Err(ParseTreeError::DuplicateName(lossy(name)));
            }

            entries.push(TreeEntry::new(mode, name, id));
            rest = &rest[id_start + ID_LEN..];
        }

        Ok(Tree {
            id: Id::for_object(Kind::Tree, data),
            entries,
            data: data.to_vec(),
        })
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Finds the entry with the given name.
    pub fn get<N: AsRef<[u8]>>(&self, name: N) -> Option<&TreeEntry> {
        let name = name.as_ref();
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the canonical encoding of this tree.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries.iter() {
            writeln!(
                f,
                "{:06o} {} {}\t{}",
                entry.mode.to_value(),
                entry.kind(),
                entry.id,
                lossy(&entry.name)
            )?;
        }
        Ok(())
    }
}

fn check_name(name: &[u8]) -> Result<(), ParseTreeError> {
    if name.is_empty() || name == b"." || name == b".." || name.contains(&b'/') || name.contains(&0)
    {
        Err(ParseTreeError::InvalidName(lossy(name)))
    } else {
        Ok(())
    }
}

/// Trees are sorted as though their name ends with `/`.
fn entry_cmp(l: &[u8], lmode: FileMode, r: &[u8], rmode: FileMode) -> std::cmp::Ordering {
    let lsuffix: &[u8] = if lmode == FileMode::Tree { b"/" } else { b"" };
    let rsuffix: &[u8] = if rmode == FileMode::Tree { b"/" } else { b"" };

    l.iter()
        .chain(lsuffix.iter())
        .cmp(r.iter().chain(rsuffix.iter()))
}

fn lossy(s: &[u8]) -> String {
    String::from_utf8_lossy(s).into_owned()
}
