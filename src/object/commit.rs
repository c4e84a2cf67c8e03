use std::borrow::Cow;
use std::str;
use std::sync::{Arc, OnceLock};

use log::{debug, trace};
use thiserror::Error;

use super::parse_utils::{self, HeaderLines};
use super::{Id, Kind, ParseIdError, Signature, SignatureError, Tree};
use crate::repo::{Repo, Result};

const TREE: &[u8] = b"tree";
const PARENT: &[u8] = b"parent";
const AUTHOR: &[u8] = b"author";
const COMMITTER: &[u8] = b"committer";
const ENCODING: &str = "encoding";

/// Names the `encoding` header may use for ISO-8859-1.
const LATIN1: &[&str] = &["iso-8859-1", "iso8859-1", "latin1", "latin-1"];

/// An error which can be returned when parsing a commit.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseCommitError {
    #[error("commit has no `tree` header")]
    MissingTree,

    #[error("invalid tree ID: {0}")]
    InvalidTree(#[source] ParseIdError),

    #[error("invalid parent ID: {0}")]
    InvalidParent(#[source] ParseIdError),

    #[error("commit has no `author` header")]
    MissingAuthor,

    #[error("invalid author: {0}")]
    InvalidAuthor(#[source] SignatureError),

    #[error("commit has no `committer` header")]
    MissingCommitter,

    #[error("invalid committer: {0}")]
    InvalidCommitter(#[source] SignatureError),

    #[error("unexpected `{0}` header")]
    UnexpectedHeader(String),

    #[error("commit has no blank line between headers and message")]
    MissingBlankLine,
}

/// A git commit: a snapshot (tree) plus its ancestry and attribution.
///
/// A `Commit` is immutable. It is either parsed from the bytes of a stored
/// object or built from explicit field values with [`Commit::new`], which
/// serializes and hashes it on the spot. There are no setters, and the
/// fields can't be assigned from outside this module:
///
/// ```compile_fail
/// # use gitobj::object::Commit;
/// fn reword(commit: &mut Commit) {
///     commit.message = String::from("Reworded.\n");
/// }
/// ```
///
/// ```compile_fail
/// # use gitobj::object::{Commit, Id};
/// fn reparent(commit: &mut Commit, parent: Id) {
///     commit.parent_ids = vec![parent];
/// }
/// ```
///
/// ```compile_fail
/// # use gitobj::object::{Commit, Signature};
/// fn reattribute(commit: &mut Commit, author: Signature) {
///     commit.author = author;
/// }
/// ```
///
/// ```compile_fail
/// # use gitobj::object::{Commit, Signature};
/// fn recommit(commit: &mut Commit, committer: Signature) {
///     commit.committer = committer;
/// }
/// ```
///
/// ```compile_fail
/// # use gitobj::object::{Commit, Id};
/// fn retree(commit: &mut Commit, tree_id: Id) {
///     commit.tree_id = tree_id;
/// }
/// ```
///
/// ```compile_fail
/// # use gitobj::object::{Commit, Id};
/// fn rehash(commit: &mut Commit, id: Id) {
///     commit.id = id;
/// }
/// ```
///
/// The resolved tree and parents are just as sealed:
///
/// ```compile_fail
/// # use gitobj::object::{Commit, Tree};
/// fn swap_tree(commit: &mut Commit, tree: Tree) {
///     let _ = commit.tree.set(tree);
/// }
/// ```
///
/// ```compile_fail
/// # use gitobj::object::Commit;
/// fn swap_parents(commit: &mut Commit, parents: Vec<Commit>) {
///     let _ = commit.parents.set(parents);
/// }
/// ```
///
/// The message is kept as the bytes that were stored. [`Commit::message`]
/// decodes it as UTF-8, or as ISO-8859-1 when the commit's `encoding`
/// header says so; [`Commit::message_bytes`] returns it untouched.
///
/// Trees and parents are referenced by ID. They are looked up in a [`Repo`]
/// the first time [`Commit::tree`] or [`Commit::parents`] is called and
/// cached for the lifetime of the commit.
#[derive(Clone, Debug)]
pub struct Commit {
    id: Id,
    data: Arc<[u8]>,
    tree_id: Id,
    parent_ids: Vec<Id>,
    author: Signature,
    committer: Signature,
    extra_headers: Vec<(String, String)>,
    message_start: usize,
    tree: OnceLock<Tree>,
    parents: OnceLock<Vec<Commit>>,
}

impl Commit {
    /// Builds a new commit from its fields.
    ///
    /// The commit is serialized in canonical form (`tree`, each `parent` in
    /// the order given, `author`, `committer`, a blank line, then the message
    /// verbatim) and its ID computed from those bytes.
    pub fn new(
        author: Signature,
        committer: Signature,
        message: &str,
        tree_id: Id,
        parent_ids: &[Id],
    ) -> Commit {
        let data: Arc<[u8]> =
            serialize(&author, &committer, message, &tree_id, parent_ids).into();

        Commit {
            id: Id::for_object(Kind::Commit, &data),
            message_start: data.len() - message.len(),
            data,
            tree_id,
            parent_ids: parent_ids.to_vec(),
            author,
            committer,
            extra_headers: Vec::new(),
            tree: OnceLock::new(),
            parents: OnceLock::new(),
        }
    }

    /// Builds a new commit and stores it in `repo`, returning its ID.
    ///
    /// Reading the returned ID back from `repo` yields a commit with the same fields.
    pub fn create<R: Repo + ?Sized>(
        author: Signature,
        committer: Signature,
        message: &str,
        tree_id: Id,
        parent_ids: &[Id],
        repo: &R,
    ) -> Result<Id> {
        let commit = Commit::new(author, committer, message, tree_id, parent_ids);
        let id = repo.put(Kind::Commit, commit.as_bytes())?;

        debug!(
            "created commit {} (tree {}, {} parent(s))",
            id,
            commit.tree_id,
            commit.parent_ids.len()
        );

        Ok(id)
    }

    /// Parses the content of a commit object.
    ///
    /// Headers must appear in canonical order: `tree`, zero or more `parent`,
    /// `author`, `committer`. Any other headers (such as `encoding` or `gpgsig`)
    /// may follow `committer`; their continuation lines are unfolded.
    /// A blank line separates the headers from the message.
    ///
    /// The message and the names in `author` and `committer` may be in
    /// any encoding; they are never rejected for not being UTF-8.
    pub fn parse(data: &[u8]) -> std::result::Result<Commit, ParseCommitError> {
        let mut lines = HeaderLines::new(data);

        let tree_id = expect_header(&mut lines, TREE, &[], ParseCommitError::MissingTree)?;
        let tree_id = parse_utils::object_id(tree_id).map_err(ParseCommitError::InvalidTree)?;

        let mut parent_ids = Vec::new();
        while let Some(value) = lines.peek().and_then(|line| parse_utils::header(line, PARENT)) {
            parent_ids.push(parse_utils::object_id(value).map_err(ParseCommitError::InvalidParent)?);
            lines.next_line();
        }

        let author = expect_header(
            &mut lines,
            AUTHOR,
            &[TREE, PARENT],
            ParseCommitError::MissingAuthor,
        )?;
        let author = Signature::parse(author).map_err(ParseCommitError::InvalidAuthor)?;

        let committer = expect_header(
            &mut lines,
            COMMITTER,
            &[TREE, PARENT, AUTHOR],
            ParseCommitError::MissingCommitter,
        )?;
        let committer = Signature::parse(committer).map_err(ParseCommitError::InvalidCommitter)?;

        let mut extra_headers: Vec<(String, String)> = Vec::new();
        while let Some(line) = lines.peek() {
            if line.is_empty() {
                break;
            }
            lines.next_line();

            if let Some(continuation) = line.strip_prefix(b" ") {
                match extra_headers.last_mut() {
                    Some((_, value)) => {
                        value.push('\n');
                        value.push_str(&String::from_utf8_lossy(continuation));
                    }
                    None => return Err(ParseCommitError::UnexpectedHeader(String::new())),
                }
                continue;
            }

            let (name, value) = parse_utils::split_once(line, &b' ');
            if [TREE, PARENT, AUTHOR, COMMITTER].iter().any(|h| *h == name) {
                return Err(ParseCommitError::UnexpectedHeader(lossy(name)));
            }
            extra_headers.push((lossy(name), lossy(value)));
        }

        let message = lines.body().ok_or(ParseCommitError::MissingBlankLine)?;

        Ok(Commit {
            id: Id::for_object(Kind::Commit, data),
            data: data.into(),
            tree_id,
            parent_ids,
            author,
            committer,
            extra_headers,
            message_start: data.len() - message.len(),
            tree: OnceLock::new(),
            parents: OnceLock::new(),
        })
    }

    /// Returns the ID of this commit.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the ID of the tree this commit records.
    pub fn tree_id(&self) -> Id {
        self.tree_id
    }

    /// Returns the IDs of this commit's parents, first parent first.
    pub fn parent_ids(&self) -> &[Id] {
        &self.parent_ids
    }

    pub fn parent_count(&self) -> usize {
        self.parent_ids.len()
    }

    /// Returns the ID of the `n`th parent (zero-based), if there is one.
    pub fn parent_id(&self, n: usize) -> Option<Id> {
        self.parent_ids.get(n).copied()
    }

    pub fn author(&self) -> &Signature {
        &self.author
    }

    pub fn committer(&self) -> &Signature {
        &self.committer
    }

    /// Returns the committer's timestamp.
    pub fn commit_time(&self) -> i64 {
        self.committer.timestamp()
    }

    /// Returns the full commit message as text.
    ///
    /// Valid UTF-8 is borrowed as is. Otherwise the message is decoded as
    /// ISO-8859-1 if the `encoding` header names it, or lossily (with
    /// `U+FFFD` replacing bad bytes) for any other encoding.
    pub fn message(&self) -> Cow<'_, str> {
        self.decode(self.message_bytes())
    }

    /// Returns the full commit message exactly as stored.
    pub fn message_bytes(&self) -> &[u8] {
        &self.data[self.message_start..]
    }

    /// Returns the message up to (not including) the first newline.
    pub fn message_short(&self) -> Cow<'_, str> {
        let message = self.message_bytes();
        match message.iter().position(|b| *b == b'\n') {
            Some(n) => self.decode(&message[..n]),
            None => self.decode(message),
        }
    }

    /// Returns the headers that followed `committer`, in order.
    /// Multi-line values are joined with `\n`. Names and values that
    /// aren't UTF-8 are decoded lossily; [`Commit::as_bytes`] has the originals.
    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }

    /// Returns the value of the `encoding` header, if present.
    pub fn message_encoding(&self) -> Option<&str> {
        self.extra_headers
            .iter()
            .find(|(name, _)| name == ENCODING)
            .map(|(_, value)| value.as_str())
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match str::from_utf8(bytes) {
            Ok(s) => Cow::Borrowed(s),
            Err(_) if self.is_latin1() => Cow::Owned(bytes.iter().map(|b| *b as char).collect()),
            Err(_) => String::from_utf8_lossy(bytes),
        }
    }

    fn is_latin1(&self) -> bool {
        self.message_encoding()
            .map(|enc| LATIN1.iter().any(|name| enc.eq_ignore_ascii_case(name)))
            .unwrap_or(false)
    }

    /// Returns the canonical bytes this commit was parsed from or serialized to.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the tree this commit records, reading it from `repo` on first use.
    pub fn tree<R: Repo + ?Sized>(&self, repo: &R) -> Result<&Tree> {
        if let Some(tree) = self.tree.get() {
            return Ok(tree);
        }

        let tree = repo.get_tree(&self.tree_id)?;
        trace!("commit {}: resolved tree {}", self.id, self.tree_id);

        Ok(self.tree.get_or_init(|| tree))
    }

    /// Returns this commit's parents in order, reading them from `repo` on first use.
    pub fn parents<R: Repo + ?Sized>(&self, repo: &R) -> Result<&[Commit]> {
        if let Some(parents) = self.parents.get() {
            return Ok(parents);
        }

        let parents = self
            .parent_ids
            .iter()
            .map(|id| repo.get_commit(id))
            .collect::<Result<Vec<Commit>>>()?;
        trace!("commit {}: resolved {} parent(s)", self.id, parents.len());

        Ok(self.parents.get_or_init(|| parents))
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Commit) -> bool {
        self.id == other.id
    }
}

impl Eq for Commit {}

fn serialize(
    author: &Signature,
    committer: &Signature,
    message: &str,
    tree_id: &Id,
    parent_ids: &[Id],
) -> Vec<u8> {
    let mut data = format!("tree {}\n", tree_id);
    for parent_id in parent_ids.iter() {
        data.push_str(&format!("parent {}\n", parent_id));
    }

    let mut data = data.into_bytes();
    data.extend_from_slice(b"author ");
    data.extend_from_slice(&author.to_bytes());
    data.extend_from_slice(b"\ncommitter ");
    data.extend_from_slice(&committer.to_bytes());
    data.extend_from_slice(b"\n\n");
    data.extend_from_slice(message.as_bytes());

    data
}

/// Consumes the next line, which must be the header `name`.
///
/// A header listed in `earlier` is one that has already been read and
/// so is out of order here; anything else means `name` is missing.
fn expect_header<'a>(
    lines: &mut HeaderLines<'a>,
    name: &[u8],
    earlier: &[&[u8]],
    missing: ParseCommitError,
) -> std::result::Result<&'a [u8], ParseCommitError> {
    let line = lines.next_line().ok_or_else(|| missing.clone())?;

    if let Some(value) = parse_utils::header(line, name) {
        return Ok(value);
    }

    let found = parse_utils::header_name(line);
    if earlier.iter().any(|h| *h == found) {
        Err(ParseCommitError::UnexpectedHeader(lossy(found)))
    } else {
        Err(missing)
    }
}

fn lossy(s: &[u8]) -> String {
    String::from_utf8_lossy(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE_ID: &str = "967fce8df97cc71722d3c2a5930ef3e6f1d27b12";
    const PARENT_ID: &str = "c2792cfa289ae6321ecf2cd5806c2194b0fd070c";
    const COMMIT_ID: &str = "5fe808e8953c12735680c257f56600cb0de44b10";

    const COMMIT_DATA: &[u8] = b"tree 967fce8df97cc71722d3c2a5930ef3e6f1d27b12\n\
        parent c2792cfa289ae6321ecf2cd5806c2194b0fd070c\n\
        author Dave Borowitz <dborowitz@google.com> 1288477363 -0700\n\
        committer Dave Borowitz <dborowitz@google.com> 1288481576 -0700\n\
        \n\
        Second test data commit.\n\
        \n\
        This commit has some additional text.\n";

    fn id(hex: &str) -> Id {
        Id::from_hex(hex).unwrap()
    }

    fn sig(name: &str, email: &str, timestamp: i64, tz: i16) -> Signature {
        Signature::new(name, email, timestamp, tz).unwrap()
    }

    #[test]
    fn parse_reference_commit() {
        let c = Commit::parse(COMMIT_DATA).unwrap();

        assert_eq!(c.id().to_string(), COMMIT_ID);
        assert_eq!(c.tree_id().to_string(), TREE_ID);
        assert_eq!(c.parent_count(), 1);
        assert_eq!(c.parent_id(0), Some(id(PARENT_ID)));
        assert_eq!(c.parent_id(1), None);
        assert_eq!(c.message_short(), "Second test data commit.");
        assert_eq!(
            c.message(),
            "Second test data commit.\n\nThis commit has some additional text.\n"
        );
        assert_eq!(c.commit_time(), 1288481576);
        assert_eq!(
            c.committer(),
            &sig("Dave Borowitz", "dborowitz@google.com", 1288481576, -420)
        );
        assert_eq!(
            c.author(),
            &sig("Dave Borowitz", "dborowitz@google.com", 1288477363, -420)
        );
        assert!(c.extra_headers().is_empty());
        assert_eq!(c.message_encoding(), None);
        assert_eq!(c.as_bytes(), COMMIT_DATA);
    }

    #[test]
    fn new_reference_commit() {
        let c = Commit::new(
            sig("Jane Doe", "jdoe2@example.com", 12345, 0),
            sig("John Doe", "jdoe@example.com", 12346, 0),
            "New commit.\n\nMessage.\n",
            id(TREE_ID),
            &[id(COMMIT_ID)],
        );

        assert_eq!(c.id().to_string(), "30bb126a4959290987fc07ea49f92be276dce9d6");
        assert_eq!(c.message_short(), "New commit.");
        assert_eq!(
            str::from_utf8(c.as_bytes()).unwrap(),
            "tree 967fce8df97cc71722d3c2a5930ef3e6f1d27b12\n\
             parent 5fe808e8953c12735680c257f56600cb0de44b10\n\
             author Jane Doe <jdoe2@example.com> 12345 +0000\n\
             committer John Doe <jdoe@example.com> 12346 +0000\n\
             \n\
             New commit.\n\
             \n\
             Message.\n"
        );
    }

    #[test]
    fn round_trip() {
        let cases: Vec<(&str, Vec<Id>)> = vec![
            ("", vec![]),
            ("Root commit.\n", vec![]),
            ("Merge.\n", vec![id(PARENT_ID), id(COMMIT_ID)]),
            ("No trailing newline", vec![id(COMMIT_ID)]),
            ("Summary\n\n\nBody with blank lines\n\n", vec![id(PARENT_ID)]),
        ];

        for (message, parents) in cases.into_iter() {
            let author = sig("A U Thor", "author@example.com", 1_142_878_501, 150);
            let committer = sig("C O Mitter", "committer@example.com", 1_142_878_502, -300);
            let c = Commit::new(
                author.clone(),
                committer.clone(),
                message,
                id(TREE_ID),
                &parents,
            );

            let parsed = Commit::parse(c.as_bytes()).unwrap();
            assert_eq!(parsed.id(), c.id());
            assert_eq!(parsed.tree_id(), id(TREE_ID));
            assert_eq!(parsed.parent_ids(), parents.as_slice());
            assert_eq!(parsed.author(), &author);
            assert_eq!(parsed.committer(), &committer);
            assert_eq!(parsed.message(), message);
        }
    }

    #[test]
    fn id_is_deterministic() {
        let make = || {
            Commit::new(
                sig("A", "a@example.com", 1, 0),
                sig("B", "b@example.com", 2, 0),
                "Same.\n",
                id(TREE_ID),
                &[id(PARENT_ID)],
            )
        };

        assert_eq!(make().id(), make().id());
        assert_eq!(make(), make());
    }

    #[test]
    fn parent_order_changes_id() {
        let make = |parents: &[Id]| {
            Commit::new(
                sig("A", "a@example.com", 1, 0),
                sig("B", "b@example.com", 2, 0),
                "Merge.\n",
                id(TREE_ID),
                parents,
            )
        };

        let ab = make(&[id(PARENT_ID), id(COMMIT_ID)]);
        let ba = make(&[id(COMMIT_ID), id(PARENT_ID)]);
        assert_ne!(ab.id(), ba.id());
        assert_eq!(ab.parent_ids(), &[id(PARENT_ID), id(COMMIT_ID)]);
        assert_eq!(ba.parent_ids(), &[id(COMMIT_ID), id(PARENT_ID)]);
    }

    #[test]
    fn duplicate_parents_are_kept() {
        let c = Commit::new(
            sig("A", "a@example.com", 1, 0),
            sig("B", "b@example.com", 2, 0),
            "Odd merge.\n",
            id(TREE_ID),
            &[id(PARENT_ID), id(PARENT_ID)],
        );

        let parsed = Commit::parse(c.as_bytes()).unwrap();
        assert_eq!(parsed.parent_count(), 2);
    }

    #[test]
    fn message_short() {
        let make = |message: &str| {
            Commit::new(
                sig("A", "a@example.com", 1, 0),
                sig("B", "b@example.com", 2, 0),
                message,
                id(TREE_ID),
                &[],
            )
        };

        assert_eq!(make("").message_short(), "");
        assert_eq!(make("\n").message_short(), "");
        assert_eq!(make("One line").message_short(), "One line");
        assert_eq!(make("One line\n").message_short(), "One line");
        assert_eq!(make("First\nSecond\n").message_short(), "First");
    }

    #[test]
    fn extra_headers() {
        let data = b"tree 967fce8df97cc71722d3c2a5930ef3e6f1d27b12\n\
            author A <a@example.com> 1 +0000\n\
            committer B <b@example.com> 2 +0000\n\
            encoding ISO-8859-1\n\
            gpgsig -----BEGIN PGP SIGNATURE-----\n \n abc\n -----END PGP SIGNATURE-----\n\
            \n\
            Signed.\n";

        let c = Commit::parse(data).unwrap();
        assert_eq!(c.message_encoding(), Some("ISO-8859-1"));
        assert_eq!(
            c.extra_headers()[1],
            (
                "gpgsig".to_string(),
                "-----BEGIN PGP SIGNATURE-----\n\nabc\n-----END PGP SIGNATURE-----".to_string()
            )
        );
        assert_eq!(c.message(), "Signed.\n");
        assert_eq!(c.id(), Id::for_object(Kind::Commit, data));
        assert_eq!(c.as_bytes(), &data[..]);
    }

    #[test]
    fn parse_missing_tree() {
        assert_eq!(
            Commit::parse(b"").unwrap_err(),
            ParseCommitError::MissingTree
        );
        assert_eq!(
            Commit::parse(b"parent be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n").unwrap_err(),
            ParseCommitError::MissingTree
        );
        assert_eq!(
            Commit::parse(b"trie be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n").unwrap_err(),
            ParseCommitError::MissingTree
        );
        assert_eq!(
            Commit::parse(b"tree\tbe9bfa841874ccc9f2ef7c48d0c76226f89b7189\n").unwrap_err(),
            ParseCommitError::MissingTree
        );
    }

    #[test]
    fn parse_invalid_tree() {
        assert_eq!(
            Commit::parse(b"tree zzzzfa841874ccc9f2ef7c48d0c76226f89b7189\n").unwrap_err(),
            ParseCommitError::InvalidTree(ParseIdError::InvalidDigit('z'))
        );
        assert_eq!(
            Commit::parse(b"tree be9b\n").unwrap_err(),
            ParseCommitError::InvalidTree(ParseIdError::Underflow)
        );
        assert_eq!(
            Commit::parse(b"tree  be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n").unwrap_err(),
            ParseCommitError::InvalidTree(ParseIdError::Overflow)
        );
        assert_eq!(
            Commit::parse(b"tree BE9BFA841874CCC9F2EF7C48D0C76226F89B7189\n").unwrap_err(),
            ParseCommitError::InvalidTree(ParseIdError::InvalidDigit('B'))
        );
        assert_eq!(
            Commit::parse(b"tree 0000000000000000000000000000000000000000\n").unwrap_err(),
            ParseCommitError::InvalidTree(ParseIdError::Zero)
        );
    }

    #[test]
    fn parse_invalid_parent() {
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  parent \n"
            )
            .unwrap_err(),
            ParseCommitError::InvalidParent(ParseIdError::Empty)
        );
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  parent be9bfa841874ccc9f2ef7c48d0c76226f89b7189 \n"
            )
            .unwrap_err(),
            ParseCommitError::InvalidParent(ParseIdError::Overflow)
        );
    }

    #[test]
    fn parse_missing_author() {
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  committer A. U. Thor <author@localhost> 1 +0000\n"
            )
            .unwrap_err(),
            ParseCommitError::MissingAuthor
        );
        assert_eq!(
            Commit::parse(b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n").unwrap_err(),
            ParseCommitError::MissingAuthor
        );
    }

    #[test]
    fn parse_invalid_author() {
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author A. U. Thor <foo 1 +0000\n"
            )
            .unwrap_err(),
            ParseCommitError::InvalidAuthor(SignatureError::MissingEmail)
        );
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author a <b> 1 z\n"
            )
            .unwrap_err(),
            ParseCommitError::InvalidAuthor(SignatureError::InvalidTzOffset("z".to_string()))
        );
    }

    #[test]
    fn parse_missing_or_invalid_committer() {
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author A. U. Thor <author@localhost> 1 +0000\n"
            )
            .unwrap_err(),
            ParseCommitError::MissingCommitter
        );
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author A. U. Thor <author@localhost> 1 +0000\n\n"
            )
            .unwrap_err(),
            ParseCommitError::MissingCommitter
        );
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author a <b> 1 +0000\n\
                  committer a <"
            )
            .unwrap_err(),
            ParseCommitError::InvalidCommitter(SignatureError::MissingEmail)
        );
    }

    #[test]
    fn parse_headers_out_of_order() {
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n"
            )
            .unwrap_err(),
            ParseCommitError::UnexpectedHeader("tree".to_string())
        );
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author a <b> 1 +0000\n\
                  parent be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n"
            )
            .unwrap_err(),
            ParseCommitError::UnexpectedHeader("parent".to_string())
        );
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author a <b> 1 +0000\n\
                  committer a <b> 1 +0000\n\
                  author a <b> 1 +0000\n\
                  \n"
            )
            .unwrap_err(),
            ParseCommitError::UnexpectedHeader("author".to_string())
        );
    }

    #[test]
    fn parse_missing_blank_line() {
        assert_eq!(
            Commit::parse(
                b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
                  author a <b> 1 +0000\n\
                  committer a <b> 1 +0000\n"
            )
            .unwrap_err(),
            ParseCommitError::MissingBlankLine
        );
    }

    #[test]
    fn latin1_message() {
        let c = Commit::parse(
            b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
              author a <b> 1 +0000\n\
              committer a <b> 1 +0000\n\
              encoding ISO-8859-1\n\
              \n\
              caf\xe9\n\nd\xe9tails\n",
        )
        .unwrap();

        assert_eq!(c.message_encoding(), Some("ISO-8859-1"));
        assert_eq!(c.message_bytes(), b"caf\xe9\n\nd\xe9tails\n");
        assert_eq!(c.message(), "caf\u{e9}\n\nd\u{e9}tails\n");
        assert_eq!(c.message_short(), "caf\u{e9}");
    }

    #[test]
    fn undeclared_non_utf8_message() {
        let c = Commit::parse(
            b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
              author a <b> 1 +0000\n\
              committer a <b> 1 +0000\n\
              \n\
              caf\xe9\n",
        )
        .unwrap();

        assert_eq!(c.message_encoding(), None);
        assert_eq!(c.message_bytes(), b"caf\xe9\n");
        assert_eq!(c.message(), "caf\u{fffd}\n");
    }

    #[test]
    fn non_utf8_author_survives_rebuild() {
        let c = Commit::parse(
            b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
              author Ren\xe9 <r@example.com> 1 +0100\n\
              committer a <b> 2 +0000\n\
              \n\
              Accents.\n",
        )
        .unwrap();

        assert_eq!(c.author().name_bytes(), b"Ren\xe9");

        let rebuilt = Commit::new(
            c.author().clone(),
            c.committer().clone(),
            &c.message(),
            c.tree_id(),
            c.parent_ids(),
        );
        assert_eq!(rebuilt.id(), c.id());
        assert_eq!(rebuilt.as_bytes(), c.as_bytes());
    }

    #[test]
    fn negative_zero_offset_survives_rebuild() {
        let c = Commit::parse(
            b"tree be9bfa841874ccc9f2ef7c48d0c76226f89b7189\n\
              author a <b> 1 -0000\n\
              committer a <b> 1 -0000\n\
              \n\
              UTC, written with a minus sign.\n",
        )
        .unwrap();

        assert_eq!(c.author().tz_offset(), 0);

        let rebuilt = Commit::new(
            c.author().clone(),
            c.committer().clone(),
            &c.message(),
            c.tree_id(),
            c.parent_ids(),
        );
        assert_eq!(rebuilt.id(), c.id());
    }

    #[test]
    fn commit_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Commit>();
    }
}
