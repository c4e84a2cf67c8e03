use std::borrow::Cow;
use std::str;

use thiserror::Error;

use super::parse_utils::{self, HeaderLines};
use super::{Id, Kind, ParseIdError, ParseKindError, Signature, SignatureError};

/// An error which can be returned when parsing an annotated tag.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseTagError {
    #[error("tag has no `object` header")]
    MissingObject,

    #[error("invalid object ID: {0}")]
    InvalidObject(#[source] ParseIdError),

    #[error("tag has no `type` header")]
    MissingType,

    #[error("invalid target type: {0}")]
    InvalidType(#[source] ParseKindError),

    #[error("tag has no `tag` header")]
    MissingName,

    #[error("invalid tagger: {0}")]
    InvalidTagger(#[source] SignatureError),

    #[error("tag name or type is not valid UTF-8")]
    InvalidUtf8,
}

/// An annotated git tag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    id: Id,
    target: Id,
    target_kind: Kind,
    name: String,
    tagger: Option<Signature>,
    message_start: usize,
    data: Vec<u8>,
}

impl Tag {
    /// Parses the content of an annotated tag object.
    ///
    /// The `tagger` header is optional, as are headers following it.
    /// A tag may end right after its headers, in which case its message is empty.
    /// The message may be in any encoding.
    pub fn parse(data: &[u8]) -> Result<Tag, ParseTagError> {
        let mut lines = HeaderLines::new(data);

        let target = lines
            .next_line()
            .and_then(|line| parse_utils::header(line, b"object"))
            .ok_or(ParseTagError::MissingObject)?;
        let target = parse_utils::object_id(target).map_err(ParseTagError::InvalidObject)?;

        let target_kind = lines
            .next_line()
            .and_then(|line| parse_utils::header(line, b"type"))
            .ok_or(ParseTagError::MissingType)?;
        let target_kind = to_str(target_kind)?
            .parse::<Kind>()
            .map_err(ParseTagError::InvalidType)?;

        let name = lines
            .next_line()
            .and_then(|line| parse_utils::header(line, b"tag"))
            .ok_or(ParseTagError::MissingName)?;
        let name = to_str(name)?.to_string();

        let mut tagger = None;
        if let Some(value) = lines.peek().and_then(|line| parse_utils::header(line, b"tagger")) {
            tagger = Some(Signature::parse(value).map_err(ParseTagError::InvalidTagger)?);
            lines.next_line();
        }

        while let Some(line) = lines.peek() {
            if line.is_empty() {
                break;
            }
            lines.next_line();
        }

        let message_start = match lines.body() {
            Some(body) => data.len() - body.len(),
            None => data.len(),
        };

        Ok(Tag {
            id: Id::for_object(Kind::Tag, data),
            target,
            target_kind,
            name,
            tagger,
            message_start,
            data: data.to_vec(),
        })
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the ID of the tagged object.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns the kind of the tagged object, as recorded in the tag.
    pub fn target_kind(&self) -> Kind {
        self.target_kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tagger(&self) -> Option<&Signature> {
        self.tagger.as_ref()
    }

    /// Returns the tag message, replacing bytes that aren't UTF-8 with `U+FFFD`.
    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.message_bytes())
    }

    pub fn message_bytes(&self) -> &[u8] {
        &self.data[self.message_start..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

fn to_str(s: &[u8]) -> Result<&str, ParseTagError> {
    str::from_utf8(s).map_err(|_| ParseTagError::InvalidUtf8)
}
