use std::borrow::Cow;
use std::fmt;
use std::str;

use thiserror::Error;

use super::parse_utils::split_once;

/// Time zone offsets outside this range (in minutes) are rejected
/// when constructing a new `Signature`.
const MIN_TZ_OFFSET: i16 = -720;
const MAX_TZ_OFFSET: i16 = 840;

/// An error which can be returned when parsing or constructing a `Signature`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SignatureError {
    #[error("signature has no `<email>` part")]
    MissingEmail,

    #[error("signature has no timestamp")]
    MissingTimestamp,

    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("signature has no time zone offset")]
    MissingTzOffset,

    #[error("invalid time zone offset `{0}`")]
    InvalidTzOffset(String),

    #[error("illegal time zone offset: {0}")]
    IllegalTzOffset(i16),

    #[error("name or email contains `<`, `>`, newline, or NUL: {0:?}")]
    IllegalCharacter(String),
}

/// A `Signature` combines a person's identity (name and e-mail address)
/// with the timestamp for a particular action.
///
/// Signatures are typically associated with commits (as author and committer)
/// or tags (as tagger) in git.
///
/// The `timestamp` value is in seconds relative to the Unix epoch and
/// `tz_offset` is in minutes east of UTC.
///
/// Name and email are kept as the bytes they were parsed from. Git doesn't
/// require them to be UTF-8; the object's own `encoding` header (if any)
/// says how to read them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Signature {
    name: Vec<u8>,
    email: Vec<u8>,
    timestamp: i64,
    tz_offset: i16,
    tz_negative: bool,
}

impl Signature {
    /// Creates a new signature.
    ///
    /// The name and email must not contain characters that would prevent
    /// the signature from being parsed back (`<`, `>`, newline, NUL),
    /// the timestamp must not be negative, and the time zone offset must be
    /// between -12:00 and +14:00.
    pub fn new(
        name: &str,
        email: &str,
        timestamp: i64,
        tz_offset: i16,
    ) -> Result<Signature, SignatureError> {
        if !(MIN_TZ_OFFSET..=MAX_TZ_OFFSET).contains(&tz_offset) {
            return Err(SignatureError::IllegalTzOffset(tz_offset));
        }

        if timestamp < 0 {
            return Err(SignatureError::InvalidTimestamp(timestamp.to_string()));
        }

        for s in &[name, email] {
            if s.contains(|c| matches!(c, '<' | '>' | '\n' | '\0')) {
                return Err(SignatureError::IllegalCharacter(s.to_string()));
            }
        }

        Ok(Signature {
            name: name.as_bytes().to_vec(),
            email: email.as_bytes().to_vec(),
            timestamp,
            tz_offset,
            tz_negative: tz_offset < 0,
        })
    }

    /// Parse a name line (e.g. author, committer, tagger) into a `Signature` struct.
    ///
    /// The expected form is `<name> <<email>> <timestamp> <±HHMM>`,
    /// optionally followed by a newline. Name and email may be in any
    /// encoding. The sign of the offset is remembered, so `-0000` and
    /// `+0000` both mean UTC but are written back as they were read.
    pub fn parse(line: &[u8]) -> Result<Signature, SignatureError> {
        let line = drop_last_newline(line);

        if !line.contains(&b'<') {
            return Err(SignatureError::MissingEmail);
        }

        let (name, line) = split_once(line, &b'<');
        let name = drop_last_space(name).to_vec();

        if !line.contains(&b'>') {
            return Err(SignatureError::MissingEmail);
        }

        let (email, line) = split_once(line, &b'>');
        let email = email.to_vec();

        let mut words = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|word| !word.is_empty());

        let timestamp = words.next().ok_or(SignatureError::MissingTimestamp)?;
        let timestamp = timestamp_from_bytes(timestamp)
            .ok_or_else(|| SignatureError::InvalidTimestamp(lossy(timestamp)))?;

        let tz = words.next().ok_or(SignatureError::MissingTzOffset)?;
        let (tz_offset, tz_negative) =
            tz_from_bytes(tz).ok_or_else(|| SignatureError::InvalidTzOffset(lossy(tz)))?;

        if let Some(extra) = words.next() {
            return Err(SignatureError::InvalidTzOffset(lossy(extra)));
        }

        Ok(Signature {
            name,
            email,
            timestamp,
            tz_offset,
            tz_negative,
        })
    }

    /// Returns the person's human-readable name.
    ///
    /// Bytes that aren't valid UTF-8 are replaced with `U+FFFD`.
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Returns the person's name exactly as stored.
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    /// Returns the person's email address.
    ///
    /// Bytes that aren't valid UTF-8 are replaced with `U+FFFD`.
    pub fn email(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.email)
    }

    pub fn email_bytes(&self) -> &[u8] {
        &self.email
    }

    /// Returns the timestamp (seconds since the Unix epoch).
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the timezone offset (minutes relative to GMT).
    pub fn tz_offset(&self) -> i16 {
        self.tz_offset
    }

    /// Returns the timezone formatted in human readable offset from GMT.
    pub fn format_tz(&self) -> String {
        let sign = if self.tz_negative { "-" } else { "+" };

        let offset = self.tz_offset.abs();
        let hours = offset / 60;
        let min = offset % 60;

        format!("{}{:02}{:02}", sign, hours, min)
    }

    /// Returns the canonical encoding used in object headers:
    /// `<name> <<email>> <timestamp> <±HHMM>`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.name.len() + self.email.len() + 24);
        bytes.extend_from_slice(&self.name);
        bytes.extend_from_slice(b" <");
        bytes.extend_from_slice(&self.email);
        bytes.extend_from_slice(format!("> {} {}", self.timestamp, self.format_tz()).as_bytes());
        bytes
    }
}

fn lossy(s: &[u8]) -> String {
    String::from_utf8_lossy(s).into_owned()
}

fn drop_last_newline(s: &[u8]) -> &[u8] {
    if s.last() == Some(&b'\n') {
        &s[0..s.len() - 1]
    } else {
        s
    }
}

fn drop_last_space(s: &[u8]) -> &[u8] {
    if s.last() == Some(&b' ') {
        &s[0..s.len() - 1]
    } else {
        s
    }
}

fn timestamp_from_bytes(s: &[u8]) -> Option<i64> {
    if s.iter().all(|b| b.is_ascii_digit()) {
        str::from_utf8(s).ok()?.parse().ok()
    } else {
        None
    }
}

/// Parses `[+-]HHMM`, returning the offset in minutes and whether the sign was `-`.
fn tz_from_bytes(s: &[u8]) -> Option<(i16, bool)> {
    if s.len() != 5 {
        return None;
    }

    let negative = match s[0] {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };

    let hh = from_digit(s[1])? * 10 + from_digit(s[2])?;
    let mm = from_digit(s[3])? * 10 + from_digit(s[4])?;

    if mm >= 60 {
        return None;
    }

    let offset = hh * 60 + mm;
    Some((if negative { -offset } else { offset }, negative))
}

fn from_digit(digit: u8) -> Option<i16> {
    if digit.is_ascii_digit() {
        Some((digit - b'0') as i16)
    } else {
        None
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            self.name(),
            self.email(),
            self.timestamp,
            self.format_tz()
        )
    }
}
