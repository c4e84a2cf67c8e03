use super::{Id, ParseIdError};

/// Returns the value of a `<name> <value>` header line, or `None`
/// if the line does not start with the given name followed by a space.
pub(crate) fn header<'a>(line: &'a [u8], name: &[u8]) -> Option<&'a [u8]> {
    if line.contains(&b' ') {
        let (maybe_name, value) = split_once(line, &b' ');
        if maybe_name == name {
            Some(value)
        } else {
            None
        }
    } else {
        None
    }
}

/// Returns the name portion of a header line (everything before the first space).
pub(crate) fn header_name(line: &[u8]) -> &[u8] {
    split_once(line, &b' ').0
}

pub(crate) fn split_once<'a>(s: &'a [u8], c: &u8) -> (&'a [u8], &'a [u8]) {
    match s.iter().position(|b| b == c) {
        Some(n) => (&s[0..n], &s[n + 1..]),
        None => (s, &[]),
    }
}

/// Parses the hex object ID found in a header value.
///
/// Stricter than `Id::from_hex`: git always writes lowercase hex here,
/// and never refers to the zero ID.
pub(crate) fn object_id(value: &[u8]) -> Result<Id, ParseIdError> {
    let id = Id::from_hex(value)?;

    if let Some(c) = value.iter().find(|c| c.is_ascii_uppercase()) {
        return Err(ParseIdError::InvalidDigit(*c as char));
    }

    if id.is_zero() {
        return Err(ParseIdError::Zero);
    }

    Ok(id)
}

/// Walks the newline-terminated header lines at the start of an object
/// (commit or tag) while keeping track of where the body starts.
pub(crate) struct HeaderLines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderLines<'a> {
    pub(crate) fn new(data: &'a [u8]) -> HeaderLines<'a> {
        HeaderLines { data, pos: 0 }
    }

    /// Returns the next line without its trailing newline, without consuming it.
    ///
    /// The final line is returned even if it is not newline-terminated.
    pub(crate) fn peek(&self) -> Option<&'a [u8]> {
        let remaining = &self.data[self.pos..];
        if remaining.is_empty() {
            return None;
        }

        match remaining.iter().position(|b| *b == b'\n') {
            Some(n) => Some(&remaining[..n]),
            None => Some(remaining),
        }
    }

    /// Returns the next line without its trailing newline and advances past it.
    pub(crate) fn next_line(&mut self) -> Option<&'a [u8]> {
        let line = self.peek()?;
        self.pos = (self.pos + line.len() + 1).min(self.data.len());
        Some(line)
    }

    /// Consumes the blank line separating headers from the body and returns the body.
    ///
    /// Returns `None` if the next line is not an empty, newline-terminated line.
    pub(crate) fn body(mut self) -> Option<&'a [u8]> {
        let remaining = &self.data[self.pos..];
        if remaining.first() == Some(&b'\n') {
            self.pos += 1;
            Some(&self.data[self.pos..])
        } else {
            None
        }
    }
}
