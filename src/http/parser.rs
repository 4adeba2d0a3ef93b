use crate::http::request::{HeaderField, Method, Request, declared_content_length};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A delimiter was not found before the end of the buffer, or the
    /// declared body is longer than what was received.
    Truncated,
    EmptyInput,
    /// A complete header line with no `:` or with an empty name.
    MalformedHeader,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Truncated => f.write_str("request truncated"),
            ParseError::EmptyInput => f.write_str("empty request"),
            ParseError::MalformedHeader => f.write_str("malformed header line"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Read position over an immutable request buffer.
///
/// Every scan is bounded by the slice; nothing here can read past the end.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Returns the bytes before `delim` and the number of bytes consumed
    /// (match plus delimiter), without advancing.
    fn scan_until(&self, delim: &[u8]) -> Option<(&'a [u8], usize)> {
        let rest = self.remaining();
        rest.windows(delim.len())
            .position(|w| w == delim)
            .map(|i| (&rest[..i], i + delim.len()))
    }

    /// Consumes up to and including `delim`, returning what came before it.
    fn take_until(&mut self, delim: &[u8]) -> Result<&'a [u8], ParseError> {
        let (matched, consumed) = self.scan_until(delim).ok_or(ParseError::Truncated)?;
        self.pos += consumed;
        Ok(matched)
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.remaining().starts_with(prefix)
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }
}

/// Request line and headers, plus where the body starts in the buffer.
struct Head {
    method: Method,
    target: String,
    version: String,
    headers: Vec<HeaderField>,
    body_start: usize,
}

/// Parses one complete HTTP request from `buf`.
///
/// Fails with [`ParseError::Truncated`] whenever an expected delimiter is
/// missing, so a caller reading from a socket can treat it as "need more
/// bytes". Method and version are not validated.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let head = parse_head(buf)?;

    // Body
    let rest = &buf[head.body_start..];
    let body = match declared_content_length(&head.headers) {
        Some(len) if rest.len() < len => return Err(ParseError::Truncated),
        Some(len) => rest[..len].to_vec(),
        None => rest.to_vec(),
    };

    Ok(Request {
        method: head.method,
        target: head.target,
        version: head.version,
        headers: head.headers,
        body,
    })
}

/// Total bytes the request in `buf` occupies once complete: the head plus
/// any declared body. Without a Content-Length the head alone is enough.
///
/// Only the head has to be present; the body is not inspected.
pub fn expected_request_len(buf: &[u8]) -> Result<usize, ParseError> {
    let head = parse_head(buf)?;
    let body_len = declared_content_length(&head.headers).unwrap_or(0);
    Ok(head.body_start.saturating_add(body_len))
}

/// Position of the blank line ending the head, searching from `from`.
pub fn find_headers_end(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| from + i)
}

fn parse_head(buf: &[u8]) -> Result<Head, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut cursor = Cursor::new(buf);

    // Request line
    let method = Method::from_token(cursor.take_until(b" ")?);
    let target = text(cursor.take_until(b" ")?);
    let version = text(cursor.take_until(b"\r\n")?);

    // Headers
    let mut headers = Vec::new();

    loop {
        if cursor.remaining().len() < 2 {
            return Err(ParseError::Truncated);
        }
        if cursor.starts_with(b"\r\n") {
            cursor.advance(2);
            break;
        }

        let line = cursor.take_until(b"\r\n")?;
        headers.push(parse_header_line(line)?);
    }

    Ok(Head {
        method,
        target,
        version,
        headers,
        body_start: cursor.pos,
    })
}

/// Splits a complete header line at its first `:`.
///
/// The name must be non-empty. Spaces and tabs around the value are dropped.
fn parse_header_line(line: &[u8]) -> Result<HeaderField, ParseError> {
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or(ParseError::MalformedHeader)?;

    let name = &line[..colon];
    if name.is_empty() {
        return Err(ParseError::MalformedHeader);
    }

    Ok(HeaderField {
        name: text(name),
        value: text(trim_blanks(&line[colon + 1..])),
    })
}

fn trim_blanks(bytes: &[u8]) -> &[u8] {
    let is_blank = |b: &u8| *b == b' ' || *b == b'\t';
    let start = bytes.iter().position(|b| !is_blank(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !is_blank(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
