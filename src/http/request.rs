/// HTTP request methods.
///
/// Only GET and POST are recognized. Every other token, including lowercase
/// spellings of the known ones, is `UNSUPPORTED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data (parsed, never answered)
    POST,
    /// Any other method token
    UNSUPPORTED,
}

impl Method {
    /// Classifies a method token by exact, case-sensitive equality.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Method::GET);
    /// assert_eq!(Method::from_token(b"GETX"), Method::UNSUPPORTED);
    /// assert_eq!(Method::from_token(b"get"), Method::UNSUPPORTED);
    /// ```
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::GET,
            b"POST" => Method::POST,
            _ => Method::UNSUPPORTED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::UNSUPPORTED => "UNSUPPORTED",
        }
    }
}

/// A single header line, in the order it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The first Content-Length in `headers`, if it is a valid number.
pub fn declared_content_length(headers: &[HeaderField]) -> Option<usize> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("Content-Length"))
        .and_then(|h| h.value.trim().parse().ok())
}

/// Represents a parsed HTTP request from a client.
///
/// `target` keeps its leading `/` and is never decoded. Headers are kept in
/// wire order; duplicates are not merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request target exactly as received (e.g., "/index.html")
    pub target: String,
    /// HTTP version exactly as received (typically "HTTP/1.1")
    pub version: String,
    /// Request headers in wire order
    pub headers: Vec<HeaderField>,
    /// Request body
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: Vec<HeaderField>,
    body: Vec<u8>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Appends a header; earlier headers stay first.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderField::new(name, value));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            target: self.target.ok_or("target missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves the first header value whose name matches `name`
    /// ASCII case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// The declared Content-Length, if present and a valid number.
    pub fn content_length(&self) -> Option<usize> {
        declared_content_length(&self.headers)
    }

    /// Serializes the request back into wire form.
    ///
    /// `UNSUPPORTED` has no token of its own, so it is written as the
    /// literal `UNSUPPORTED`, which parses back to the same variant.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64 + self.body.len());

        buf.extend_from_slice(
            format!("{} {} {}\r\n", self.method.as_str(), self.target, self.version).as_bytes(),
        );

        for h in &self.headers {
            buf.extend_from_slice(h.name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(h.value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&self.body);
        buf
    }
}
