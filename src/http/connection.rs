use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout, timeout_at};

use crate::files::StaticResponder;
use crate::http::parser::{
    ParseError, expected_request_len, find_headers_end, parse_http_request,
};
use crate::http::request::{Method, Request};
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 4096;

#[derive(Debug)]
pub enum ConnectionError {
    ReadFailed(io::Error),
    WriteFailed(io::Error),
    AcceptFailed(io::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ReadFailed(e) => write!(f, "read failed: {}", e),
            ConnectionError::WriteFailed(e) => write!(f, "write failed: {}", e),
            ConnectionError::AcceptFailed(e) => write!(f, "accept failed: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectionError::ReadFailed(e)
            | ConnectionError::WriteFailed(e)
            | ConnectionError::AcceptFailed(e) => Some(e),
        }
    }
}

/// Per-connection limits.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    /// Largest request accepted, in bytes
    pub max_request_bytes: usize,
    /// Deadline for receiving the whole request
    pub read_timeout: Duration,
    /// Deadline for writing the whole response
    pub write_timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            max_request_bytes: 1024 * 1024,
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
        }
    }
}

pub struct Connection<S> {
    stream: S,
    responder: Arc<StaticResponder>,
    settings: ConnectionSettings,
    state: ConnectionState,
}

pub enum ConnectionState {
    Accepted,
    Received(BytesMut),
    Parsed(Request),
    Routed(ResponseWriter),
    Sent,
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, responder: Arc<StaticResponder>, settings: ConnectionSettings) -> Self {
        Self {
            stream,
            responder,
            settings,
            state: ConnectionState::Accepted,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection to `Closed`.
    ///
    /// Every branch ends in `Closed`; the stream and buffers are released
    /// when `self` is dropped.
    pub async fn run(&mut self) -> Result<(), ConnectionError> {
        let result = self.step_until_closed().await;
        self.state = ConnectionState::Closed;
        result
    }

    async fn step_until_closed(&mut self) -> Result<(), ConnectionError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Accepted => {
                    self.state = match self.read_request().await? {
                        Some(buf) => ConnectionState::Received(buf),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Received(buf) => {
                    self.state = match parse_http_request(&buf) {
                        Ok(req) => ConnectionState::Parsed(req),
                        Err(e) => {
                            tracing::debug!(error = %e, bytes = buf.len(), "Dropping unparsable request");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Parsed(req) => {
                    tracing::info!(method = req.method.as_str(), path = %req.target, "Request");

                    self.state = match req.method {
                        Method::GET => {
                            let response = self.responder.build(&req.target).await;
                            tracing::debug!(
                                status = response.status.as_u16(),
                                bytes = response.body.len(),
                                "Response ready"
                            );
                            ConnectionState::Routed(ResponseWriter::new(&response))
                        }
                        // POST and anything unrecognized get no response.
                        Method::POST | Method::UNSUPPORTED => ConnectionState::Closed,
                    };
                }

                ConnectionState::Routed(mut writer) => {
                    self.write_response(&mut writer).await?;
                    self.state = ConnectionState::Sent;
                }

                ConnectionState::Sent => {
                    // The peer may already be gone; the response is out either way.
                    let _ = self.stream.shutdown().await;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the buffer holds a whole request.
    ///
    /// One deadline covers the entire read, so a peer trickling bytes cannot
    /// hold the connection past `read_timeout`. The head is only parsed once
    /// its blank line has arrived; after that the buffer just has to reach
    /// the expected length.
    ///
    /// Returns `None` when the peer closes before sending anything. If the
    /// peer closes mid-request or the size cap is reached, whatever arrived
    /// is returned and left for the parser to reject.
    async fn read_request(&mut self) -> Result<Option<BytesMut>, ConnectionError> {
        let cap = self.settings.max_request_bytes;
        let deadline = Instant::now() + self.settings.read_timeout;
        let mut buffer = BytesMut::with_capacity(READ_CHUNK.min(cap));
        let mut scanned = 0;
        let mut expected: Option<usize> = None;

        loop {
            let room = cap - buffer.len();
            let mut limited = (&mut self.stream).take(room.min(READ_CHUNK) as u64);

            let n = timeout_at(deadline, limited.read_buf(&mut buffer))
                .await
                .map_err(|_| {
                    ConnectionError::ReadFailed(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "timed out waiting for request",
                    ))
                })?
                .map_err(ConnectionError::ReadFailed)?;

            if n == 0 {
                return Ok((!buffer.is_empty()).then_some(buffer));
            }

            if expected.is_none() && find_headers_end(&buffer, scanned).is_some() {
                match expected_request_len(&buffer) {
                    Ok(len) => expected = Some(len),
                    Err(ParseError::Truncated) => {}
                    Err(_) => return Ok(Some(buffer)),
                }
            }
            // Keep 3 bytes of overlap for a terminator split across reads.
            scanned = buffer.len().saturating_sub(3);

            let complete = expected.is_some_and(|len| buffer.len() >= len);
            if complete || buffer.len() >= cap {
                return Ok(Some(buffer));
            }
        }
    }

    async fn write_response(&mut self, writer: &mut ResponseWriter) -> Result<(), ConnectionError> {
        timeout(self.settings.write_timeout, writer.write_to_stream(&mut self.stream))
            .await
            .map_err(|_| {
                ConnectionError::WriteFailed(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "timed out writing response",
                ))
            })?
            .map_err(ConnectionError::WriteFailed)
    }
}
