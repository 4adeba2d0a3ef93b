//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.x server side: one request per connection,
//! GET only, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Parses a request from a byte buffer without reading past it
//! - **`request`**: HTTP request representation and wire serialization
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │  Accepted   │ ← Read until a full request or the size cap
//!        └──────┬──────┘
//!               │ bytes received
//!               ▼
//!        ┌─────────────┐
//!        │  Received   │ ← Parse
//!        └──────┬──────┘
//!               │ parsed
//!               ▼
//!        ┌─────────────┐
//!        │   Parsed    │ ← GET → build response, anything else → Closed
//!        └──────┬──────┘
//!               │ routed
//!               ▼
//!        ┌─────────────┐
//!        │   Routed    │ ← Write the whole response
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │    Sent     │ ← Shut down the write half
//!        └──────┬──────┘
//!               ▼
//!            Closed        (also reached from every error)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docroot::files::{StaticFileReader, StaticResponder};
//! use docroot::http::connection::{Connection, ConnectionSettings};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = StaticFileReader::open(".", 100 * 1024 * 1024).await?;
//!     let responder = Arc::new(StaticResponder::new(reader, "404.html").await?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let responder = responder.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, responder, ConnectionSettings::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
