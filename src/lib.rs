//! docroot - Minimal static file server
//!
//! Core library: request parsing, connection handling and file responses.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
