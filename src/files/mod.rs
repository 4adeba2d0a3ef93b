//! Static file serving
//!
//! [`reader`] loads files from the document root; [`responder`] maps a
//! request target to a 200 response or the 404 fallback.

pub mod reader;
pub mod responder;

pub use reader::{FileError, StaticFileReader};
pub use responder::StaticResponder;
