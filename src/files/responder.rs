use anyhow::Context;
use bytes::Bytes;

use crate::files::reader::{FileError, StaticFileReader};
use crate::http::mime;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

const NOT_FOUND_CONTENT_TYPE: &str = "text/html";

/// Turns a request target into a file response, falling back to the 404 page.
pub struct StaticResponder {
    reader: StaticFileReader,
    not_found_body: Bytes,
}

impl StaticResponder {
    /// Loads the 404 page up front.
    ///
    /// Without it no request can be answered, so a missing page is an error
    /// here rather than on the first miss.
    pub async fn new(reader: StaticFileReader, not_found_page: &str) -> anyhow::Result<Self> {
        let page = reader.read(not_found_page).await.with_context(|| {
            format!(
                "cannot read 404 page {:?} under {}",
                not_found_page,
                reader.root().display()
            )
        })?;

        Ok(Self {
            reader,
            not_found_body: Bytes::from(page),
        })
    }

    pub fn reader(&self) -> &StaticFileReader {
        &self.reader
    }

    /// Builds the response for `target` (e.g. `/index.html`).
    pub async fn build(&self, target: &str) -> Response {
        let name = target.strip_prefix('/').unwrap_or(target);
        let content_type = mime::resolve(mime::extension_of(name));

        match self.reader.read(name).await {
            Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", content_type)
                .body(contents)
                .build(),

            Err(FileError::NotFound) => {
                tracing::debug!(path = %target, "No such file, serving 404 page");
                self.not_found()
            }

            Err(e) => {
                tracing::warn!(path = %target, error = %e, "Failed to read file, serving 404 page");
                self.not_found()
            }
        }
    }

    pub fn not_found(&self) -> Response {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Content-Type", NOT_FOUND_CONTENT_TYPE)
            .body(self.not_found_body.clone())
            .build()
    }
}
