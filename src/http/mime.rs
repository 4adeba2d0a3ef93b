//! MIME type detection
//!
//! Maps a file extension to the Content-Type the server sends for it.

/// Content-Type for anything the table does not know.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Resolves a file extension (without the dot) to a Content-Type.
///
/// Matching ignores ASCII case. Unknown and empty extensions fall back to
/// [`DEFAULT_CONTENT_TYPE`].
///
/// # Examples
/// ```
/// use docroot::http::mime::resolve;
/// assert_eq!(resolve("HTML"), "text/html");
/// assert_eq!(resolve("jpeg"), "image/jpeg");
/// assert_eq!(resolve(""), "application/octet-stream");
/// ```
pub fn resolve(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "json" => "application/json",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Extension of the last path segment of `name`.
///
/// Empty when the segment has no `.`, or when its only `.` leads the
/// segment (dotfiles such as `.profile`).
pub fn extension_of(name: &str) -> &str {
    let segment = name.rsplit('/').next().unwrap_or(name);

    match segment.rfind('.') {
        Some(0) | None => "",
        Some(i) => &segment[i + 1..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_rules() {
        assert_eq!(extension_of("index.html"), "html");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".profile"), "");
        assert_eq!(extension_of("assets.v2/logo"), "");
        assert_eq!(extension_of("img/photo.JPG"), "JPG");
        assert_eq!(extension_of("trailing."), "");
    }
}
