use docroot::http::mime::{DEFAULT_CONTENT_TYPE, extension_of, resolve};

#[test]
fn test_known_extensions() {
    assert_eq!(resolve("html"), "text/html");
    assert_eq!(resolve("htm"), "text/html");
    assert_eq!(resolve("txt"), "text/plain");
    assert_eq!(resolve("jpg"), "image/jpeg");
    assert_eq!(resolve("jpeg"), "image/jpeg");
    assert_eq!(resolve("png"), "image/png");
    assert_eq!(resolve("json"), "application/json");
}

#[test]
fn test_case_insensitive() {
    assert_eq!(resolve("HTML"), resolve("html"));
    assert_eq!(resolve("HTML"), "text/html");
    assert_eq!(resolve("JpEg"), "image/jpeg");
}

#[test]
fn test_unknown_and_empty_extension() {
    assert_eq!(resolve(""), "application/octet-stream");
    assert_eq!(resolve("css"), DEFAULT_CONTENT_TYPE);
    assert_eq!(resolve("tar.gz"), DEFAULT_CONTENT_TYPE);
}

#[test]
fn test_extension_feeds_resolve() {
    assert_eq!(resolve(extension_of("docs/index.HTML")), "text/html");
    assert_eq!(resolve(extension_of("Makefile")), DEFAULT_CONTENT_TYPE);
    assert_eq!(resolve(extension_of(".json")), DEFAULT_CONTENT_TYPE);
}
