use docroot::http::response::{ResponseBuilder, StatusCode};
use docroot::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_line() {
    assert_eq!(StatusCode::Ok.status_line(), "200 OK");
    assert_eq!(StatusCode::NotFound.status_line(), "404 Not Found");
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(&response.body[..], b"Hello, World!");
    assert!(response.headers.is_empty());
}

#[test]
fn test_response_builder_replaces_same_header() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.content_type(), Some("text/html"));
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/json")
        .header("X-Frame-Options", "DENY")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Content-Type", "X-Frame-Options"]);
}

#[test]
fn test_serialize_has_single_content_type_header() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .body(b"<h1>hi</h1>".to_vec())
        .build();

    assert_eq!(
        serialize_response(&response),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<h1>hi</h1>".to_vec()
    );
}

#[test]
fn test_serialize_not_found() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Content-Type", "text/html")
        .build();

    assert_eq!(
        serialize_response(&response),
        b"HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_writer_writes_everything() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/octet-stream")
        .body(vec![7u8; 100_000])
        .build();

    let mut writer = ResponseWriter::new(&response);
    let expected_len = writer.len();

    let mut out: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out.len(), expected_len);
    assert_eq!(out, serialize_response(&response));
}

#[tokio::test]
async fn test_writer_handles_short_writes() {
    use tokio::io::AsyncReadExt;

    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(vec![b'x'; 50_000])
        .build();
    let expected = serialize_response(&response);

    // A tiny pipe forces many partial writes.
    let (mut server, mut client) = tokio::io::duplex(64);

    let write = tokio::spawn(async move {
        let mut writer = ResponseWriter::new(&response);
        writer.write_to_stream(&mut server).await.unwrap();
    });

    let mut received = vec![0u8; expected.len()];
    client.read_exact(&mut received).await.unwrap();
    write.await.unwrap();

    assert_eq!(received, expected);
}
