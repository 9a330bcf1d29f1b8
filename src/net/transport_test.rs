use super::*;
use crate::net::types::ShareRecord;

const SHARE_JSON: &str = r#"{"id": 1, "user": {"email": "a@b.com"}, "last_accessed_at": null, "expires_at": null}"#;

// =============================================================================
// into_list
// =============================================================================

#[test]
fn into_list_decodes_array() {
    let records: Vec<ShareRecord> = HttpResponse::new(200, format!("[{SHARE_JSON}]")).into_list("share api").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user.email, "a@b.com");
}

#[test]
fn into_list_rejects_non_200() {
    let err = HttpResponse::new(403, "forbidden").into_list::<ShareRecord>("share api").unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 403, .. }));
}

#[test]
fn into_list_bad_json_is_parse_error() {
    let err = HttpResponse::new(200, "{not json").into_list::<ShareRecord>("share api").unwrap_err();
    assert_eq!(err.error_code(), "E_API_PARSE");
}

// =============================================================================
// into_create_outcome
// =============================================================================

#[test]
fn create_outcome_accepts_200_and_201() {
    for status in [200, 201] {
        let outcome = HttpResponse::new(status, SHARE_JSON).into_create_outcome::<ShareRecord>("share api").unwrap();
        assert!(outcome.is_ok(), "status {status} should be ok");
    }
}

#[test]
fn create_outcome_400_is_validation_error() {
    let outcome = HttpResponse::new(400, r#"{"email": "Enter a valid email address."}"#)
        .into_create_outcome::<ShareRecord>("share api")
        .unwrap();
    match outcome {
        CreateOutcome::Error(errors) => assert_eq!(errors.field("email"), Some("Enter a valid email address.")),
        CreateOutcome::Ok(_) => panic!("expected validation error"),
    }
}

#[test]
fn create_outcome_other_status_is_hard_failure() {
    let err = HttpResponse::new(500, "boom")
        .into_create_outcome::<ShareRecord>("share api")
        .unwrap_err();
    match err {
        ApiError::UnexpectedStatus { endpoint, status, body } => {
            assert_eq!(endpoint, "share api");
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// HttpTransport::new
// =============================================================================

#[test]
fn http_transport_builds_with_csrf_and_cookie() {
    let mut config = ClientConfig::new("http://localhost/api");
    config.csrf_token = Some("token".into());
    config.session_cookie = Some("sessionid=abc".into());
    assert!(HttpTransport::new(&config).is_ok());
}

#[test]
fn http_transport_rejects_bad_csrf_header_name() {
    let mut config = ClientConfig::new("http://localhost/api");
    config.csrf_header = "bad header".into();
    config.csrf_token = Some("token".into());
    let err = HttpTransport::new(&config).err().unwrap();
    assert_eq!(err.error_code(), "E_INVALID_HEADER");
}

#[test]
fn http_transport_rejects_bad_cookie_value() {
    let mut config = ClientConfig::new("http://localhost/api");
    config.session_cookie = Some("line\nbreak".into());
    assert!(HttpTransport::new(&config).is_err());
}

// =============================================================================
// HttpTransport headers
// =============================================================================

/// Accept one connection, answer `200 []`, and return the request head
/// lowercased.
async fn capture_request(listener: &tokio::net::TcpListener) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let (mut socket, _) = listener.accept().await.unwrap();
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        raw.extend_from_slice(&chunk[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&raw[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map_or(0, |v| v.trim().parse::<usize>().unwrap());
    while raw.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body");
        raw.extend_from_slice(&chunk[..n]);
    }

    socket
        .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n[]")
        .await
        .unwrap();
    head
}

#[tokio::test]
async fn csrf_header_only_on_post_and_cookie_on_every_request() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/things/", listener.local_addr().unwrap());

    let mut config = ClientConfig::new("http://unused/api");
    config.csrf_token = Some("tok123".into());
    config.session_cookie = Some("sessionid=abc".into());
    let transport = HttpTransport::new(&config).unwrap();

    let server = tokio::spawn(async move {
        let get = capture_request(&listener).await;
        let post = capture_request(&listener).await;
        (get, post)
    });

    let got = transport.get(&url).await.unwrap();
    assert_eq!(got, HttpResponse::new(200, "[]"));
    let posted = transport.post_json(&url, &serde_json::json!({"email": "a@b.com"})).await.unwrap();
    assert_eq!(posted.status, 200);

    let (get, post) = server.await.unwrap();
    assert!(get.starts_with("get "));
    assert!(!get.contains("x-csrftoken:"));
    assert!(get.contains("cookie: sessionid=abc"));

    assert!(post.starts_with("post "));
    assert!(post.contains("x-csrftoken: tok123"));
    assert!(post.contains("cookie: sessionid=abc"));
    assert!(post.contains("content-type: application/json"));
}

#[tokio::test]
async fn no_csrf_header_without_token() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/things/", listener.local_addr().unwrap());
    let transport = HttpTransport::new(&ClientConfig::new("http://unused/api")).unwrap();

    let server = tokio::spawn(async move { capture_request(&listener).await });
    transport.post_json(&url, &serde_json::json!({})).await.unwrap();

    let post = server.await.unwrap();
    assert!(!post.contains("x-csrftoken:"));
    assert!(!post.contains("cookie:"));
}
