use super::*;
use crate::net::test_helpers::{MockTransport, Recorded};
use crate::net::types::ValidationErrors;

const SHARES_URL: &str = "http://h/api/page/7/shares/";
const COMMENTS_URL: &str = "http://h/api/page/7/comments/";

fn api(mock: &Arc<MockTransport>) -> PageApi {
    let transport: Arc<dyn Transport> = mock.clone();
    PageApi::with_urls(transport, SHARES_URL.into(), COMMENTS_URL.into())
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_derives_urls_from_config() {
    let mut config = ClientConfig::new("http://h/api");
    config.page_id = Some(7);
    let api = PageApi::new(Arc::new(MockTransport::new(vec![])), &config).unwrap();
    assert_eq!(api.shares_url, SHARES_URL);
    assert_eq!(api.comments_url, COMMENTS_URL);
}

#[test]
fn new_without_page_id_errors() {
    let config = ClientConfig::new("http://h/api");
    assert!(PageApi::new(Arc::new(MockTransport::new(vec![])), &config).is_err());
}

// =============================================================================
// get_shares / get_comments
// =============================================================================

#[tokio::test]
async fn get_shares_decodes_list() {
    let mock = Arc::new(MockTransport::replying(
        200,
        r#"[{"id": 1, "user": {"email": "a@b.com"}, "shared_at": "2019-01-01T00:00:00Z",
             "first_accessed_at": null, "last_accessed_at": null, "expires_at": null}]"#,
    ));
    let shares = api(&mock).get_shares().await.unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].user.email, "a@b.com");
    assert_eq!(mock.requests(), vec![Recorded::Get(SHARES_URL.into())]);
}

#[tokio::test]
async fn get_shares_non_200_fails() {
    let mock = Arc::new(MockTransport::replying(404, "not found"));
    let err = api(&mock).get_shares().await.unwrap_err();
    assert_eq!(err.to_string(), "share api returned unexpected status code: 404");
}

#[tokio::test]
async fn get_comments_decodes_list() {
    let mock = Arc::new(MockTransport::replying(
        200,
        r#"[{"id": 3, "author": {"name": "Alice"}, "quote": "q", "text": "t",
             "created_at": "2019-01-01T12:00:00Z", "updated_at": "2019-01-01T12:00:00Z",
             "is_resolved": false, "replies": [], "frontend_url": "http://h/review/3"}]"#,
    ));
    let comments = api(&mock).get_comments().await.unwrap();
    assert_eq!(comments[0].id, 3);
    assert_eq!(comments[0].frontend_url, "http://h/review/3");
    assert_eq!(mock.requests(), vec![Recorded::Get(COMMENTS_URL.into())]);
}

#[tokio::test]
async fn transport_failure_propagates() {
    let mock = Arc::new(MockTransport::new(vec![Err(ApiError::Request("connection refused".into()))]));
    let err = api(&mock).get_comments().await.unwrap_err();
    assert_eq!(err.error_code(), "E_API_REQUEST");
}

// =============================================================================
// new_share
// =============================================================================

#[tokio::test]
async fn new_share_posts_email_and_returns_record() {
    let mock = Arc::new(MockTransport::replying(
        201,
        r#"{"id": 9, "user": {"email": "a@b.com"}, "last_accessed_at": null, "expires_at": null}"#,
    ));
    let outcome = api(&mock).new_share("a@b.com", None).await.unwrap();
    match outcome {
        CreateOutcome::Ok(record) => assert_eq!(record.id, 9),
        CreateOutcome::Error(errors) => panic!("unexpected validation errors: {errors:?}"),
    }
    assert_eq!(
        mock.requests(),
        vec![Recorded::Post(SHARES_URL.into(), serde_json::json!({"email": "a@b.com"}))]
    );
}

#[tokio::test]
async fn new_share_sends_expiry_when_given() {
    let mock = Arc::new(MockTransport::replying(
        201,
        r#"{"id": 9, "user": {"email": "a@b.com"}, "expires_at": "2030-01-01T00:00:00Z"}"#,
    ));
    api(&mock).new_share("a@b.com", Some("2030-01-01T00:00:00Z")).await.unwrap();
    assert_eq!(
        mock.requests(),
        vec![Recorded::Post(
            SHARES_URL.into(),
            serde_json::json!({"email": "a@b.com", "expires_at": "2030-01-01T00:00:00Z"})
        )]
    );
}

#[tokio::test]
async fn new_share_duplicate_is_validation_error() {
    let mock = Arc::new(MockTransport::replying(
        400,
        r#"{"email": ["This page has already been shared with this email address"]}"#,
    ));
    let outcome = api(&mock).new_share("a@b.com", None).await.unwrap();
    assert_eq!(
        outcome,
        CreateOutcome::Error(ValidationErrors::single(
            "email",
            "This page has already been shared with this email address"
        ))
    );
}

#[tokio::test]
async fn new_share_server_error_fails_hard() {
    let mock = Arc::new(MockTransport::replying(500, "oops"));
    let err = api(&mock).new_share("a@b.com", None).await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, .. }));
}
