use super::*;

// =============================================================
// ValidationErrors
// =============================================================

#[test]
fn validation_errors_plain_string_field() {
    let errors = ValidationErrors::from_body(r#"{"email": "Enter a valid email address."}"#);
    assert_eq!(errors.field("email"), Some("Enter a valid email address."));
}

#[test]
fn validation_errors_list_values_join() {
    let errors = ValidationErrors::from_body(r#"{"email": ["Too long.", "Not allowed."]}"#);
    assert_eq!(errors.field("email"), Some("Too long. Not allowed."));
}

#[test]
fn validation_errors_top_level_list_is_non_field() {
    let errors = ValidationErrors::from_body(r#"["request must include either an 'email' or a 'user_id'"]"#);
    assert_eq!(
        errors.field(NON_FIELD_ERRORS),
        Some("request must include either an 'email' or a 'user_id'")
    );
}

#[test]
fn validation_errors_non_json_body_kept_verbatim() {
    let errors = ValidationErrors::from_body("  Bad Request \n");
    assert_eq!(errors.field(NON_FIELD_ERRORS), Some("Bad Request"));
}

#[test]
fn validation_errors_empty_body_is_empty() {
    assert!(ValidationErrors::from_body("").is_empty());
    assert!(ValidationErrors::from_body("{}").is_empty());
}

#[test]
fn validation_errors_iter_is_sorted_by_field() {
    let errors = ValidationErrors::from_body(r#"{"expires_at": "bad", "email": "worse"}"#);
    let keys: Vec<&str> = errors.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["email", "expires_at"]);
}

// =============================================================
// CreateOutcome
// =============================================================

#[test]
fn create_outcome_try_map_converts_ok() {
    let outcome: CreateOutcome<i32> = CreateOutcome::Ok(2);
    let mapped: Result<CreateOutcome<i32>, ()> = outcome.try_map(|n| Ok(n * 10));
    assert_eq!(mapped, Ok(CreateOutcome::Ok(20)));
}

#[test]
fn create_outcome_try_map_keeps_validation_errors() {
    let errors = ValidationErrors::single("email", "nope");
    let outcome: CreateOutcome<i32> = CreateOutcome::Error(errors.clone());
    let mapped: Result<CreateOutcome<i32>, ()> = outcome.try_map(|_| Err(()));
    assert_eq!(mapped, Ok(CreateOutcome::Error(errors)));
}

// =============================================================
// Wire records
// =============================================================

#[test]
fn share_record_parses_server_payload() {
    let json = r#"{
        "id": 3,
        "user": {"email": "a@b.com"},
        "shared_at": "2019-01-01T12:00:00Z",
        "first_accessed_at": null,
        "last_accessed_at": null,
        "expires_at": "2019-02-01T12:00:00Z"
    }"#;
    let record: ShareRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, 3);
    assert_eq!(record.user.email, "a@b.com");
    assert!(record.last_accessed_at.is_none());
    assert_eq!(record.expires_at.as_deref(), Some("2019-02-01T12:00:00Z"));
}

#[test]
fn reviewer_record_accepts_null_variant() {
    let json = r#"{"id": 7, "internal": null, "external": {"email": "x@y.org"}}"#;
    let record: ReviewerRecord = serde_json::from_str(json).unwrap();
    assert!(record.internal.is_none());
    assert_eq!(record.external.unwrap().email, "x@y.org");
}

#[test]
fn new_share_request_omits_missing_expiry() {
    let body = serde_json::to_value(NewShareRequest { email: "a@b.com", expires_at: None }).unwrap();
    assert_eq!(body, serde_json::json!({"email": "a@b.com"}));
}

#[test]
fn new_reviewer_request_shapes() {
    let internal = serde_json::to_value(NewReviewerRequest::Internal { user_id: 4 }).unwrap();
    assert_eq!(internal, serde_json::json!({"user_id": 4}));
    let external = serde_json::to_value(NewReviewerRequest::External { email: "x@y.org" }).unwrap();
    assert_eq!(external, serde_json::json!({"email": "x@y.org"}));
}

#[test]
fn api_error_codes_are_stable() {
    let err = ApiError::UnexpectedStatus { endpoint: "share api", status: 500, body: String::new() };
    assert_eq!(err.error_code(), "E_API_STATUS");
    assert_eq!(err.to_string(), "share api returned unexpected status code: 500");
    let err = ApiError::from(TranslateError::MissingReviewer { id: 1 });
    assert_eq!(err.error_code(), "E_TRANSLATE");
}
