//! Integration tests for AppSync delivery.
//!
//! These tests run the full build, sign, send and unwrap pipeline against a
//! local mock server.

use std::time::{Duration, Instant};

use iam_signed::{
    app_sync, app_sync_with_cancellation, ClientConfig, Credentials, GraphqlError, HttpClient,
    HttpError,
};
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string, header, header_exists, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REGION: &str = "us-east-1";
const QUERY: &str = r#"{"query":"query { getItem(id: \"1\") { id } }"}"#;

fn test_credentials() -> Credentials {
    Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
}

fn graphql_endpoint(server: &MockServer) -> String {
    format!("{}/graphql", server.uri())
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_app_sync_returns_data_member() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data":{"x":1},"errors":[]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let data = assert_ok!(
        app_sync(
            QUERY.as_bytes().to_vec(),
            &graphql_endpoint(&server),
            REGION,
            &test_credentials(),
        )
        .await
    );

    assert_eq!(data, br#"{"x":1}"#);
}

#[tokio::test]
async fn test_app_sync_sends_signed_json_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(header_exists("x-amz-date"))
        .and(header_regex(
            "authorization",
            r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{8}/us-east-1/appsync/aws4_request, SignedHeaders=content-type;host;x-amz-date, Signature=[0-9a-f]{64}$",
        ))
        .and(header_regex("user-agent", r"^iam-signed v"))
        .and(body_string(QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let data = app_sync(
        QUERY.as_bytes().to_vec(),
        &graphql_endpoint(&server),
        REGION,
        &test_credentials(),
    )
    .await
    .unwrap();

    assert_eq!(data, b"{}");
}

#[tokio::test]
async fn test_app_sync_sends_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-security-token", "session-token-value"))
        .and(header_regex(
            "authorization",
            r"SignedHeaders=content-type;host;x-amz-date;x-amz-security-token,",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":null}"#))
        .expect(1)
        .mount(&server)
        .await;

    let creds = test_credentials().with_session_token("session-token-value");
    let data = app_sync(Vec::new(), &graphql_endpoint(&server), REGION, &creds)
        .await
        .unwrap();

    assert_eq!(data, b"null");
}

#[tokio::test]
async fn test_app_sync_through_configured_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_regex("user-agent", r"^inventory-sync/1\.4 \| iam-signed v"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{"ok":true}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .user_agent_prefix("inventory-sync/1.4")
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let data = client
        .app_sync(Vec::new(), &graphql_endpoint(&server), REGION, &test_credentials())
        .await
        .unwrap();

    assert_eq!(data, br#"{"ok":true}"#);
}

#[tokio::test]
async fn test_app_sync_concurrent_calls_are_signed_and_answered_independently() {
    let server = MockServer::start().await;
    let signed = r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{8}/us-east-1/appsync/aws4_request, SignedHeaders=content-type;host;x-amz-date, Signature=[0-9a-f]{64}$";
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header_regex("authorization", signed))
        .and(body_string(r#"{"query":"{ first }"}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"data":{"first":1}}"#)
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header_regex("authorization", signed))
        .and(body_string(r#"{"query":"{ second }"}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"data":null,"errors":[{"message":"second failed"}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = graphql_endpoint(&server);
    let creds = test_credentials();
    let (first, second) = tokio::join!(
        app_sync(br#"{"query":"{ first }"}"#.to_vec(), &endpoint, REGION, &creds),
        app_sync(br#"{"query":"{ second }"}"#.to_vec(), &endpoint, REGION, &creds),
    );

    assert_eq!(first.unwrap(), br#"{"first":1}"#);
    let error = second.unwrap_err();
    assert!(error.to_string().contains("second failed"));
    assert_eq!(error.partial_data(), Some(&b"null"[..]));
}

// ============================================================================
// GraphQL Errors
// ============================================================================

#[tokio::test]
async fn test_app_sync_graphql_errors_keep_partial_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data":null,"errors":[{"message":"boom","locations":[{"line":1,"column":2}]}]}"#,
        ))
        .mount(&server)
        .await;

    let error = assert_err!(
        app_sync(Vec::new(), &graphql_endpoint(&server), REGION, &test_credentials()).await
    );

    let message = error.to_string();
    assert!(message.contains("1 error(s)"), "unexpected message: {message}");
    assert!(message.contains("boom"), "unexpected message: {message}");
    assert_eq!(error.partial_data(), Some(&b"null"[..]));
}

#[tokio::test]
async fn test_app_sync_errors_are_reported_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data":{"a":1,"b":null},"errors":[
                {"message":"first","path":["b"],"errorType":"Unauthorized"},
                {"message":"second"}
            ]}"#,
        ))
        .mount(&server)
        .await;

    let result = app_sync(Vec::new(), &graphql_endpoint(&server), REGION, &test_credentials()).await;

    match result {
        Err(GraphqlError::Response(e)) => {
            assert_eq!(e.data, br#"{"a":1,"b":null}"#);
            assert_eq!(e.errors.len(), 2);
            assert_eq!(e.errors[0].message, "first");
            assert_eq!(e.errors[0].error_type.as_deref(), Some("Unauthorized"));
            assert_eq!(e.errors[1].message, "second");
        }
        other => panic!("Expected Response error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_app_sync_non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = app_sync(Vec::new(), &graphql_endpoint(&server), REGION, &test_credentials()).await;

    match result {
        Err(error @ GraphqlError::Parse(_)) => {
            assert!(error.to_string().contains("not json"));
        }
        other => panic!("Expected Parse error, got: {other:?}"),
    }
}

// ============================================================================
// Status And Transport Failures
// ============================================================================

#[tokio::test]
async fn test_app_sync_non_200_is_unexpected_status() {
    for code in [201_u16, 204, 304, 401, 403, 500] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(code).set_body_string(r#"{"data":{}}"#))
            .mount(&server)
            .await;

        let result =
            app_sync(Vec::new(), &graphql_endpoint(&server), REGION, &test_credentials()).await;

        assert!(
            matches!(&result, Err(GraphqlError::Http(HttpError::UnexpectedStatus(e))) if e.code == code),
            "Expected status {code}, got: {result:?}"
        );
    }
}

#[tokio::test]
async fn test_app_sync_cancellation_returns_promptly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"data":{}}"#)
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let result = app_sync_with_cancellation(
        &cancel,
        Vec::new(),
        &graphql_endpoint(&server),
        REGION,
        &test_credentials(),
    )
    .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(
        matches!(&result, Err(GraphqlError::Http(e)) if e.is_cancelled()),
        "Expected cancellation, got: {result:?}"
    );
}
