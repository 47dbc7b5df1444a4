use super::call::{Endpoint, Payload};
use super::codec;
use super::config::{Credentials, TransportOptions, API_KEY_ENV, ENDPOINT_ENV, PROJECT_ID_ENV};
use super::middleware::{keeps_content_type, IdentityHeaders, KEY_HEADER, PROJECT_HEADER};
use super::transport::Transport;
use super::*;
use bytes::Bytes;
use futures::StreamExt;
use httpmock::prelude::*;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

fn create_transport(server: &MockServer) -> Transport {
    let credentials = Credentials::new("test-project", "test-key")
        .unwrap()
        .with_endpoint(&server.url("/v1"))
        .unwrap();
    Transport::new(&credentials, TransportOptions::default()).unwrap()
}

#[test]
fn test_credentials_reject_blank_values() {
    for (project, key) in [("", "k"), ("p", ""), ("   ", "k"), ("p", "\t\n")] {
        let err = Credentials::new(project, key).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("cannot be null or empty"));
    }
}

#[test]
fn test_credentials_default_endpoint() {
    let credentials = Credentials::new("p1", "k1").unwrap();
    assert_eq!(credentials.endpoint().as_str(), DEFAULT_ENDPOINT);
    assert_eq!(credentials.project_id(), "p1");
    assert_eq!(credentials.api_key().expose_secret(), "k1");
}

#[test]
fn test_credentials_reject_bad_endpoints() {
    for endpoint in ["", "not a url", "ftp://example.com/v1", "mailto:admin@example.com"] {
        let err = Credentials::new("p1", "k1")
            .unwrap()
            .with_endpoint(endpoint)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{}", endpoint);
    }
}

#[test]
fn test_credentials_from_lookup() {
    let vars = HashMap::from([
        (PROJECT_ID_ENV, "p1"),
        (API_KEY_ENV, "k1"),
        (ENDPOINT_ENV, "http://localhost/v1"),
    ]);
    let credentials =
        Credentials::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

    assert_eq!(credentials.project_id(), "p1");
    assert_eq!(credentials.endpoint().as_str(), "http://localhost/v1");
}

#[test]
fn test_credentials_from_lookup_names_missing_variable() {
    let err = Credentials::from_lookup(|name| {
        (name == PROJECT_ID_ENV).then(|| "p1".to_string())
    })
    .unwrap_err();

    assert!(err.to_string().contains(API_KEY_ENV));
}

#[test]
fn test_credentials_debug_hides_key() {
    let credentials = Credentials::new("p1", "super-secret-key").unwrap();
    let printed = format!("{:?}", credentials);
    assert!(printed.contains("p1"));
    assert!(!printed.contains("super-secret-key"));
}

#[test]
fn test_identity_headers_apply() {
    let credentials = Credentials::new("p1", "k1").unwrap();
    let headers = IdentityHeaders::new(&credentials).unwrap();

    let mut map = HeaderMap::new();
    headers.apply(&mut map);

    assert_eq!(map.len(), 3);
    assert_eq!(map[PROJECT_HEADER], "p1");
    assert_eq!(map[KEY_HEADER], "k1");
    assert!(map[KEY_HEADER].is_sensitive());
    assert_eq!(map[CONTENT_TYPE], "application/json");
}

#[test]
fn test_identity_headers_overwrite_caller_values() {
    let credentials = Credentials::new("p1", "k1").unwrap();
    let headers = IdentityHeaders::new(&credentials).unwrap();

    let mut map = HeaderMap::new();
    map.insert(PROJECT_HEADER, HeaderValue::from_static("other"));
    map.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers.apply(&mut map);

    assert_eq!(map[PROJECT_HEADER], "p1");
    assert_eq!(map.get_all(PROJECT_HEADER).iter().count(), 1);
    assert_eq!(map[CONTENT_TYPE], "application/json");
}

#[test]
fn test_identity_headers_reject_invalid_values() {
    let credentials = Credentials::new("p1", "bad\nkey").unwrap();
    assert!(matches!(
        IdentityHeaders::new(&credentials),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_keeps_content_type() {
    let multipart = HeaderValue::from_static("multipart/form-data; boundary=abc");
    let form = HeaderValue::from_static("application/x-www-form-urlencoded");
    let text = HeaderValue::from_static("text/plain");

    assert!(keeps_content_type(Some(&multipart)));
    assert!(keeps_content_type(Some(&form)));
    assert!(!keeps_content_type(Some(&text)));
    assert!(!keeps_content_type(None));
}

#[test]
fn test_endpoint_url_joins_base_path() {
    let endpoint = Endpoint::get("databases/{databaseId}").path_param("databaseId", "main");

    for base in ["https://example.test/v1", "https://example.test/v1/"] {
        let url = endpoint.url(&Url::parse(base).unwrap()).unwrap();
        assert_eq!(url.as_str(), "https://example.test/v1/databases/main");
    }
}

#[test]
fn test_endpoint_url_requires_path_params() {
    let base = Url::parse("https://example.test/v1").unwrap();

    let missing = Endpoint::get("teams/{teamId}");
    assert!(matches!(missing.url(&base), Err(Error::InvalidArgument(_))));

    let blank = Endpoint::get("teams/{teamId}").path_param("teamId", " ");
    assert!(matches!(blank.url(&base), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_endpoint_url_rejects_dot_segments() {
    let base = Url::parse("https://example.test/v1").unwrap();

    for id in [".", ".."] {
        let endpoint = Endpoint::delete("teams/{teamId}/memberships/{membershipId}")
            .path_param("teamId", "editors")
            .path_param("membershipId", id);
        assert!(
            matches!(endpoint.url(&base), Err(Error::InvalidArgument(_))),
            "{}",
            id
        );
    }

    let dotted = Endpoint::get("teams/{teamId}").path_param("teamId", "a..b");
    assert_eq!(
        dotted.url(&base).unwrap().as_str(),
        "https://example.test/v1/teams/a..b"
    );
}

#[test]
fn test_endpoint_url_query() {
    let base = Url::parse("https://example.test/v1").unwrap();
    let endpoint = Endpoint::get("databases")
        .query_list("queries", &["limit(5)", "offset(10)"])
        .query_opt("search", None::<&str>)
        .query("cursor", 7);

    let url = endpoint.url(&base).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("queries[]".to_string(), "limit(5)".to_string()),
            ("queries[]".to_string(), "offset(10)".to_string()),
            ("cursor".to_string(), "7".to_string()),
        ]
    );
}

#[test]
fn test_endpoint_rejects_unencodable_body() {
    let body: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
    let endpoint = Endpoint::post("databases").json(&body);
    assert!(matches!(endpoint.payload(), Payload::Rejected(_)));
}

#[test]
fn test_decode_json_tolerates_framing() {
    let body = Bytes::from_static(b"\xEF\xBB\xBF  \n{\"a\": 1}\r\n ");
    let value: Value = codec::decode_json(body).unwrap();
    assert_eq!(value, json!({ "a": 1 }));
}

#[test]
fn test_decode_json_truncated_body() {
    let err = codec::decode_json::<Value>(Bytes::from_static(b"{\"a\": ")).unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "{\"a\":"),
        other => panic!("expected deserialization error, got {:?}", other),
    }
}

#[test]
fn test_decode_json_excerpt_is_bounded() {
    let long = format!("[{}", "1,".repeat(2000));
    let err = codec::decode_json::<Value>(Bytes::from(long)).unwrap_err();
    match err {
        Error::Deserialization { body, .. } => {
            assert!(body.ends_with("(truncated)"));
            assert!(body.len() < 1100);
        }
        other => panic!("expected deserialization error, got {:?}", other),
    }
}

#[test]
fn test_api_error_helpers() {
    let err = Error::Api {
        status: reqwest::StatusCode::UNAUTHORIZED,
        body: r#"{"message":"Invalid key","code":401,"type":"user_unauthorized","version":"1.5.7"}"#
            .to_string(),
    };
    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    let body = err.api_error().unwrap();
    assert_eq!(body.code, 401);
    assert_eq!(body.kind, "user_unauthorized");

    let foreign = Error::Api {
        status: reqwest::StatusCode::BAD_GATEWAY,
        body: "<html>bad gateway</html>".to_string(),
    };
    assert!(foreign.api_error().is_none());
    assert!(!foreign.is_configuration());
}

#[tokio::test]
async fn test_transport_sends_identity_headers() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/health")
            .header("x-appwrite-project", "test-project")
            .header("x-appwrite-key", "test-key")
            .header("content-type", "application/json");
        then.status(200).json_body(json!({ "status": "pass" }));
    });

    let health: Value = transport.json(Endpoint::get("health")).await.unwrap();
    assert_eq!(health["status"], "pass");
    mock.assert();
}

#[tokio::test]
async fn test_transport_sends_form_body() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/echo")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("x-appwrite-key", "test-key")
            .body("name=John+Doe&age=30");
        then.status(204);
    });

    transport
        .empty(
            Endpoint::post("echo")
                .form_field("name", "John Doe")
                .form_field("age", 30),
        )
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn test_transport_reports_rejected_body_without_sending() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let body: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
    let err = transport
        .empty(Endpoint::post("echo").json(&body))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn test_transport_connection_failure() {
    let credentials = Credentials::new("p1", "k1")
        .unwrap()
        .with_endpoint("http://127.0.0.1:1/v1")
        .unwrap();
    let transport = Transport::new(&credentials, TransportOptions::default()).unwrap();

    let err = transport.empty(Endpoint::get("health")).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_transport_timeout() {
    let server = MockServer::start();
    let credentials = Credentials::new("p1", "k1")
        .unwrap()
        .with_endpoint(&server.url("/v1"))
        .unwrap();
    let options = TransportOptions {
        timeout: Some(Duration::from_millis(100)),
        ..Default::default()
    };
    let transport = Transport::new(&credentials, options).unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/v1/slow");
        then.status(200).delay(Duration::from_secs(2));
    });

    let err = transport.empty(Endpoint::get("slow")).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_spawned_call() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/health");
        then.status(200).json_body(json!({ "status": "pass" }));
    });

    let handle = transport.json::<Value>(Endpoint::get("health")).spawn();
    let health = handle.await.unwrap();
    assert_eq!(health["status"], "pass");
    mock.assert();
}

#[tokio::test]
async fn test_aborted_call_is_cancelled() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    server.mock(|when, then| {
        when.method(GET).path("/v1/slow");
        then.status(200).delay(Duration::from_secs(5));
    });

    let handle = transport.empty(Endpoint::get("slow")).spawn();
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    assert!(matches!(handle.await, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_call_can_be_cloned_and_reissued() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let first = server.mock(|when, then| {
        when.method(DELETE).path("/v1/teams/a");
        then.status(204);
    });
    let second = server.mock(|when, then| {
        when.method(DELETE).path("/v1/teams/b");
        then.status(204);
    });

    let a = transport.empty(Endpoint::delete("teams/{teamId}").path_param("teamId", "a"));
    let b = transport.empty(Endpoint::delete("teams/{teamId}").path_param("teamId", "b"));
    let (ra, rb) = tokio::join!(a.clone().execute(), b.execute());
    ra.unwrap();
    rb.unwrap();

    first.assert();
    second.assert();
    assert!(format!("{:?}", a).contains("teams/{teamId}"));
}

#[test]
fn test_execute_blocking() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/health");
        then.status(200).json_body(json!({ "status": "pass" }));
    });

    let health: Value = transport
        .json(Endpoint::get("health"))
        .execute_blocking()
        .unwrap();
    assert_eq!(health["status"], "pass");
    mock.assert();
}

#[tokio::test]
async fn test_execute_stream_reports_api_errors() {
    let server = MockServer::start();
    let transport = create_transport(&server);

    let ok = server.mock(|when, then| {
        when.method(GET).path("/v1/blob");
        then.status(200).body("chunked content");
    });
    let missing = server.mock(|when, then| {
        when.method(GET).path("/v1/missing");
        then.status(404).body("not found");
    });

    let mut stream = transport.bytes(Endpoint::get("blob")).execute_stream().await.unwrap();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(body, b"chunked content");

    let err = transport
        .bytes(Endpoint::get("missing"))
        .execute_stream()
        .await
        .err()
        .unwrap();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));

    ok.assert();
    missing.assert();
}
