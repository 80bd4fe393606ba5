//! Integration tests for request execution, retries and authentication
//!
//! Every test talks to a local mock server, so nothing leaves the machine.

mod common;

use common::{MockResponse, MockServer};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use schematics_core::{
    BaseService, BearerTokenAuthenticator, CoreError, FilePart, IamAuthenticator,
    NoAuthAuthenticator,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn noauth_service(server: &MockServer) -> BaseService {
    BaseService::new(&server.url, Arc::new(NoAuthAuthenticator)).unwrap()
}

#[tokio::test]
async fn test_json_round_trip_with_query_and_headers() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(201, json!({"id": "job-1"})).with_header("x-request-id", "r1"));

    let service = BaseService::new(
        &server.url,
        Arc::new(BearerTokenAuthenticator::new("tok").unwrap()),
    )
    .unwrap();

    let request = service
        .request(Method::POST, "/v2/jobs", &[])
        .unwrap()
        .query("profile", "summary")
        .header("Accept", "application/json")
        .header("refresh_token", "rt")
        .json(&json!({"command_object": "workspace"}))
        .unwrap();

    let response = service.send_json::<Value>(&request).await.unwrap();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.result["id"], "job-1");
    assert_eq!(response.header("x-request-id"), Some("r1"));

    let recorded = server.last_request();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/v2/jobs");
    assert_eq!(recorded.query.as_deref(), Some("profile=summary"));
    assert_eq!(recorded.header("authorization"), Some("Bearer tok"));
    assert_eq!(recorded.header("refresh_token"), Some("rt"));
    assert!(recorded
        .header("user-agent")
        .unwrap()
        .starts_with("schematics-rust-sdk/"));
    assert_eq!(recorded.json(), json!({"command_object": "workspace"}));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    let mut service = noauth_service(&server);

    let mut headers = HeaderMap::new();
    headers.insert("x-tenant", HeaderValue::from_static("acme"));
    service.set_default_headers(headers);

    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    service.send_json::<Value>(&request).await.unwrap();

    let recorded = server.last_request();
    assert_eq!(recorded.header("x-tenant"), Some("acme"));
    assert!(recorded.header("authorization").is_none());
}

#[tokio::test]
async fn test_service_error_extracts_message() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(
        404,
        json!({"errors": [{"message": "Workspace not found"}]}),
    ));

    let service = noauth_service(&server);
    let request = service
        .request(Method::GET, "/v1/workspaces/{w_id}", &[("w_id", "missing")])
        .unwrap();
    let err = service.send_json::<Value>(&request).await.unwrap_err();

    match err {
        CoreError::Service {
            status,
            ref message,
            ref body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Workspace not found");
            assert!(body.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_service_error_without_json_uses_reason() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::text(403, "nope"));

    let service = noauth_service(&server);
    let request = service.request(Method::GET, "/v2/jobs", &[]).unwrap();
    let err = service.send_json::<Value>(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Forbidden (HTTP 403)");
    assert!(err.body().is_none());
}

#[tokio::test]
async fn test_undecodable_body_is_deserialization_error() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::text(200, "<html>"));

    let service = noauth_service(&server);
    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    let err = service.send_json::<Value>(&request).await.unwrap_err();
    assert!(matches!(err, CoreError::Deserialization(_)));
}

#[tokio::test]
async fn test_retries_transient_status_when_enabled() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::empty(503).with_header("retry-after", "0"));
    server.enqueue(MockResponse::empty(429).with_header("retry-after", "0"));
    server.enqueue(MockResponse::json(200, json!({"ok": true})));

    let mut service = noauth_service(&server);
    service.enable_retries(3, Duration::from_secs(1));

    let request = service.request(Method::GET, "/v2/actions", &[]).unwrap();
    let response = service.send_json::<Value>(&request).await.unwrap();
    assert_eq!(response.result["ok"], true);
    assert_eq!(server.requests().len(), 3);
}

/// Raw HTTP endpoint that drops the first `drops` connections after reading
/// the request, then answers `200 {"ok":true}`.
async fn dropping_server(drops: usize) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let seen = counter.fetch_add(1, Ordering::SeqCst);
            let mut buf = vec![0u8; 4096];
            let mut read = 0;
            while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf[read..]).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => read += n,
                }
            }
            if seen < drops {
                drop(socket);
                continue;
            }
            let body = r#"{"ok":true}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (url, accepted)
}

#[tokio::test]
async fn test_retries_dropped_connection_when_enabled() {
    let (url, accepted) = dropping_server(1).await;
    let mut service = BaseService::new(&url, Arc::new(NoAuthAuthenticator)).unwrap();
    service.enable_retries(2, Duration::from_millis(50));

    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    let response = service.send_json::<Value>(&request).await.unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.result["ok"], true);
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_dropped_connection_is_transport_error_without_retries() {
    let (url, accepted) = dropping_server(1).await;
    let service = BaseService::new(&url, Arc::new(NoAuthAuthenticator)).unwrap();

    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    let err = service.send_json::<Value>(&request).await.unwrap_err();
    assert!(matches!(err, CoreError::Transport(_)));
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_no_retry_when_disabled() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::empty(503));
    server.enqueue(MockResponse::json(200, json!({})));

    let service = noauth_service(&server);
    let request = service.request(Method::GET, "/v2/actions", &[]).unwrap();
    let err = service.send_json::<Value>(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_501_and_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::empty(501));
    server.enqueue(MockResponse::empty(400));

    let mut service = noauth_service(&server);
    service.enable_retries(4, Duration::from_secs(1));

    let request = service.request(Method::GET, "/v2/actions", &[]).unwrap();
    assert_eq!(
        service.send_json::<Value>(&request).await.unwrap_err().status_code(),
        Some(501)
    );
    assert_eq!(
        service.send_json::<Value>(&request).await.unwrap_err().status_code(),
        Some(400)
    );
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_retries_give_up_after_max() {
    let server = MockServer::start().await;
    for _ in 0..3 {
        server.enqueue(MockResponse::empty(500).with_header("retry-after", "0"));
    }

    let mut service = noauth_service(&server);
    service.enable_retries(2, Duration::from_secs(1));

    let request = service.request(Method::DELETE, "/v2/jobs/{job_id}", &[("job_id", "j")]).unwrap();
    let err = service.send_empty(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_multipart_upload_is_resent_on_retry() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::empty(502).with_header("retry-after", "0"));
    server.enqueue(MockResponse::json(200, json!({"has_received_file": true})));

    let mut service = noauth_service(&server);
    service.enable_retries(1, Duration::from_secs(1));

    let request = service
        .request(Method::PUT, "/v2/actions/{action_id}/template_repo_upload", &[("action_id", "a1")])
        .unwrap()
        .multipart(vec![FilePart::new("file", b"tarball-bytes".to_vec())
            .with_file_name("template.tar")
            .with_content_type(Some("application/x-tar".to_string()))]);

    let response = service.send_json::<Value>(&request).await.unwrap();
    assert_eq!(response.result["has_received_file"], true);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    for recorded in requests {
        assert!(recorded
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data"));
        assert!(recorded.body_text().contains("tarball-bytes"));
        assert!(recorded.body_text().contains("filename=\"template.tar\""));
    }
}

#[tokio::test]
async fn test_send_text_and_empty() {
    let server = MockServer::start().await;
    server.enqueue(MockResponse::text(200, "terraform apply\nok"));
    server.enqueue(MockResponse::empty(204));

    let service = noauth_service(&server);
    let logs = service
        .request(Method::GET, "/v1/workspaces/{w_id}/runtime_data/{t_id}/log_store", &[("w_id", "w"), ("t_id", "t")])
        .unwrap();
    assert_eq!(service.send_text(&logs).await.unwrap().result, "terraform apply\nok");

    let delete = service.request(Method::DELETE, "/v2/actions/{action_id}", &[("action_id", "a")]).unwrap();
    assert_eq!(service.send_empty(&delete).await.unwrap().status_code, 204);
}

#[tokio::test]
async fn test_iam_token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;
    let now = chrono::Utc::now().timestamp();
    server.route(
        "/identity/token",
        MockResponse::json(
            200,
            json!({
                "access_token": "iam-access",
                "refresh_token": "r",
                "token_type": "Bearer",
                "expires_in": 3600,
                "expiration": now + 3600
            }),
        ),
    );

    let iam = IamAuthenticator::builder("my-apikey")
        .url(server.url.clone())
        .build()
        .unwrap();
    let service = BaseService::new(&server.url, Arc::new(iam)).unwrap();

    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    service.send_json::<Value>(&request).await.unwrap();
    service.send_json::<Value>(&request).await.unwrap();

    let token_requests = server.requests_to("/identity/token");
    assert_eq!(token_requests.len(), 1);
    let form = token_requests[0].body_text();
    assert!(form.contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"));
    assert!(form.contains("apikey=my-apikey"));

    let api_requests = server.requests_to("/v1/version");
    assert_eq!(api_requests.len(), 2);
    for recorded in api_requests {
        assert_eq!(recorded.header("authorization"), Some("Bearer iam-access"));
    }
}

#[tokio::test]
async fn test_iam_token_near_expiry_is_refreshed() {
    let server = MockServer::start().await;
    let now = chrono::Utc::now().timestamp();
    server.route(
        "/identity/token",
        MockResponse::json(
            200,
            json!({"access_token": "short", "expires_in": 3600, "expiration": now + 60}),
        ),
    );

    let iam = IamAuthenticator::builder("key").url(server.url.clone()).build().unwrap();
    let service = BaseService::new(&server.url, Arc::new(iam)).unwrap();

    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    service.send_json::<Value>(&request).await.unwrap();
    service.send_json::<Value>(&request).await.unwrap();

    assert_eq!(server.requests_to("/identity/token").len(), 2);
}

#[tokio::test]
async fn test_iam_rejection_is_authentication_error() {
    let server = MockServer::start().await;
    server.route(
        "/identity/token",
        MockResponse::json(400, json!({"errorMessage": "Provided API key could not be found"})),
    );

    let iam = IamAuthenticator::builder("bad").url(server.url.clone()).build().unwrap();
    let service = BaseService::new(&server.url, Arc::new(iam)).unwrap();

    let request = service.request(Method::GET, "/v1/version", &[]).unwrap();
    let err = service.send_json::<Value>(&request).await.unwrap_err();
    match err {
        CoreError::Authentication(message) => {
            assert!(message.contains("Provided API key could not be found"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(server.requests_to("/v1/version").is_empty());
}

#[tokio::test]
async fn test_iam_client_credentials_send_basic_header() {
    let server = MockServer::start().await;
    let now = chrono::Utc::now().timestamp();
    server.route(
        "/identity/token",
        MockResponse::json(200, json!({"access_token": "a", "expires_in": 3600, "expiration": now + 3600})),
    );

    let iam = IamAuthenticator::builder("key")
        .url(server.url.clone())
        .client_credentials("bx", "bx")
        .scope("openid")
        .build()
        .unwrap();
    iam.request_token().await.unwrap();

    let recorded = server.last_request();
    assert_eq!(recorded.header("authorization"), Some("Basic Yng6Yng="));
    assert!(recorded.body_text().contains("scope=openid"));
}
