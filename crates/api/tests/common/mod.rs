#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use pilakon_api::auth::session::{issue_token, SessionConfig, ACCESS_TOKEN_COOKIE};
use pilakon_api::config::ServerConfig;
use pilakon_api::router::build_app_router;
use pilakon_api::state::AppState;
use pilakon_api::storage::{
    MemoryStorage, ObjectStorage, StorageConfig, StorageError, StorageResult,
};

pub const STORAGE_BASE_URL: &str = "http://storage.test";
pub const UPLOAD_BUCKET: &str = "user-uploads";

const MULTIPART_BOUNDARY: &str = "pilakon-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            jwt_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: "authenticated".to_string(),
        },
        storage: StorageConfig {
            url: STORAGE_BASE_URL.to_string(),
            anon_key: "test-anon-key".to_string(),
            upload_bucket: UPLOAD_BUCKET.to_string(),
        },
    }
}

/// Full application router over `pool` with a fresh in-memory object store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_storage(pool, Arc::new(MemoryStorage::new(STORAGE_BASE_URL)))
}

/// Full application router sharing `storage` with the caller, so tests can
/// inspect stored objects.
pub fn build_test_app_with_storage(pool: PgPool, storage: Arc<dyn ObjectStorage>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    };
    build_app_router(state, &config)
}

/// Object store whose writes always fail, as when the service is down.
pub struct FailingStorage;

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload(
        &self,
        _bucket: &str,
        _path: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(StorageError::ApiError {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{STORAGE_BASE_URL}/{bucket}/{path}")
    }

    async fn remove(&self, _bucket: &str, _paths: &[String]) -> StorageResult<()> {
        Ok(())
    }

    async fn list(
        &self,
        _bucket: &str,
        _prefix: &str,
        _limit: usize,
    ) -> StorageResult<Vec<String>> {
        Err(StorageError::ApiError {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// A valid session token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    issue_token(user_id, Some("tester@pilakon.test"), 600, &test_config().session).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, format!("{ACCESS_TOKEN_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = json_request(Method::DELETE, uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a multipart form with a single `file` part.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
    token: &str,
) -> Response<Body> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// POST a multipart form with a single text part and no file.
pub async fn post_form_field_auth(
    app: Router,
    uri: &str,
    name: &str,
    value: &str,
    token: &str,
) -> Response<Body> {
    let body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
         {value}\r\n\
         --{MULTIPART_BOUNDARY}--\r\n"
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
