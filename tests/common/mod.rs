#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use wellness_api::auth::rate_limit::RateLimitState;
use wellness_api::auth::{IdentityProvider, LocalIdentity};
use wellness_api::config::{Config, IdentityConfig};
use wellness_api::db::{KvStore, MemoryStore, StoreError, StoreResult};
use wellness_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_config(route_prefix: &str) -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        cors_extra_origins: vec![],
        route_prefix: route_prefix.into(),
        database_url: None,
        identity: IdentityConfig::Local {
            jwt_secret: JWT_SECRET.into(),
            access_ttl_secs: 3600,
        },
    }
}

pub fn build_with(config: Config, identity: Option<Arc<dyn IdentityProvider>>) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    assemble(config, store.clone(), store, identity)
}

pub fn build() -> TestApp {
    build_with(test_config(""), None)
}

/// App whose storage can be switched into failure mode after setup.
pub fn build_failing() -> (TestApp, Arc<FailingStore>) {
    let store = Arc::new(MemoryStore::new());
    let failing = Arc::new(FailingStore::new(store.clone()));
    let app = assemble(test_config(""), store, failing.clone(), None);
    (app, failing)
}

fn assemble(
    config: Config,
    store: Arc<MemoryStore>,
    kv: Arc<dyn KvStore>,
    identity: Option<Arc<dyn IdentityProvider>>,
) -> TestApp {
    let identity: Arc<dyn IdentityProvider> = match identity {
        Some(identity) => identity,
        None => Arc::new(LocalIdentity::new(kv.clone(), JWT_SECRET.into(), 3600)),
    };

    let state = AppState {
        store: kv,
        identity,
        config: Arc::new(config),
        rate_limiter: RateLimitState::default(),
    };

    let router = app(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
    TestApp { router, store }
}

/// Wraps a `MemoryStore`; `get`, `set` and `ping` fail on demand and every
/// attempted `set` is counted.
pub struct FailingStore {
    inner: Arc<MemoryStore>,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    sets: AtomicUsize,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            sets: AtomicUsize::new(0),
        }
    }

    pub fn fail_gets(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    pub fn fail_sets(&self) {
        self.fail_set.store(true, Ordering::SeqCst);
    }

    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.set(key, value).await
    }

    async fn ping(&self) -> StoreResult<()> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.ping().await
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register `email` and return `(user_id, access_token)`.
    pub async fn register(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/signup",
                None,
                Some(json!({ "email": email, "password": "password123", "name": "Test" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {}", body);
        let user_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = self
            .request(
                Method::POST,
                "/login",
                None,
                Some(json!({ "email": email, "password": "password123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        let token = body["access_token"].as_str().unwrap().to_string();

        (user_id, token)
    }

    pub async fn stored(&self, key: &str) -> Option<Value> {
        self.store.get(key).await.unwrap()
    }
}

pub fn task(id: &str, text: &str) -> Value {
    json!({
        "id": id,
        "text": text,
        "completed": false,
        "priority": "medium",
        "createdAt": 1_760_000_000_000i64,
    })
}

pub fn habit(id: &str, name: &str, completed_dates: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "completedDates": completed_dates,
        "createdAt": 1_760_000_000_000i64,
    })
}
