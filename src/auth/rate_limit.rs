use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

const DEFAULT_MAX_REQUESTS: u32 = 5;
const DEFAULT_WINDOW_SECS: u64 = 60;

/// Fixed-window request counter keyed by client IP and path.
/// Single-instance only; counts are not shared between processes.
#[derive(Clone)]
pub struct RateLimitState {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    max_requests: u32,
    window: Duration,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, Duration::from_secs(DEFAULT_WINDOW_SECS))
    }
}

impl RateLimitState {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Returns the remaining budget, or how long until the window resets.
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        // Drop stale windows so the map does not grow without bound.
        let window = self.window;
        entries.retain(|_, e| now.duration_since(e.window_start) <= window * 2);

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            return Err(window.saturating_sub(now.duration_since(entry.window_start)));
        }

        entry.count += 1;
        Ok(self.max_requests - entry.count)
    }
}

/// Per-client throttle for `/signup` and `/login`. Each route has its own
/// budget, keyed as `ip:path`.
pub async fn rate_limit_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = format!("{}:{}", addr.ip(), req.uri().path());

    if let Err(retry_after) = state.rate_limiter.check(&key).await {
        tracing::warn!(
            client = %key,
            retry_after_secs = retry_after.as_secs(),
            "Auth request throttled"
        );
        return Err(AppError::RateLimited);
    }
    Ok(next.run(req).await)
}
