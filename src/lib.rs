use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;

use auth::rate_limit::RateLimitState;
use auth::{IdentityProvider, LocalIdentity, SupabaseIdentity};
use config::{Config, IdentityConfig};
use db::{KvStore, MemoryStore, PgStore};
use handlers::records;
use models::{Habit, MoodEntry, Task};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    /// Connect the configured store (running migrations for Postgres) and
    /// identity provider.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn KvStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url)
                    .await
                    .context("Failed to create database pool")?;
                let store = PgStore::new(pool);
                store
                    .migrate()
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, records are kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        let identity: Arc<dyn IdentityProvider> = match &config.identity {
            IdentityConfig::Supabase {
                url,
                service_role_key,
            } => {
                tracing::info!(url = %url, "Using Supabase identity provider");
                Arc::new(SupabaseIdentity::new(url, service_role_key.clone()))
            }
            IdentityConfig::Local {
                jwt_secret,
                access_ttl_secs,
            } => {
                tracing::info!("Using local identity provider");
                Arc::new(LocalIdentity::new(
                    store.clone(),
                    jwt_secret.clone(),
                    *access_ttl_secs,
                ))
            }
        };

        Ok(Self {
            store,
            identity,
            config: Arc::new(config),
            rate_limiter: RateLimitState::default(),
        })
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// The full HTTP surface. Serve with connect info so the auth rate limiter
/// can see client addresses.
pub fn app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/user", get(handlers::auth::me))
        // Moods: list and create only
        .route(
            "/moods",
            get(records::list::<MoodEntry>).post(records::create::<MoodEntry>),
        )
        // Tasks
        .route(
            "/tasks",
            get(records::list::<Task>).post(records::create::<Task>),
        )
        .route(
            "/tasks/:id",
            put(records::update::<Task>).delete(records::delete::<Task>),
        )
        // Habits
        .route(
            "/habits",
            get(records::list::<Habit>).post(records::create::<Habit>),
        )
        .route(
            "/habits/:id",
            put(records::update::<Habit>).delete(records::delete::<Habit>),
        )
        .route("/habits/:id/streak", get(handlers::habits::get_streak))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let routes = Router::new().merge(public_routes).merge(protected_routes);
    let routes = if state.config.route_prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&state.config.route_prefix, routes)
    };

    routes
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
