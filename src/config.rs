use anyhow::{bail, Context};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    /// Mounted in front of every route, e.g. `/make-server-a1a5736c`.
    pub route_prefix: String,

    /// `None` keeps all data in process memory.
    pub database_url: Option<String>,

    pub identity: IdentityConfig,
}

#[derive(Debug, Clone)]
pub enum IdentityConfig {
    Supabase {
        url: String,
        service_role_key: String,
    },
    Local {
        jwt_secret: String,
        access_ttl_secs: i64,
    },
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a number", name)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let identity = match (optional("SUPABASE_URL"), optional("SUPABASE_SERVICE_ROLE_KEY")) {
            (Some(url), Some(service_role_key)) => IdentityConfig::Supabase {
                url,
                service_role_key,
            },
            (Some(_), None) => bail!("SUPABASE_SERVICE_ROLE_KEY must be set with SUPABASE_URL"),
            _ => IdentityConfig::Local {
                jwt_secret: optional("JWT_SECRET").context(
                    "JWT_SECRET must be set when no SUPABASE_URL is configured",
                )?,
                access_ttl_secs: parse_or("JWT_ACCESS_TTL_SECS", 3600)?,
            },
        };

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", 8080)?,
            frontend_url: optional("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".into()),
            cors_extra_origins: optional("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            route_prefix: normalize_prefix(&optional("ROUTE_PREFIX").unwrap_or_default()),
            database_url: optional("DATABASE_URL"),
            identity,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `"make-server/"` → `"/make-server"`, `"/"` → `""`.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
