//! Configuration loading for spacebio.
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file in the working directory. Each section loads on its own so a
//! command only fails on the variables it actually needs; a missing required
//! variable is fatal and reported by name.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use spacebio_common::SpacebioError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

impl From<ConfigError> for SpacebioError {
    fn from(e: ConfigError) -> Self {
        SpacebioError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Variable lookup; the process environment in production, a map in tests.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Seed the environment from `.env` if one exists. Existing variables win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env: {e}"),
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn required(lookup: Lookup<'_>, var: &str) -> Result<String> {
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingVar(var.to_string()))
}

fn optional(lookup: Lookup<'_>, var: &str, default: fn() -> String) -> String {
    lookup(var).filter(|v| !v.trim().is_empty()).unwrap_or_else(default)
}

fn parsed<T>(lookup: Lookup<'_>, var: &str, default: fn() -> T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default()),
    }
}

// ── Relational store ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DatabaseSettings {
    /// Postgres connection string (Supabase exposes one per project).
    pub url: SecretString,
    pub max_connections: u32,
    /// Width of the `embedding` vector column.
    pub embedding_dim: usize,
}

fn default_max_connections() -> u32 { 5 }
fn default_embedding_dim() -> usize { 384 }

impl DatabaseSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let embedding_dim = parsed(lookup, "EMBEDDING_DIM", default_embedding_dim)?;
        if embedding_dim == 0 {
            return Err(ConfigError::Invalid {
                var: "EMBEDDING_DIM".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            url: SecretString::from(required(lookup, "DATABASE_URL")?),
            max_connections: parsed(lookup, "DB_MAX_CONNECTIONS", default_max_connections)?,
            embedding_dim,
        })
    }
}

// ── Graph store ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct GraphSettings {
    /// `bolt://`, `neo4j+s://` or `http(s)://` URI of the Neo4j instance.
    pub uri: String,
    pub user: String,
    pub password: SecretString,
    pub database: String,
}

fn default_graph_database() -> String { "neo4j".to_string() }

impl GraphSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            uri: required(lookup, "NEO4J_URI")?,
            user: required(lookup, "NEO4J_USER")?,
            password: SecretString::from(required(lookup, "NEO4J_PASS")?),
            database: optional(lookup, "NEO4J_DATABASE", default_graph_database),
        })
    }
}

// ── Inference API ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct InferenceSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub embed_model: String,
    pub summary_model: String,
    pub summary_max_length: u32,
}

fn default_inference_base() -> String { "https://api-inference.huggingface.co".to_string() }
fn default_embed_model() -> String { "sentence-transformers/all-MiniLM-L6-v2".to_string() }
fn default_summary_model() -> String { "facebook/bart-large-cnn".to_string() }
fn default_summary_max_length() -> u32 { 120 }

impl InferenceSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            api_key: SecretString::from(required(lookup, "HF_API_KEY")?),
            base_url: optional(lookup, "HF_API_BASE", default_inference_base),
            embed_model: optional(lookup, "HF_EMBED_MODEL", default_embed_model),
            summary_model: optional(lookup, "HF_SUMMARY_MODEL", default_summary_model),
            summary_max_length: parsed(lookup, "HF_SUMMARY_MAX_LENGTH", default_summary_max_length)?,
        })
    }
}

// ── HTTP server ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// Prebuilt frontend served as the fallback route when the directory exists.
    pub frontend_dir: PathBuf,
}

fn default_bind_addr() -> SocketAddr { SocketAddr::from(([0, 0, 0, 0], 8000)) }
fn default_frontend_dir() -> PathBuf { PathBuf::from("frontend/build") }

impl ServerSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            bind_addr: parsed(lookup, "BIND_ADDR", default_bind_addr)?,
            frontend_dir: parsed(lookup, "FRONTEND_DIR", default_frontend_dir)?,
        })
    }
}

// ── Everything ────────────────────────────────────────────────────────────────

/// Full configuration of the HTTP server process.
#[derive(Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub graph: GraphSettings,
    pub inference: InferenceSettings,
    pub server: ServerSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            database: DatabaseSettings::from_lookup(lookup)?,
            graph: GraphSettings::from_lookup(lookup)?,
            inference: InferenceSettings::from_lookup(lookup)?,
            server: ServerSettings::from_lookup(lookup)?,
        })
    }
}
