//! Neo4j client over the HTTP transactional Cypher endpoint.
//!
//! Every call is a single auto-commit transaction:
//!   POST {base}/db/{database}/tx/commit
//!   {"statements": [{"statement": "...", "parameters": {...}}]}
//!
//! Neo4j reports Cypher failures with HTTP 200 and a non-empty `errors`
//! array, so both the status and the body are checked.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use spacebio_common::PublicationRecord;
use spacebio_config::GraphSettings;
use tracing::{debug, info, instrument};
use url::Url;

use crate::cypher::{self, Statement};
use crate::error::{KgError, Result};
use crate::GraphStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BOLT_PORT: u16 = 7687;
const HTTP_PORT: u16 = 7474;

/// Map a driver-style URI to the HTTP base of the same server.
///
/// `bolt://h:7687` becomes `http://h:7474`; the TLS schemes (`bolt+s`,
/// `neo4j+s`, `+ssc` variants) become `https://h` on the default port.
/// `http(s)` URIs are used unchanged.
pub fn http_base_from_uri(uri: &str) -> Result<String> {
    let parsed = Url::parse(uri).map_err(|_| KgError::InvalidUri(uri.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| KgError::InvalidUri(uri.to_string()))?;

    let base = match parsed.scheme() {
        "http" | "https" => return Ok(uri.trim_end_matches('/').to_string()),
        "bolt" | "neo4j" => {
            let port = match parsed.port() {
                None | Some(BOLT_PORT) => HTTP_PORT,
                Some(p) => p,
            };
            format!("http://{host}:{port}")
        }
        "bolt+s" | "neo4j+s" | "bolt+ssc" | "neo4j+ssc" => match parsed.port() {
            None | Some(BOLT_PORT) => format!("https://{host}"),
            Some(p) => format!("https://{host}:{p}"),
        },
        _ => return Err(KgError::InvalidUri(uri.to_string())),
    };
    Ok(base)
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Result of one statement.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<RowData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowData {
    #[serde(default)]
    pub row: Vec<Value>,
}

impl StatementResult {
    /// First column of the first row.
    pub fn first_value(&self) -> Option<&Value> {
        self.data.first().and_then(|d| d.row.first())
    }
}

pub struct Neo4jClient {
    client: reqwest::Client,
    commit_url: String,
    user: String,
    password: SecretString,
}

impl Neo4jClient {
    pub fn new(settings: &GraphSettings) -> Result<Self> {
        let base = http_base_from_uri(&settings.uri)?;
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            commit_url: format!("{base}/db/{}/tx/commit", settings.database),
            user: settings.user.clone(),
            password: SecretString::from(settings.password.expose_secret().to_owned()),
        })
    }

    pub fn commit_url(&self) -> &str {
        &self.commit_url
    }

    /// Run statements in one auto-commit transaction.
    pub async fn run(&self, statements: &[Statement]) -> Result<Vec<StatementResult>> {
        let resp = self.client
            .post(&self.commit_url)
            .basic_auth(&self.user, Some(self.password.expose_secret()))
            .header("Accept", "application/json;charset=UTF-8")
            .json(&json!({ "statements": statements }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(KgError::Status { status: status.as_u16(), body });
        }

        let body: TxResponse = resp.json().await?;
        if let Some(err) = body.errors.into_iter().next() {
            return Err(KgError::Neo4j { code: err.code, message: err.message });
        }
        Ok(body.results)
    }
}

#[async_trait]
impl GraphStore for Neo4jClient {
    #[instrument(skip(self, record), fields(publication_id = %record.id))]
    async fn upsert_publication(&self, record: &PublicationRecord) -> Result<()> {
        self.run(&[cypher::upsert_publication(record)]).await?;
        debug!("Publication merged into graph");
        Ok(())
    }

    async fn ping(&self) -> Result<String> {
        let results = self.run(&[cypher::ping()]).await?;
        results
            .first()
            .and_then(StatementResult::first_value)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| KgError::UnexpectedResponse("ping returned no rows".to_string()))
    }

    async fn ensure_constraints(&self) -> Result<()> {
        let statements = cypher::constraints();
        self.run(&statements).await?;
        info!(count = statements.len(), "Graph constraints ensured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_maps_to_http_port() {
        assert_eq!(http_base_from_uri("bolt://localhost:7687").unwrap(), "http://localhost:7474");
        assert_eq!(http_base_from_uri("neo4j://db.internal").unwrap(), "http://db.internal:7474");
        assert_eq!(http_base_from_uri("bolt://db:9999").unwrap(), "http://db:9999");
    }

    #[test]
    fn test_tls_schemes_map_to_https() {
        assert_eq!(
            http_base_from_uri("neo4j+s://abcd1234.databases.neo4j.io").unwrap(),
            "https://abcd1234.databases.neo4j.io"
        );
        assert_eq!(http_base_from_uri("bolt+s://graph:7687").unwrap(), "https://graph");
    }

    #[test]
    fn test_http_uri_is_kept() {
        assert_eq!(http_base_from_uri("http://127.0.0.1:7474/").unwrap(), "http://127.0.0.1:7474");
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        assert!(matches!(http_base_from_uri("ftp://graph"), Err(KgError::InvalidUri(_))));
        assert!(matches!(http_base_from_uri("not a uri"), Err(KgError::InvalidUri(_))));
    }
}
