//! Publication repository.
//!
//! Inserts are plain `INSERT`s: ingesting the same payload twice yields two
//! rows. Callers that need dedup must check DOI/title themselves.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use spacebio_common::PublicationRecord;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, Result};

/// A row as stored in the relational table (embedding omitted).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredPublication {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub doi: Option<String>,
    pub year: Option<i32>,
    pub mission: Option<String>,
    pub repository: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub organisms: Vec<String>,
    pub hazards: Vec<String>,
    pub assays: Vec<String>,
    pub outcomes: Vec<String>,
    pub keywords: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&PublicationRecord> for StoredPublication {
    fn from(r: &PublicationRecord) -> Self {
        StoredPublication {
            id: r.id,
            title: r.title.clone(),
            abstract_text: Some(r.abstract_text.clone()),
            doi: r.doi.clone(),
            year: r.year,
            mission: r.mission.clone(),
            repository: r.repository.clone(),
            link: r.link.clone(),
            summary: r.summary.clone(),
            organisms: r.organisms.clone(),
            hazards: r.hazards.clone(),
            assays: r.assays.clone(),
            outcomes: r.outcomes.clone(),
            keywords: r.keywords.clone(),
            created_at: None,
        }
    }
}

/// A nearest-neighbour hit. `similarity` is `1 - cosine distance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarPublication {
    #[serde(flatten)]
    pub publication: StoredPublication,
    pub similarity: f64,
}

#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Insert one row and return it as stored.
    async fn insert(&self, record: &PublicationRecord) -> Result<StoredPublication>;

    /// Up to `limit` rows, in no particular order. Used for connectivity probes.
    async fn sample(&self, limit: i64) -> Result<Vec<StoredPublication>>;

    /// Rows closest to `embedding` by cosine distance, best first.
    async fn nearest(&self, embedding: &[f32], limit: i64) -> Result<Vec<SimilarPublication>>;

    async fn count(&self) -> Result<i64>;
}

/// Reject vectors that would not fit the `vector(N)` column.
pub fn check_dimension(expected: usize, embedding: &[f32]) -> Result<()> {
    if embedding.len() != expected {
        return Err(DbError::InvalidEmbeddingDimension {
            expected,
            actual: embedding.len(),
        });
    }
    Ok(())
}

/// Postgres-backed publication store.
#[derive(Clone)]
pub struct PgPublicationStore {
    pool: PgPool,
    embedding_dim: usize,
}

impl PgPublicationStore {
    pub fn new(pool: PgPool, embedding_dim: usize) -> Self {
        Self { pool, embedding_dim }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}

#[async_trait]
impl PublicationStore for PgPublicationStore {
    async fn insert(&self, record: &PublicationRecord) -> Result<StoredPublication> {
        if let Some(embedding) = &record.embedding {
            check_dimension(self.embedding_dim, embedding)?;
        }
        let embedding = record.embedding.as_ref().map(|e| Vector::from(e.clone()));

        let row = sqlx::query_as::<_, PublicationRow>(
            r#"
            INSERT INTO publications
                (id, title, abstract, doi, year, mission, repository, link, summary,
                 organisms, hazards, assays, outcomes, keywords, embedding)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15)
            RETURNING id, title, abstract, doi, year, mission, repository, link, summary,
                      organisms, hazards, assays, outcomes, keywords, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.abstract_text)
        .bind(&record.doi)
        .bind(record.year)
        .bind(&record.mission)
        .bind(&record.repository)
        .bind(&record.link)
        .bind(&record.summary)
        .bind(&record.organisms)
        .bind(&record.hazards)
        .bind(&record.assays)
        .bind(&record.outcomes)
        .bind(&record.keywords)
        .bind(embedding)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %row.id, "Publication row inserted");
        Ok(row.into())
    }

    async fn sample(&self, limit: i64) -> Result<Vec<StoredPublication>> {
        let rows = sqlx::query_as::<_, PublicationRow>(
            r#"
            SELECT id, title, abstract, doi, year, mission, repository, link, summary,
                   organisms, hazards, assays, outcomes, keywords, created_at
            FROM publications
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredPublication::from).collect())
    }

    async fn nearest(&self, embedding: &[f32], limit: i64) -> Result<Vec<SimilarPublication>> {
        check_dimension(self.embedding_dim, embedding)?;

        let rows = sqlx::query_as::<_, SimilarRow>(
            r#"
            SELECT id, title, abstract, doi, year, mission, repository, link, summary,
                   organisms, hazards, assays, outcomes, keywords, created_at,
                   1 - (embedding <=> $1) AS similarity
            FROM publications
            WHERE embedding IS NOT NULL
            ORDER BY embedding <=> $1
            LIMIT $2
            "#,
        )
        .bind(Vector::from(embedding.to_vec()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SimilarPublication {
                publication: r.publication.into(),
                similarity: r.similarity,
            })
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publications")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

// ── Internal sqlx row mapping ────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct PublicationRow {
    id: Uuid,
    // nullable on tables created before the NOT NULL constraint
    title: Option<String>,
    #[sqlx(rename = "abstract")]
    abstract_text: Option<String>,
    doi: Option<String>,
    year: Option<i32>,
    mission: Option<String>,
    repository: Option<String>,
    link: Option<String>,
    summary: Option<String>,
    organisms: Option<Vec<String>>,
    hazards: Option<Vec<String>>,
    assays: Option<Vec<String>>,
    outcomes: Option<Vec<String>>,
    keywords: Option<Vec<String>>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct SimilarRow {
    #[sqlx(flatten)]
    publication: PublicationRow,
    similarity: f64,
}

impl From<PublicationRow> for StoredPublication {
    fn from(r: PublicationRow) -> Self {
        StoredPublication {
            id: r.id,
            title: r.title.unwrap_or_default(),
            abstract_text: r.abstract_text,
            doi: r.doi,
            year: r.year,
            mission: r.mission,
            repository: r.repository,
            link: r.link,
            summary: r.summary,
            organisms: r.organisms.unwrap_or_default(),
            hazards: r.hazards.unwrap_or_default(),
            assays: r.assays.unwrap_or_default(),
            outcomes: r.outcomes.unwrap_or_default(),
            keywords: r.keywords.unwrap_or_default(),
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension(3, &[0.1, 0.2, 0.3]).is_ok());
        match check_dimension(384, &[0.0; 768]) {
            Err(DbError::InvalidEmbeddingDimension { expected, actual }) => {
                assert_eq!(expected, 384);
                assert_eq!(actual, 768);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_row_without_title_maps_to_empty_title() {
        let row = PublicationRow {
            id: Uuid::nil(),
            title: None,
            abstract_text: Some("Legacy row".to_string()),
            doi: None,
            year: None,
            mission: None,
            repository: None,
            link: None,
            summary: None,
            organisms: None,
            hazards: Some(vec!["radiation".to_string()]),
            assays: None,
            outcomes: None,
            keywords: None,
            created_at: None,
        };
        let publication = StoredPublication::from(row);
        assert_eq!(publication.title, "");
        assert_eq!(publication.abstract_text.as_deref(), Some("Legacy row"));
        assert_eq!(publication.hazards, vec!["radiation".to_string()]);
        assert!(publication.organisms.is_empty());
    }

    #[test]
    fn test_similar_publication_serializes_flat() {
        let hit = SimilarPublication {
            publication: StoredPublication {
                id: Uuid::nil(),
                title: "Bone loss in microgravity".to_string(),
                abstract_text: None,
                doi: None,
                year: Some(2019),
                mission: None,
                repository: None,
                link: None,
                summary: None,
                organisms: vec!["Mus musculus".to_string()],
                hazards: vec![],
                assays: vec![],
                outcomes: vec![],
                keywords: vec![],
                created_at: None,
            },
            similarity: 0.92,
        };
        let v = serde_json::to_value(&hit).unwrap();
        assert_eq!(v["title"], "Bone loss in microgravity");
        assert_eq!(v["similarity"], 0.92);
        assert!(v.get("publication").is_none());
        assert!(v.get("abstract").is_some());
    }
}
