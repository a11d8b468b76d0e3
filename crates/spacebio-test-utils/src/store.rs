use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use spacebio_common::PublicationRecord;
use spacebio_db::publications::check_dimension;
use spacebio_db::{DbError, PublicationStore, Result, SimilarPublication, StoredPublication};

/// Vec-backed publication table.
pub struct MemoryPublicationStore {
    embedding_dim: usize,
    rows: Mutex<Vec<PublicationRecord>>,
    failing: AtomicBool,
}

impl MemoryPublicationStore {
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            embedding_dim,
            rows: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every record inserted so far, embeddings included.
    pub fn rows(&self) -> Vec<PublicationRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryPublicationStore {
    fn default() -> Self {
        Self::new(384)
    }
}

fn stored(record: &PublicationRecord) -> StoredPublication {
    let mut row = StoredPublication::from(record);
    row.created_at = Some(Utc::now());
    row
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na * nb)) as f64
}

#[async_trait]
impl PublicationStore for MemoryPublicationStore {
    async fn insert(&self, record: &PublicationRecord) -> Result<StoredPublication> {
        self.check()?;
        if let Some(embedding) = &record.embedding {
            check_dimension(self.embedding_dim, embedding)?;
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(stored(record))
    }

    async fn sample(&self, limit: i64) -> Result<Vec<StoredPublication>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().take(limit.max(0) as usize).map(stored).collect())
    }

    async fn nearest(&self, embedding: &[f32], limit: i64) -> Result<Vec<SimilarPublication>> {
        self.check()?;
        check_dimension(self.embedding_dim, embedding)?;

        let rows = self.rows.lock().unwrap();
        let mut hits: Vec<SimilarPublication> = rows
            .iter()
            .filter_map(|r| {
                r.embedding.as_ref().map(|e| SimilarPublication {
                    publication: stored(r),
                    similarity: cosine_similarity(embedding, e),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(limit.max(0) as usize);
        Ok(hits)
    }

    async fn count(&self) -> Result<i64> {
        self.check()?;
        Ok(self.len() as i64)
    }
}
