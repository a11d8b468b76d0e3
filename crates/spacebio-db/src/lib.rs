//! spacebio database layer
//!
//! Relational store for publications: a single Postgres table with string-array
//! columns and a pgvector `embedding` column behind an ivfflat cosine index.
//!
//! # Example
//!
//! ```rust,no_run
//! use spacebio_config::DatabaseSettings;
//! use spacebio_db::{database, PgPublicationStore, PublicationStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = DatabaseSettings::from_env()?;
//!     let pool = database::connect(&settings).await?;
//!     let store = PgPublicationStore::new(pool, settings.embedding_dim);
//!     println!("{} publications", store.count().await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod publications;
pub mod schema;

pub use error::{DbError, Result};
pub use publications::{PgPublicationStore, PublicationStore, SimilarPublication, StoredPublication};
pub use schema::TABLE_PUBLICATIONS;
