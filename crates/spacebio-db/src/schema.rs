//! Relational schema.
//!
//! The DDL is idempotent so it can be applied to a fresh database or to one
//! created by earlier deployments (which lacked `link`, `summary` and
//! `created_at`).

use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

pub const TABLE_PUBLICATIONS: &str = "publications";

/// ivfflat list count for the cosine index.
pub const IVFFLAT_LISTS: u32 = 100;

/// DDL statements, in execution order.
pub fn statements(embedding_dim: usize) -> Vec<String> {
    vec![
        "CREATE EXTENSION IF NOT EXISTS vector".to_string(),
        format!(
            "CREATE TABLE IF NOT EXISTS {TABLE_PUBLICATIONS} (
  id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
  title text NOT NULL,
  abstract text,
  doi text,
  year integer,
  mission text,
  repository text,
  link text,
  summary text,
  organisms text[],
  hazards text[],
  assays text[],
  outcomes text[],
  keywords text[],
  embedding vector({embedding_dim}),
  created_at timestamptz NOT NULL DEFAULT now()
)"
        ),
        format!("ALTER TABLE {TABLE_PUBLICATIONS} ADD COLUMN IF NOT EXISTS link text"),
        format!("ALTER TABLE {TABLE_PUBLICATIONS} ADD COLUMN IF NOT EXISTS summary text"),
        format!(
            "ALTER TABLE {TABLE_PUBLICATIONS} ADD COLUMN IF NOT EXISTS created_at timestamptz NOT NULL DEFAULT now()"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_publications_embedding ON {TABLE_PUBLICATIONS} \
             USING ivfflat (embedding vector_cosine_ops) WITH (lists = {IVFFLAT_LISTS})"
        ),
    ]
}

/// Render the DDL as a script, e.g. for pasting into a hosted SQL editor.
pub fn script(embedding_dim: usize) -> String {
    statements(embedding_dim)
        .into_iter()
        .map(|s| format!("{s};\n"))
        .collect()
}

/// Apply the DDL against a live database.
pub async fn apply(pool: &PgPool, embedding_dim: usize) -> Result<()> {
    for stmt in statements(embedding_dim) {
        sqlx::query(&stmt).execute(pool).await?;
    }
    info!(embedding_dim, "Relational schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_column_uses_configured_dimension() {
        let ddl = script(768);
        assert!(ddl.contains("embedding vector(768)"));
        assert!(!ddl.contains("vector(384)"));
    }

    #[test]
    fn test_extension_precedes_table() {
        let stmts = statements(384);
        assert!(stmts[0].contains("CREATE EXTENSION"));
        assert!(stmts[1].contains("CREATE TABLE IF NOT EXISTS publications"));
        assert!(stmts.last().unwrap().contains("vector_cosine_ops"));
    }

    #[test]
    fn test_index_is_ivfflat_with_100_lists() {
        let ddl = script(384);
        assert!(ddl.contains("USING ivfflat"));
        assert!(ddl.contains("lists = 100"));
    }

    #[test]
    fn test_every_list_attribute_has_an_array_column() {
        let ddl = script(384);
        for col in ["organisms", "hazards", "assays", "outcomes", "keywords"] {
            assert!(ddl.contains(&format!("{col} text[]")), "missing {col}");
        }
    }
}
