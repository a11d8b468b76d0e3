use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use spacebio_common::{PublicationRecord, Relation};
use spacebio_kg::{GraphStore, KgError, Result};
use uuid::Uuid;

#[derive(Default)]
struct Graph {
    publications: HashMap<Uuid, PublicationRecord>,
    /// (publication id, edge type, target name)
    edges: BTreeSet<(Uuid, &'static str, String)>,
    constraints_ensured: bool,
}

/// Map-backed graph with MERGE semantics.
#[derive(Default)]
pub struct MemoryGraphStore {
    graph: Mutex<Graph>,
    failing: AtomicBool,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn publication_count(&self) -> usize {
        self.graph.lock().unwrap().publications.len()
    }

    pub fn publication(&self, id: Uuid) -> Option<PublicationRecord> {
        self.graph.lock().unwrap().publications.get(&id).cloned()
    }

    /// Edges as `(publication id, edge type, target name)`.
    pub fn edges(&self) -> Vec<(Uuid, &'static str, String)> {
        self.graph.lock().unwrap().edges.iter().cloned().collect()
    }

    pub fn constraints_ensured(&self) -> bool {
        self.graph.lock().unwrap().constraints_ensured
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(KgError::Unavailable("memory graph unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn upsert_publication(&self, record: &PublicationRecord) -> Result<()> {
        self.check()?;
        let mut graph = self.graph.lock().unwrap();
        graph.publications.insert(record.id, record.clone());
        for relation in Relation::ALL {
            for name in relation.targets(record) {
                graph.edges.insert((record.id, relation.edge_type(), name.clone()));
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<String> {
        self.check()?;
        Ok("Hello from Neo4j!".to_string())
    }

    async fn ensure_constraints(&self) -> Result<()> {
        self.check()?;
        self.graph.lock().unwrap().constraints_ensured = true;
        Ok(())
    }
}
