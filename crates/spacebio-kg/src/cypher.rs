//! Cypher statements.

use serde::Serialize;
use serde_json::{json, Value};
use spacebio_common::{PublicationRecord, Relation};

pub const PING_MESSAGE: &str = "Hello from Neo4j!";

/// One entry of a transactional-endpoint request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Statement {
    pub statement: String,
    pub parameters: Value,
}

impl Statement {
    pub fn new(statement: impl Into<String>) -> Self {
        Self { statement: statement.into(), parameters: json!({}) }
    }

    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }
}

pub fn ping() -> Statement {
    Statement::new(format!("RETURN '{PING_MESSAGE}' AS msg"))
}

/// Single statement that merges the publication and every relationship.
///
/// Target lists are passed as parameters and expanded with FOREACH, so an
/// empty list simply creates no edges.
pub fn upsert_publication(record: &PublicationRecord) -> Statement {
    let mut query = String::from(
        "MERGE (p:Publication {id: $id})\n\
         SET p.title = $title, p.doi = $doi, p.year = $year, \
         p.mission = $mission, p.repository = $repository, p.link = $link, \
         p.summary = $summary",
    );
    for relation in Relation::ALL {
        query.push_str(&format!(
            "\nFOREACH (name IN ${attr} | MERGE (t:{label} {{name: name}}) MERGE (p)-[:{edge}]->(t))",
            attr = relation.attribute(),
            label = relation.target_label(),
            edge = relation.edge_type(),
        ));
    }

    let mut params = json!({
        "id": record.id.to_string(),
        "title": record.title,
        "doi": record.doi,
        "year": record.year,
        "mission": record.mission,
        "repository": record.repository,
        "link": record.link,
        "summary": record.summary,
    });
    for relation in Relation::ALL {
        params[relation.attribute()] = json!(relation.targets(record));
    }

    Statement::new(query).with_parameters(params)
}

/// Uniqueness constraints on the node keys.
pub fn constraints() -> Vec<Statement> {
    let mut out = vec![Statement::new(
        "CREATE CONSTRAINT publication_id IF NOT EXISTS \
         FOR (n:Publication) REQUIRE n.id IS UNIQUE",
    )];
    for relation in Relation::ALL {
        let label = relation.target_label();
        out.push(Statement::new(format!(
            "CREATE CONSTRAINT {}_name IF NOT EXISTS FOR (n:{label}) REQUIRE n.name IS UNIQUE",
            label.to_lowercase()
        )));
    }
    out
}
