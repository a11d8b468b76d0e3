use anyhow::{bail, Result};
use clap::Args;
use spacebio_db::PublicationStore;
use spacebio_kg::GraphStore;
use tracing::error;

use super::{graph_store, relational_store};

#[derive(Args)]
pub struct CheckArgs {}

pub async fn run(_args: CheckArgs) -> Result<()> {
    let mut failures = 0;

    match relational_store().await {
        Ok(store) => match (store.sample(1).await, store.count().await) {
            (Ok(rows), Ok(count)) => {
                println!("postgres: ok ({count} publications)");
                if let Some(row) = rows.first() {
                    println!("  sample: {}", row.title);
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Relational probe failed");
                println!("postgres: FAILED ({e})");
                failures += 1;
            }
        },
        Err(e) => {
            println!("postgres: FAILED ({e:#})");
            failures += 1;
        }
    }

    match graph_store() {
        Ok(graph) => match graph.ping().await {
            Ok(msg) => println!("neo4j: ok ({msg})"),
            Err(e) => {
                error!(error = %e, "Graph probe failed");
                println!("neo4j: FAILED ({e})");
                failures += 1;
            }
        },
        Err(e) => {
            println!("neo4j: FAILED ({e:#})");
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} store check(s) failed");
    }
    Ok(())
}
