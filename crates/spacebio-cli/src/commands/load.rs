use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use spacebio_ingestion::{Loader, LoaderOptions, PageFetcher, RetryPolicy, StoreTargets};

use super::{graph_store, inference_client, print_json, relational_store};

#[derive(Args)]
pub struct LoadArgs {
    /// CSV or JSON file of publications
    pub file: PathBuf,

    /// Write to the relational store (default: both stores)
    #[arg(long)]
    pub relational: bool,

    /// Write to the graph store (default: both stores)
    #[arg(long)]
    pub graph: bool,

    /// Compute an embedding for each row
    #[arg(long)]
    pub enrich: bool,

    /// Fetch each row's link and keep the start of the page as its summary
    #[arg(long)]
    pub fetch_content: bool,

    /// Skip rows without a link
    #[arg(long)]
    pub require_link: bool,

    /// Characters of fetched content to keep
    #[arg(long, default_value_t = 1000)]
    pub summary_chars: usize,
}

impl LoadArgs {
    pub fn options(&self) -> LoaderOptions {
        let targets = if self.relational || self.graph {
            StoreTargets { relational: self.relational, graph: self.graph }
        } else {
            StoreTargets::default()
        };
        LoaderOptions {
            targets,
            enrich: self.enrich,
            fetch_content: self.fetch_content,
            require_link: self.require_link,
            summary_chars: self.summary_chars,
        }
    }
}

pub async fn run(args: LoadArgs) -> Result<()> {
    let options = args.options();
    let mut loader = Loader::new(options.clone());

    if options.targets.relational {
        loader = loader.with_store(relational_store().await?);
    }
    if options.targets.graph {
        loader = loader.with_graph(graph_store()?);
    }
    if options.enrich {
        loader = loader.with_inference(inference_client()?);
    }
    if options.fetch_content {
        loader = loader.with_fetcher(PageFetcher::new(RetryPolicy::default())?);
    }

    let report = loader
        .load_path(&args.file)
        .await
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    print_json(&report)
}
