//! Getting publications into both stores.
//!
//!   pipeline  single-record ingest (validate, embed, insert, mirror)
//!   records   CSV / JSON input parsing
//!   fetch     page fetcher with fixed-delay retry
//!   loader    bulk loader driven by `LoaderOptions`

pub mod error;
pub mod fetch;
pub mod loader;
pub mod pipeline;
pub mod records;

pub use error::{LoadError, Result};
pub use fetch::{PageFetcher, RetryPolicy};
pub use loader::{LoadReport, Loader, LoaderOptions, StoreTargets};
pub use pipeline::{BatchReport, IngestOutcome, IngestService};
pub use records::{InputFormat, RowError, RowResult};
