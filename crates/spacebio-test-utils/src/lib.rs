//! In-memory fakes for the inference API and both stores.
//!
//! Each fake records what it was asked to do and can be switched into a
//! failing mode, so orchestration code can be tested without network access.

mod graph;
mod inference;
mod store;

pub use graph::MemoryGraphStore;
pub use inference::StubInference;
pub use store::MemoryPublicationStore;

use spacebio_common::PublicationIn;

/// A minimal valid payload with the given title.
pub fn publication(title: &str) -> PublicationIn {
    PublicationIn {
        title: Some(title.to_string()),
        ..Default::default()
    }
}
