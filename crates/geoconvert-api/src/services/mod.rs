mod batch;

pub use batch::{BatchArtifact, BatchService};
