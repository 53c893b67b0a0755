pub mod errors;
pub mod pipeline;

pub use errors::ServiceError;
pub use pipeline::{RunReport, SnapshotPipeline};
