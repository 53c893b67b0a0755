pub mod builder;
pub mod snapshot;
pub mod types;

pub use builder::{AssetRecordBuilder, VenueLink, DEFAULT_VENUE_BASE_URL};
pub use snapshot::Snapshot;
pub use types::{AssetRecord, DataError, DataResult, RawAssetQuote, Rating, Regime};
