// zilkara-core/src/source/mod.rs

pub mod coingecko;
pub mod errors;
pub mod traits;

pub use coingecko::{parse_markets, CoinGeckoSource};
pub use errors::SourceError;
pub use traits::{FetchOutcome, MarketDataSource};
