pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{CollectOutcome, StoreLocatorClient};
pub use error::ScraperError;
pub use normalize::{normalize_store, UNKNOWN_PROVINCE};
pub use types::{UpstreamStore, UpstreamStoreResponse};
