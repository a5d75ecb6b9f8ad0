pub mod api_types;
pub mod endpoint;
pub mod fetch;
pub mod types;

pub use endpoint::{CacheKey, EndpointDescriptor, ParamValue, ResolvedRequest};
pub use fetch::{FetchError, FetchOutcome, Fetcher, HttpFetcher};
