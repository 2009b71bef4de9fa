//! CardapioWeb partner catalog: wire types, lenient field coercion, the
//! catalog flattener and an HTTP client with retry.

pub mod client;
pub mod coerce;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::CardapioWebClient;
pub use error::ClientError;
pub use normalize::{flatten, flatten_with_policy};
pub use types::{RawCatalog, RawCategory, RawImage, RawItem, RawOption, RawOptionGroup};
