//! Clash of Clans upstream API access.
//!
//! - `transport`: the single outbound GET, behind a trait for test doubles
//! - `http`: the authenticated player lookup and status classification
//! - `types`: typed view over the player document, used for CLI rendering

pub mod http;
pub mod transport;
pub mod types;

pub use http::{classify_response, UpstreamClient};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
