//! Routing: environment gating and collector URL construction.

pub mod gate;

pub use gate::{evaluate, GateDecision};

/// Path prefix placed before every endpoint name.
pub const ENDPOINT_PREFIX: &str = "crp_";

/// `<collection_url>/crp_<endpoint>`. Trailing slashes on the base are ignored.
pub fn endpoint_url(collection_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}{}",
        collection_url.trim_end_matches('/'),
        ENDPOINT_PREFIX,
        endpoint
    )
}
