//! Emission: transports and fire-and-forget delivery.

pub mod engine;
pub mod transport;

pub use engine::{deliver, spawn_delivery};
pub use transport::{HttpTransport, Transport};
