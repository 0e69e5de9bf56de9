pub mod client;
pub mod error;

pub use client::RoutingClient;
pub use error::RoutingError;
