pub mod client;
pub mod forwarding;
pub mod transport;

pub use client::{ClientSettings, HickoryClientFactory, HickoryDnsClient};
