//! Client for the upstream Free Fire data provider.

pub mod client;
pub mod types;

pub use client::FreeFireClient;
