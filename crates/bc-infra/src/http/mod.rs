//! Backend HTTP adapters.

mod client;
mod dto;

pub use client::HttpApiClient;
