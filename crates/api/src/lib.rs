//! HTTP adapter for the remote product service.

pub mod http;
mod wire;

pub use http::HttpProductApi;
