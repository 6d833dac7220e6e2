//! HTTP outbound adapter for the storefront API.
//!
//! This module provides a thin reqwest implementation of the `ApiClient`
//! port.

mod api_client;

pub use api_client::{HttpApiClient, HttpApiClientError};
