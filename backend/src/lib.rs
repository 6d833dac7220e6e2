//! Storefront API client library.
//!
//! The crate is split along a hexagonal boundary: `domain` holds the order
//! and metrics transforms, the result envelope, and the loaders that talk to
//! the storefront API through the [`domain::ports::ApiClient`] port;
//! `outbound` holds the reqwest adapter behind that port; `config` carries
//! the client settings read from the environment.

pub mod config;
pub mod domain;
pub mod outbound;
