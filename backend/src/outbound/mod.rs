//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed implementation of the `ApiClient` port.
//!
//! Adapters translate between transport concerns and the result envelope.
//! They contain no business logic.

pub mod http;
