//! Provider discovery and transfer abstraction.
//!
//! The core depends on the [`ProviderService`] trait for everything
//! network-shaped: announcing that this node can provide an identifier,
//! looking up which peers provide one, and fetching raw bytes from a named
//! peer. A production implementation backs this with a DHT-capable
//! peer-to-peer transport; tests inject [`InMemoryProviderService`], which
//! serves from in-memory maps and supports failure injection.
//!
//! No ordering is promised between `advertise` and a later
//! `find_providers` — retrievers must tolerate empty results and retry or
//! fall back.

mod error;
mod provider;
mod stub;

pub use error::NetError;
pub use provider::ProviderService;
pub use stub::InMemoryProviderService;
