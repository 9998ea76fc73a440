//! The distributed data store pipeline: publish and retrieve.
//!
//! [`Publisher`] chunks raw content, writes every piece into the local
//! chunk store under its content-derived identifier, stores the manifest,
//! and announces all identifiers through the provider service.
//!
//! [`Retriever`] resolves a manifest identifier back into bytes:
//! cache-first, then network, verifying every chunk against its
//! identifier and the reassembled whole against the manifest's declared
//! original-content hash. Verification failures are fatal and never
//! expose bytes.

pub mod error;
pub mod publisher;
pub mod retriever;

pub use error::DdsError;
pub use publisher::{PublishReceipt, Publisher};
pub use retriever::Retriever;

#[cfg(test)]
mod tests;
