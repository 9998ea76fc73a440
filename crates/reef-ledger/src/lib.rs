//! Append-only ledger of signed social transactions.
//!
//! User actions are recorded as ECDSA-signed [`Transaction`]s, grouped
//! into hash-chained [`Block`]s carrying a Merkle commitment over the
//! transaction identifiers, and appended to a [`Ledger`] under a writer
//! lock. The ledger is single-writer and local; no consensus layer sits
//! above it yet.
//!
//! Identity contracts:
//! - a transaction's id is the hex SHA-256 of its canonical encoding with
//!   the signature field excluded;
//! - a block's hash is the hex SHA-256 of its canonical encoding with the
//!   hash field excluded;
//! - the Merkle root commits to the *set* of transaction ids (leaves are
//!   sorted before combining), while their order stays recorded in the
//!   block's transaction sequence.

mod block;
mod chain;
mod error;
mod merkle;
mod transaction;

pub use block::Block;
pub use chain::Ledger;
pub use error::LedgerError;
pub use merkle::merkle_root;
pub use transaction::{Transaction, TxKind};
