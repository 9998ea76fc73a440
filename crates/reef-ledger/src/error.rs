//! Error types for ledger operations.

use reef_identity::IdentityError;

/// Errors that can occur during ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A constructor argument was unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A transaction failed signature verification.
    #[error("transaction {id} failed signature verification")]
    SignatureInvalid {
        /// Identifier of the offending transaction.
        id: String,
    },

    /// A non-genesis block was built without a previous-block hash.
    #[error("previous block hash is required for block {index}")]
    MissingPrevHash {
        /// Index of the offending block.
        index: u64,
    },

    /// The genesis block was built with a previous-block hash.
    #[error("genesis block must not reference a previous block")]
    GenesisPrevHash,

    /// A block's recomputed Merkle root or hash did not match its fields.
    #[error("block {index} failed self-validation")]
    BlockInvalid {
        /// Index of the offending block.
        index: u64,
    },

    /// A block does not link to its predecessor.
    #[error("block {index} links to {found}, expected {expected}")]
    BrokenLink {
        /// Index of the offending block.
        index: u64,
        /// Hash the block should reference.
        expected: String,
        /// Hash the block actually references.
        found: String,
    },

    /// A block index was outside the chain.
    #[error("block index {index} out of range (chain length {len})")]
    OutOfRange {
        /// Requested index.
        index: u64,
        /// Current chain length.
        len: usize,
    },

    /// A transaction or block identifier was not valid hex.
    #[error("malformed identifier encoding: {0}")]
    MalformedId(#[from] hex::FromHexError),

    /// Canonical serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Key material could not be used.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}
