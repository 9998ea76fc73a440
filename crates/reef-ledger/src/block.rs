//! Blocks: construction, hashing, and self-validation.

use reef_types::{hash_hex, wall_clock_nanos};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::merkle::merkle_root;
use crate::transaction::Transaction;

/// A single block in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting at 0 for genesis.
    pub index: u64,
    /// Creation time, nanoseconds since UNIX epoch.
    pub timestamp: u64,
    /// Transactions in the order they were submitted.
    pub transactions: Vec<Transaction>,
    /// Hash of the previous block; empty exactly for genesis.
    pub prev_hash: String,
    /// Merkle root over the transaction identifiers.
    pub merkle_root: String,
    /// This block's own hash (hex SHA-256 of the canonical encoding with
    /// this field excluded).
    pub hash: String,
}

/// The hash preimage: every field except the block's own hash.
#[derive(Serialize)]
struct BlockContent<'a> {
    index: u64,
    timestamp: u64,
    transactions: &'a [Transaction],
    prev_hash: &'a str,
    merkle_root: &'a str,
}

impl Block {
    /// Build a block, verifying every transaction's signature first.
    ///
    /// A non-genesis block must carry its predecessor's hash; genesis
    /// must carry none. Genesis (index 0, no previous hash, no
    /// transactions) is the only block built with an empty `prev_hash`.
    pub fn new(
        index: u64,
        prev_hash: impl Into<String>,
        transactions: Vec<Transaction>,
    ) -> Result<Self, LedgerError> {
        Self::new_with_timestamp(index, prev_hash, transactions, wall_clock_nanos())
    }

    /// Build a block with an explicit timestamp (for deterministic
    /// testing).
    pub fn new_with_timestamp(
        index: u64,
        prev_hash: impl Into<String>,
        transactions: Vec<Transaction>,
        timestamp: u64,
    ) -> Result<Self, LedgerError> {
        let prev_hash = prev_hash.into();
        if index > 0 && prev_hash.is_empty() {
            return Err(LedgerError::MissingPrevHash { index });
        }
        if index == 0 && !prev_hash.is_empty() {
            return Err(LedgerError::GenesisPrevHash);
        }

        for tx in &transactions {
            if !tx.verify() {
                return Err(LedgerError::SignatureInvalid { id: tx.id.clone() });
            }
        }

        let merkle_root = merkle_root(&transactions);
        let mut block = Self {
            index,
            timestamp,
            transactions,
            prev_hash,
            merkle_root,
            hash: String::new(),
        };
        block.hash = hash_hex(&block.content_bytes()?);
        Ok(block)
    }

    /// Canonical encoding of the block without its own hash.
    fn content_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        postcard::to_allocvec(&BlockContent {
            index: self.index,
            timestamp: self.timestamp,
            transactions: &self.transactions,
            prev_hash: &self.prev_hash,
            merkle_root: &self.merkle_root,
        })
        .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Recompute the Merkle root and block hash and compare them to the
    /// stored fields.
    pub fn validate_self(&self) -> bool {
        if self.hash.is_empty() {
            return false;
        }
        if merkle_root(&self.transactions) != self.merkle_root {
            return false;
        }
        match self.content_bytes() {
            Ok(content) => hash_hex(&content) == self.hash,
            Err(_) => false,
        }
    }
}
