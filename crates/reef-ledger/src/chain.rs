//! The append-only chain of blocks.

use std::sync::RwLock;

use tracing::{debug, info};

use crate::block::Block;
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// The append-only ledger: an ordered sequence of hash-linked blocks.
///
/// A single reader-writer lock protects the block sequence: [`append`](Ledger::append)
/// is a writer; [`tip`](Ledger::tip), [`block_by_index`](Ledger::block_by_index),
/// and [`validate`](Ledger::validate) are readers. External callers always
/// receive cloned blocks, never aliases into the chain.
pub struct Ledger {
    blocks: RwLock<Vec<Block>>,
}

impl Ledger {
    /// Create a ledger initialized with a genesis block (index 0, empty
    /// previous hash, no transactions).
    pub fn new() -> Result<Self, LedgerError> {
        let genesis = Block::new(0, "", Vec::new())?;
        info!(hash = %genesis.hash, "created ledger with genesis block");
        Ok(Self {
            blocks: RwLock::new(vec![genesis]),
        })
    }

    /// Append a new block carrying `transactions`.
    ///
    /// Under the writer lock: builds a block linked to the current tip,
    /// verifies every transaction signature (inside [`Block::new`]),
    /// self-validates, and appends. A signature failure aborts the append
    /// and leaves the chain untouched.
    pub fn append(&self, transactions: Vec<Transaction>) -> Result<Block, LedgerError> {
        let mut blocks = self.blocks.write().expect("lock poisoned");
        let last = blocks.last().expect("ledger always contains genesis");

        let block = Block::new(last.index + 1, last.hash.clone(), transactions)?;
        if !block.validate_self() {
            return Err(LedgerError::BlockInvalid { index: block.index });
        }
        if block.prev_hash != last.hash {
            return Err(LedgerError::BrokenLink {
                index: block.index,
                expected: last.hash.clone(),
                found: block.prev_hash.clone(),
            });
        }

        debug!(
            index = block.index,
            txs = block.transactions.len(),
            hash = %block.hash,
            "appended block"
        );
        blocks.push(block.clone());
        Ok(block)
    }

    /// Return a copy of the latest block.
    pub fn tip(&self) -> Block {
        let blocks = self.blocks.read().expect("lock poisoned");
        blocks
            .last()
            .cloned()
            .expect("ledger always contains genesis")
    }

    /// Return a copy of the block at `index`.
    pub fn block_by_index(&self, index: u64) -> Result<Block, LedgerError> {
        let blocks = self.blocks.read().expect("lock poisoned");
        blocks
            .get(index as usize)
            .cloned()
            .ok_or(LedgerError::OutOfRange {
                index,
                len: blocks.len(),
            })
    }

    /// Return copies of the transactions in the block at `index`.
    pub fn transactions_in_block(&self, index: u64) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.block_by_index(index)?.transactions)
    }

    /// Number of blocks in the chain (at least 1 — genesis).
    pub fn len(&self) -> usize {
        self.blocks.read().expect("lock poisoned").len()
    }

    /// Always false: a ledger holds at least its genesis block.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Validate the whole chain: every block self-validates, every block
    /// links to its predecessor, and every contained transaction's
    /// signature verifies. The error cites the first offending block.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let blocks = self.blocks.read().expect("lock poisoned");

        let genesis = &blocks[0];
        if !genesis.validate_self() {
            return Err(LedgerError::BlockInvalid { index: 0 });
        }

        for window in blocks.windows(2) {
            let (prev, current) = (&window[0], &window[1]);
            if !current.validate_self() {
                return Err(LedgerError::BlockInvalid {
                    index: current.index,
                });
            }
            if current.prev_hash != prev.hash {
                return Err(LedgerError::BrokenLink {
                    index: current.index,
                    expected: prev.hash.clone(),
                    found: current.prev_hash.clone(),
                });
            }
            for tx in &current.transactions {
                if !tx.verify() {
                    return Err(LedgerError::SignatureInvalid { id: tx.id.clone() });
                }
            }
        }
        Ok(())
    }

    /// Whether [`validate`](Ledger::validate) passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Replace a block wholesale. Test-only: lets chain-validation tests
    /// install tampered blocks.
    #[cfg(test)]
    pub(crate) fn replace_block(&self, index: usize, block: Block) {
        let mut blocks = self.blocks.write().expect("lock poisoned");
        blocks[index] = block;
    }
}
