//! Merkle root over transaction identifiers.

use reef_types::hash_hex;

use crate::transaction::Transaction;

/// Compute the Merkle root of a block's transactions.
///
/// Leaf hashes are the transaction ids, *sorted* before combining, so the
/// root is a function of the set of transactions rather than their order
/// in the block (order stays recorded in the block's transaction
/// sequence). Levels with an odd count duplicate their last element; each
/// pair is combined by hashing the UTF-8 concatenation of the two hex
/// strings. The root of an empty set is the hash of the empty string.
///
/// This exact scheme is observable through block hashes — any future
/// change to it must be versioned.
pub fn merkle_root(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return hash_hex(&[]);
    }

    let mut level: Vec<String> = transactions.iter().map(|tx| tx.id.clone()).collect();
    level.sort();

    while level.len() > 1 {
        if level.len() % 2 != 0 {
            level.push(level[level.len() - 1].clone());
        }
        level = level
            .chunks(2)
            .map(|pair| {
                let combined = format!("{}{}", pair[0], pair[1]);
                hash_hex(combined.as_bytes())
            })
            .collect();
    }

    level.remove(0)
}
