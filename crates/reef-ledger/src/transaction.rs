//! Transactions: identity, signing, and verification.

use std::fmt;

use reef_identity::{address_to_public_key, private_key_from_bytes, sign_hash, verify_hash};
use reef_types::{hash_hex, wall_clock_nanos};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// The social action a transaction records.
///
/// An open enumeration: the four built-in kinds cover the current social
/// surface, and `Other` carries forward kinds this node does not know yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    /// A new post was created.
    PostCreated,
    /// A comment was added to existing content.
    CommentAdded,
    /// A user profile was updated.
    ProfileUpdated,
    /// A like was recorded.
    Like,
    /// A kind introduced after this node was built.
    Other(String),
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::PostCreated => f.write_str("PostCreated"),
            TxKind::CommentAdded => f.write_str("CommentAdded"),
            TxKind::ProfileUpdated => f.write_str("ProfileUpdated"),
            TxKind::Like => f.write_str("Like"),
            TxKind::Other(name) => f.write_str(name),
        }
    }
}

/// A single signed social action.
///
/// The id is the hex SHA-256 of the canonical encoding of (timestamp,
/// sender, kind, payload) — the signature field is excluded, so the
/// identity never depends on its own signature. The signature is an ASN.1
/// DER ECDSA signature over the raw 32 hash bytes the id encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Content-derived identifier (lowercase hex SHA-256).
    pub id: String,
    /// Creation time, nanoseconds since UNIX epoch.
    pub timestamp: u64,
    /// Sender address: hex-encoded SPKI DER public key.
    pub sender: String,
    /// The social action recorded.
    pub kind: TxKind,
    /// Serialized action data, opaque to the ledger.
    pub payload: Vec<u8>,
    /// ASN.1 DER ECDSA signature over the id's hash bytes. Empty until
    /// [`sign`](Transaction::sign) is called.
    pub signature: Vec<u8>,
}

/// The signing/identity preimage: every field except the signature.
#[derive(Serialize)]
struct TxContent<'a> {
    timestamp: u64,
    sender: &'a str,
    kind: &'a TxKind,
    payload: &'a [u8],
}

impl Transaction {
    /// Build an unsigned transaction stamped with the current time.
    ///
    /// Rejects an empty sender address.
    pub fn new(
        sender: impl Into<String>,
        kind: TxKind,
        payload: Vec<u8>,
    ) -> Result<Self, LedgerError> {
        Self::new_with_timestamp(sender, kind, payload, wall_clock_nanos())
    }

    /// Build an unsigned transaction with an explicit timestamp (for
    /// deterministic testing).
    pub fn new_with_timestamp(
        sender: impl Into<String>,
        kind: TxKind,
        payload: Vec<u8>,
        timestamp: u64,
    ) -> Result<Self, LedgerError> {
        let sender = sender.into();
        if sender.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "sender address cannot be empty".to_string(),
            ));
        }

        let mut tx = Self {
            id: String::new(),
            timestamp,
            sender,
            kind,
            payload,
            signature: Vec::new(),
        };
        tx.id = hash_hex(&tx.content_bytes()?);
        Ok(tx)
    }

    /// Canonical encoding of the transaction without its signature.
    fn content_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        postcard::to_allocvec(&TxContent {
            timestamp: self.timestamp,
            sender: &self.sender,
            kind: &self.kind,
            payload: &self.payload,
        })
        .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Sign the transaction's id with a PKCS#8 DER private key.
    pub fn sign(&mut self, private_key_der: &[u8]) -> Result<(), LedgerError> {
        if self.id.is_empty() {
            return Err(LedgerError::InvalidInput(
                "cannot sign a transaction with an empty id".to_string(),
            ));
        }
        let key = private_key_from_bytes(private_key_der)?;
        let hash = hex::decode(&self.id)?;
        self.signature = sign_hash(&key, &hash)?;
        Ok(())
    }

    /// Verify the transaction: the id must match the content, and the
    /// signature must verify against the sender's public key over the
    /// id's hash bytes.
    ///
    /// Returns `false` rather than erroring on malformed input, so
    /// higher-level validators can aggregate outcomes.
    pub fn verify(&self) -> bool {
        if self.id.is_empty() || self.signature.is_empty() || self.sender.is_empty() {
            return false;
        }
        // The id must still be a function of (timestamp, sender, kind,
        // payload); a tampered field breaks this before any signature math.
        match self.content_bytes() {
            Ok(content) if hash_hex(&content) == self.id => {}
            _ => return false,
        }
        let Ok(public_key) = address_to_public_key(&self.sender) else {
            return false;
        };
        let Ok(hash) = hex::decode(&self.id) else {
            return false;
        };
        verify_hash(&public_key, &hash, &self.signature)
    }
}
