//! ECDSA P-256 key material and wallet persistence.
//!
//! Keys are serialized with DER-compatible stable encodings: PKCS#8 for
//! private keys, SPKI for public keys. A user's address is the lowercase
//! hex of their public key's SPKI encoding — it identifies transaction
//! senders on the ledger, and the verifying key is recovered from it.
//!
//! The [`Wallet`] holds a private key and persists it as a JSON file with
//! a single `private_key_hex` field, written with mode `0600`.

mod error;
mod keys;
mod wallet;

pub use error::IdentityError;
pub use keys::{
    address, address_to_public_key, generate, private_key_from_bytes, private_key_from_hex,
    private_key_to_bytes, private_key_to_hex, public_key_from_bytes, public_key_to_bytes,
    sign_hash, verify_hash,
};
pub use wallet::Wallet;
