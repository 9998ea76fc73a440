//! JSON wallet persistence for a user's private key.

use std::path::Path;

use p256::ecdsa::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IdentityError;
use crate::keys;

/// On-disk wallet representation: a single hex-of-DER private key field.
#[derive(Serialize, Deserialize)]
struct WalletFile {
    private_key_hex: String,
}

/// A user's wallet: a P-256 private key with signing and address helpers.
///
/// Private keys are stored unencrypted; the file is written with mode
/// `0600` so only the owner can read it.
#[derive(Debug)]
pub struct Wallet {
    signing: SigningKey,
}

impl Wallet {
    /// Create a wallet with a freshly generated keypair.
    pub fn generate() -> Self {
        let (signing, _) = keys::generate();
        Self { signing }
    }

    /// Reconstruct a wallet from PKCS#8 DER private key bytes.
    pub fn from_private_key_bytes(der: &[u8]) -> Result<Self, IdentityError> {
        Ok(Self {
            signing: keys::private_key_from_bytes(der)?,
        })
    }

    /// The wallet's signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    /// The wallet's public key.
    pub fn public_key(&self) -> VerifyingKey {
        *self.signing.verifying_key()
    }

    /// The wallet's address (hex of the public key's SPKI DER form).
    pub fn address(&self) -> Result<String, IdentityError> {
        keys::address(&self.public_key())
    }

    /// The private key as PKCS#8 DER bytes.
    pub fn private_key_bytes(&self) -> Result<Vec<u8>, IdentityError> {
        keys::private_key_to_bytes(&self.signing)
    }

    /// Sign a precomputed hash, returning the ASN.1 DER signature.
    pub fn sign(&self, hash: &[u8]) -> Result<Vec<u8>, IdentityError> {
        keys::sign_hash(&self.signing, hash)
    }

    /// Save the wallet to a JSON file with mode `0600`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IdentityError> {
        let path = path.as_ref();
        let file = WalletFile {
            private_key_hex: keys::private_key_to_hex(&self.signing)?,
        };
        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| IdentityError::MalformedWallet(e.to_string()))?;

        std::fs::write(path, json)?;
        restrict_permissions(path)?;
        debug!(path = %path.display(), "saved wallet");
        Ok(())
    }

    /// Load a wallet from a JSON file.
    ///
    /// Rejects files with a missing or empty `private_key_hex` field,
    /// invalid hex, or bytes that do not decode to a P-256 private key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IdentityError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let file: WalletFile = serde_json::from_slice(&data)
            .map_err(|e| IdentityError::MalformedWallet(e.to_string()))?;
        if file.private_key_hex.trim().is_empty() {
            return Err(IdentityError::MissingPrivateKey);
        }
        let signing = keys::private_key_from_hex(&file.private_key_hex)?;
        debug!(path = %path.display(), "loaded wallet");
        Ok(Self { signing })
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), IdentityError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), IdentityError> {
    Ok(())
}
