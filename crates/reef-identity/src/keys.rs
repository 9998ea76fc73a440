//! ECDSA P-256 key generation, serialization, and raw-hash signing.

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rand_core::OsRng;

use crate::error::IdentityError;

/// Generate a fresh P-256 keypair.
pub fn generate() -> (SigningKey, VerifyingKey) {
    let signing = SigningKey::random(&mut OsRng);
    let verifying = *signing.verifying_key();
    (signing, verifying)
}

/// Serialize a private key to PKCS#8 DER bytes.
pub fn private_key_to_bytes(key: &SigningKey) -> Result<Vec<u8>, IdentityError> {
    let doc = key
        .to_pkcs8_der()
        .map_err(|e| IdentityError::InvalidKey(e.to_string()))?;
    Ok(doc.as_bytes().to_vec())
}

/// Deserialize a private key from PKCS#8 DER bytes.
pub fn private_key_from_bytes(der: &[u8]) -> Result<SigningKey, IdentityError> {
    if der.is_empty() {
        return Err(IdentityError::InvalidKey(
            "private key bytes are empty".to_string(),
        ));
    }
    SigningKey::from_pkcs8_der(der).map_err(|e| IdentityError::InvalidKey(e.to_string()))
}

/// Serialize a public key to SPKI DER bytes.
pub fn public_key_to_bytes(key: &VerifyingKey) -> Result<Vec<u8>, IdentityError> {
    let doc = key
        .to_public_key_der()
        .map_err(|e| IdentityError::InvalidKey(e.to_string()))?;
    Ok(doc.as_bytes().to_vec())
}

/// Deserialize a public key from SPKI DER bytes.
pub fn public_key_from_bytes(der: &[u8]) -> Result<VerifyingKey, IdentityError> {
    if der.is_empty() {
        return Err(IdentityError::InvalidKey(
            "public key bytes are empty".to_string(),
        ));
    }
    VerifyingKey::from_public_key_der(der).map_err(|e| IdentityError::InvalidKey(e.to_string()))
}

/// Derive a user's address: the lowercase hex of the public key's SPKI
/// DER serialization.
pub fn address(key: &VerifyingKey) -> Result<String, IdentityError> {
    Ok(hex::encode(public_key_to_bytes(key)?))
}

/// Recover the verifying key from an address.
pub fn address_to_public_key(addr: &str) -> Result<VerifyingKey, IdentityError> {
    let der = hex::decode(addr)?;
    public_key_from_bytes(&der)
}

/// Serialize a private key to hex-of-DER (the wallet file form).
pub fn private_key_to_hex(key: &SigningKey) -> Result<String, IdentityError> {
    Ok(hex::encode(private_key_to_bytes(key)?))
}

/// Deserialize a private key from hex-of-DER.
pub fn private_key_from_hex(hex_str: &str) -> Result<SigningKey, IdentityError> {
    let der = hex::decode(hex_str)?;
    private_key_from_bytes(&der)
}

/// Sign a precomputed hash, returning the ASN.1 DER encoded signature.
///
/// The caller passes the raw digest bytes — for ledger transactions, the
/// 32 bytes that the hex transaction identifier encodes.
pub fn sign_hash(key: &SigningKey, hash: &[u8]) -> Result<Vec<u8>, IdentityError> {
    if hash.is_empty() {
        return Err(IdentityError::Signing("hash is empty".to_string()));
    }
    let signature: Signature = key
        .sign_prehash(hash)
        .map_err(|e| IdentityError::Signing(e.to_string()))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify an ASN.1 DER signature over a precomputed hash.
///
/// Returns `false` rather than erroring on malformed input, so callers
/// can aggregate verification outcomes.
pub fn verify_hash(key: &VerifyingKey, hash: &[u8], signature_der: &[u8]) -> bool {
    let Ok(signature) = Signature::from_der(signature_der) else {
        return false;
    };
    key.verify_prehash(hash, &signature).is_ok()
}
