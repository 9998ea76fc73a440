//! Error types for key material and wallet operations.

/// Errors that can occur handling key material and wallets.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Key bytes could not be decoded into a usable key.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// A hex string could not be decoded.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Producing a signature failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The wallet file had no usable private key.
    #[error("wallet file is missing a private key")]
    MissingPrivateKey,

    /// The wallet file was not valid JSON of the expected shape.
    #[error("malformed wallet file: {0}")]
    MalformedWallet(String),

    /// An I/O error occurred reading or writing the wallet file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
