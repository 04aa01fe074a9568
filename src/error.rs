//! Top-level error model: composes the engine and key-store error kinds
//! into one enum the CLI boundary maps to a stable exit code.
//! `Display` impls here and in the composed kinds never interpolate key
//! material, nonce material, or plaintext/ciphertext bytes — only path
//! strings, byte counts, and fixed diagnostic text. `AuthenticationFailure`
//! never names which of the six cascade layers detected the tamper.

use thiserror::Error;

use crate::engine::EngineError;
use crate::keystore::KeyStoreError;

#[derive(Debug, Error)]
pub enum GitsealError {
    #[error("authentication failed: ciphertext, tags, or path do not match")]
    AuthenticationFailure,

    #[error("malformed ciphertext blob: {0}")]
    MalformedBlob(String),

    #[error("internal cryptographic failure")]
    InternalCryptoError,

    #[error("master key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("path argument must not be empty")]
    EmptyPath,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<EngineError> for GitsealError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::AuthenticationFailure => GitsealError::AuthenticationFailure,
            EngineError::MalformedBlob(inner) => GitsealError::MalformedBlob(inner.to_string()),
            EngineError::InternalCryptoError => GitsealError::InternalCryptoError,
        }
    }
}

impl From<KeyStoreError> for GitsealError {
    fn from(err: KeyStoreError) -> Self {
        match err {
            KeyStoreError::Io(inner) => GitsealError::Io(inner),
            other => GitsealError::KeyUnavailable(other.to_string()),
        }
    }
}
