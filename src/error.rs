//! Unified error type for Bastion Envelope.
//!
//! Decrypt-side failures are constant-shape: `UnwrapFailure` and
//! `AuthenticationFailure` carry no cause detail, so a caller (or an
//! attacker observing a caller) cannot distinguish a wrong key from a
//! padding check failure from a tampered ciphertext (oracle discipline).

use thiserror::Error;

/// Everything that can go wrong inside the envelope core.
///
/// All variants are terminal for the operation that raised them; the core
/// never retries internally and never returns partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// An operation needed the local key pair before `initialize` ran.
    #[error("key pair not initialized")]
    NotInitialized,

    /// RSA key pair generation failed.
    #[error("key generation failed")]
    KeyGeneration,

    /// Public-key text failed to decode or parse.
    #[error("malformed public key")]
    MalformedKey,

    /// Encrypt-path failure: OAEP wrap, AEAD seal, or header serialization.
    #[error("encryption failed")]
    EncryptionFailure,

    /// RSA-OAEP decryption of wrapped key material failed.
    #[error("key unwrap failed")]
    UnwrapFailure,

    /// AEAD tag verification failed.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// Framing or header JSON invalid, or buffer too short.
    #[error("malformed envelope")]
    MalformedEnvelope,
}
