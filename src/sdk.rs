//! Public SDK surface: the envelope engine.
//!
//! `Bastion` orchestrates the key store, the symmetric cipher, the key
//! wrapper, and the wire codec into two operations: encrypt a payload for
//! a recipient's public key, and decrypt an envelope addressed to the
//! local key pair. Decryption with an out-of-band key/IV is a
//! separate, explicitly named operation so call sites are unambiguous
//! about which mode they use.

use core::fmt;

use rand_core::CryptoRngCore;
use tracing::debug;

use crate::error::EnvelopeError;
use crate::keystore::KeyStore;
use crate::wire::AEAD_TAG_BYTES;
use crate::{aead, wire, wrap};

/// Envelope encryption engine bound to one ephemeral key pair.
///
/// Encryption needs no local key pair (the recipient's public key does all
/// the work); header-mode decryption requires [`initialize`] to have run.
///
/// [`initialize`]: Bastion::initialize
pub struct Bastion {
    keys: KeyStore,
}

impl Default for Bastion {
    fn default() -> Self {
        Self::new()
    }
}

impl Bastion {
    /// Create an engine with an empty key store.
    pub fn new() -> Self {
        Self {
            keys: KeyStore::new(),
        }
    }

    /// Create an engine around an existing store.
    pub fn with_keys(keys: KeyStore) -> Self {
        Self { keys }
    }

    /// The underlying key store.
    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    /// Generate the local RSA-4096 key pair.
    pub fn initialize<R: CryptoRngCore>(&self, rng: &mut R) -> Result<(), EnvelopeError> {
        self.keys.initialize(rng)
    }

    /// Export the local public key as PEM text.
    pub fn export_public_key(&self) -> Result<String, EnvelopeError> {
        self.keys.export_public_key()
    }

    /// Encrypt `payload` for the holder of `recipient_pem`.
    ///
    /// Generates fresh key material on every call: identical inputs never
    /// produce identical envelopes.
    pub fn encrypt_for_recipient<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        payload: &[u8],
        recipient_pem: &str,
    ) -> Result<Vec<u8>, EnvelopeError> {
        let recipient = KeyStore::import_public_key(recipient_pem)?;

        let parts = aead::seal(rng, payload)?;
        let (_, header_bytes) =
            wire::build_header(rng, &*parts.key, &parts.iv, &parts.tag, &recipient)?;
        let envelope = wire::frame(&header_bytes, &parts.ciphertext)?;

        debug!(
            payload_bytes = payload.len(),
            envelope_bytes = envelope.len(),
            "sealed envelope"
        );
        Ok(envelope)
    }

    /// Decrypt an envelope addressed to the local key pair (header mode).
    ///
    /// Unframes the buffer, unwraps the key and IV from the header with
    /// the local private key, and verifies the tag carried in the header.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let private = self.keys.private_key()?;

        let parts = wire::unframe(envelope)?;
        let header = wire::parse_header(parts.header)?;

        let key = wrap::unwrap_secret(&header.wrapped_key, private)?;
        let iv = wrap::unwrap_secret(&header.wrapped_iv, private)?;
        let tag = header.auth_tag_bytes()?;

        let payload = aead::open(parts.ciphertext, &tag, &key, &iv)?;
        debug!(
            envelope_bytes = envelope.len(),
            payload_bytes = payload.len(),
            "opened envelope"
        );
        Ok(payload)
    }

    /// Decrypt with an out-of-band key and IV (explicit-key mode).
    ///
    /// `data` is `ciphertext || tag` with no envelope framing; the caller
    /// must have stripped, or never applied, the header. Works without a
    /// local key pair.
    pub fn decrypt_with_key(
        &self,
        data: &[u8],
        key: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        if data.len() < AEAD_TAG_BYTES {
            return Err(EnvelopeError::AuthenticationFailure);
        }
        let (ciphertext, tag) = data.split_at(data.len() - AEAD_TAG_BYTES);
        aead::open(ciphertext, tag, key, iv)
    }
}

// ---------------------------------------------------------------------------
// Inspection utilities (for ops/debugging)
// ---------------------------------------------------------------------------

/// Envelope metadata, extracted without decrypting.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeInfo {
    /// Byte length of the header JSON segment.
    pub header_bytes: usize,
    /// Byte length of the ciphertext segment (tag excluded).
    pub ciphertext_bytes: usize,
    /// Total envelope length.
    pub total_bytes: usize,
}

impl fmt::Display for EnvelopeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "envelope: {} bytes ({} header, {} ciphertext)",
            self.total_bytes, self.header_bytes, self.ciphertext_bytes
        )
    }
}

/// Inspect an envelope's framing and header shape without decrypting.
///
/// Reveals only segment sizes, never key material.
pub fn inspect(envelope: &[u8]) -> Result<EnvelopeInfo, EnvelopeError> {
    let parts = wire::unframe(envelope)?;
    wire::parse_header(parts.header)?;

    Ok(EnvelopeInfo {
        header_bytes: parts.header.len(),
        ciphertext_bytes: parts.ciphertext.len(),
        total_bytes: envelope.len(),
    })
}
