//! Ephemeral RSA key store and the public-key text codec.
//!
//! The store owns one RSA-4096 key pair for the lifetime of the process or
//! session. The pair is written exactly once (at `initialize`) and read
//! thereafter; a `OnceLock` gives the complete-before barrier without any
//! locking on the read path. The private key never leaves the store; the
//! unwrap operation is surfaced here instead of handing the key out.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand_core::CryptoRngCore;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::EnvelopeError;
use crate::wire::RSA_MODULUS_BITS;
use crate::wrap;

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";
const PEM_LINE_WIDTH: usize = 64;

struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

/// Holder of the local ephemeral key pair.
pub struct KeyStore {
    pair: OnceLock<KeyPair>,
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore {
    /// Create an empty store. No key pair exists until [`initialize`].
    ///
    /// [`initialize`]: KeyStore::initialize
    pub fn new() -> Self {
        Self {
            pair: OnceLock::new(),
        }
    }

    /// Generate the RSA-4096 key pair (OAEP use, e = 65537).
    ///
    /// The first successful call wins; later calls are no-ops returning
    /// `Ok(())`. Concurrent callers may both pay for generation, but only
    /// one pair is ever installed.
    pub fn initialize<R: CryptoRngCore>(&self, rng: &mut R) -> Result<(), EnvelopeError> {
        if self.pair.get().is_some() {
            return Ok(());
        }

        let private = RsaPrivateKey::new(rng, RSA_MODULUS_BITS)
            .map_err(|_| EnvelopeError::KeyGeneration)?;
        let public = private.to_public_key();

        if self.pair.set(KeyPair { private, public }).is_ok() {
            debug!(modulus_bits = RSA_MODULUS_BITS, "generated rsa key pair");
        }
        Ok(())
    }

    /// Whether a key pair has been installed.
    pub fn is_initialized(&self) -> bool {
        self.pair.get().is_some()
    }

    /// The local public key.
    pub fn public_key(&self) -> Result<&RsaPublicKey, EnvelopeError> {
        self.pair
            .get()
            .map(|p| &p.public)
            .ok_or(EnvelopeError::NotInitialized)
    }

    pub(crate) fn private_key(&self) -> Result<&RsaPrivateKey, EnvelopeError> {
        self.pair
            .get()
            .map(|p| &p.private)
            .ok_or(EnvelopeError::NotInitialized)
    }

    /// Export the local public key as PEM text.
    pub fn export_public_key(&self) -> Result<String, EnvelopeError> {
        encode_public_key_pem(self.public_key()?)
    }

    /// Parse a peer's PEM public key into a key usable for wrapping only.
    pub fn import_public_key(text: &str) -> Result<RsaPublicKey, EnvelopeError> {
        decode_public_key_pem(text)
    }

    /// Unwrap a base64 RSA-OAEP block with the local private key.
    pub fn unwrap_secret(&self, wrapped: &str) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
        wrap::unwrap_secret(wrapped, self.private_key()?)
    }
}

// ---------------------------------------------------------------------------
// Public-key text codec
// ---------------------------------------------------------------------------

/// Encode a public key as PEM: fixed header line, base64 of the SPKI DER
/// encoding wrapped at 64 characters per line, fixed footer line (no
/// trailing newline). Round-trips exactly through [`decode_public_key_pem`].
pub fn encode_public_key_pem(key: &RsaPublicKey) -> Result<String, EnvelopeError> {
    let der = key
        .to_public_key_der()
        .map_err(|_| EnvelopeError::MalformedKey)?;
    let encoded = BASE64.encode(der.as_bytes());

    let mut out = String::with_capacity(
        PEM_HEADER.len() + PEM_FOOTER.len() + encoded.len() + encoded.len() / PEM_LINE_WIDTH + 2,
    );
    out.push_str(PEM_HEADER);
    out.push('\n');

    // Base64 is pure ASCII, so slicing at byte offsets is safe.
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(PEM_LINE_WIDTH));
        out.push_str(line);
        out.push('\n');
        rest = tail;
    }

    out.push_str(PEM_FOOTER);
    Ok(out)
}

/// Decode PEM public-key text: strip header, footer, and all whitespace,
/// base64-decode, and parse the SPKI DER structure.
pub fn decode_public_key_pem(text: &str) -> Result<RsaPublicKey, EnvelopeError> {
    let body: String = text
        .replace(PEM_HEADER, "")
        .replace(PEM_FOOTER, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let der = BASE64
        .decode(body)
        .map_err(|_| EnvelopeError::MalformedKey)?;
    RsaPublicKey::from_public_key_der(&der).map_err(|_| EnvelopeError::MalformedKey)
}
