//! Key wrapping: single-block RSA-OAEP (SHA-256) over short secrets.
//!
//! Only the 32-byte AES key and 12-byte IV are ever wrapped, both far
//! below the OAEP input limit for a 4096-bit modulus; no chunking exists.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand_core::CryptoRngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::EnvelopeError;

/// OAEP overhead for SHA-256: two digests plus two framing bytes.
const OAEP_OVERHEAD_BYTES: usize = 2 * 32 + 2;

/// Encrypt `secret` under `recipient`, returning base64 of the OAEP block.
pub fn wrap_secret<R: CryptoRngCore>(
    rng: &mut R,
    secret: &[u8],
    recipient: &RsaPublicKey,
) -> Result<String, EnvelopeError> {
    if secret.len() + OAEP_OVERHEAD_BYTES > recipient.size() {
        return Err(EnvelopeError::EncryptionFailure);
    }

    let wrapped = recipient
        .encrypt(rng, Oaep::new::<Sha256>(), secret)
        .map_err(|_| EnvelopeError::EncryptionFailure)?;
    Ok(BASE64.encode(wrapped))
}

/// Decrypt a base64 OAEP block with the local private key.
///
/// Every failure mode (bad base64, wrong key, corrupted block, failed
/// padding check) collapses to the same `UnwrapFailure` value.
pub fn unwrap_secret(
    wrapped: &str,
    private: &RsaPrivateKey,
) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
    let block = BASE64
        .decode(wrapped)
        .map_err(|_| EnvelopeError::UnwrapFailure)?;
    let secret = private
        .decrypt(Oaep::new::<Sha256>(), &block)
        .map_err(|_| EnvelopeError::UnwrapFailure)?;
    Ok(Zeroizing::new(secret))
}
