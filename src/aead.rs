//! AEAD: AES-256-GCM with a detached tag.
//!
//! The envelope format carries the GCM tag in the header rather than
//! appended to the ciphertext, so seal splits the AEAD output and open
//! rejoins it before verification.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::error::EnvelopeError;
use crate::wire::{AEAD_TAG_BYTES, AES_KEY_BYTES, IV_BYTES};

/// Output of one seal operation. Key material lives exactly as long as
/// this value; the key is zeroized on drop.
pub struct SymmetricParts {
    /// Fresh 256-bit AES key.
    pub key: Zeroizing<[u8; AES_KEY_BYTES]>,
    /// Fresh 96-bit IV.
    pub iv: [u8; IV_BYTES],
    /// Ciphertext with the tag stripped.
    pub ciphertext: Vec<u8>,
    /// The trailing 128-bit GCM tag.
    pub tag: [u8; AEAD_TAG_BYTES],
}

/// Encrypt `payload` under a freshly generated key and IV.
pub fn seal<R: CryptoRngCore>(
    rng: &mut R,
    payload: &[u8],
) -> Result<SymmetricParts, EnvelopeError> {
    let mut key = Zeroizing::new([0u8; AES_KEY_BYTES]);
    rng.fill_bytes(&mut *key);
    let mut iv = [0u8; IV_BYTES];
    rng.fill_bytes(&mut iv);

    let cipher =
        Aes256Gcm::new_from_slice(&*key).map_err(|_| EnvelopeError::EncryptionFailure)?;
    let mut combined = cipher
        .encrypt(Nonce::from_slice(&iv), payload)
        .map_err(|_| EnvelopeError::EncryptionFailure)?;

    // AEAD output is ciphertext || tag; peel off the trailing tag.
    if combined.len() < AEAD_TAG_BYTES {
        return Err(EnvelopeError::EncryptionFailure);
    }
    let split = combined.len() - AEAD_TAG_BYTES;
    let mut tag = [0u8; AEAD_TAG_BYTES];
    tag.copy_from_slice(&combined[split..]);
    combined.truncate(split);

    Ok(SymmetricParts {
        key,
        iv,
        ciphertext: combined,
        tag,
    })
}

/// Verify and decrypt. Returns `AuthenticationFailure` on any mismatch
/// (tampered ciphertext, wrong key/IV, wrong tag, malformed lengths) and
/// never partial plaintext.
pub fn open(
    ciphertext: &[u8],
    tag: &[u8],
    key: &[u8],
    iv: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    if key.len() != AES_KEY_BYTES || iv.len() != IV_BYTES || tag.len() != AEAD_TAG_BYTES {
        return Err(EnvelopeError::AuthenticationFailure);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| EnvelopeError::AuthenticationFailure)?;

    let mut joined = Vec::with_capacity(ciphertext.len() + AEAD_TAG_BYTES);
    joined.extend_from_slice(ciphertext);
    joined.extend_from_slice(tag);

    cipher
        .decrypt(Nonce::from_slice(iv), joined.as_slice())
        .map_err(|_| EnvelopeError::AuthenticationFailure)
}
