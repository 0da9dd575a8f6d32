//! Wire format (self-describing envelope)
//!
//! Format:
//!   header_len[4, u32 BE] || header_json[header_len] || aead_ct[..]
//!
//! header_json = {"wrappedKey": b64, "wrappedIV": b64, "authTag": b64}
//!
//! The AEAD ciphertext segment excludes the 16-byte GCM tag; the tag is
//! carried only inside the header. `header_len` must equal the exact byte
//! length of the JSON segment.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand_core::CryptoRngCore;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;
use crate::wrap;

// ---------------------------------------------------------------------------
// Component sizes
// ---------------------------------------------------------------------------

/// Length prefix: u32 big-endian byte count of the header JSON.
pub const LEN_PREFIX_BYTES: usize = 4;

/// AES-256 key size.
pub const AES_KEY_BYTES: usize = 32;

/// AES-GCM IV size (96 bits).
pub const IV_BYTES: usize = 12;

/// AES-GCM authentication tag size (128 bits).
pub const AEAD_TAG_BYTES: usize = 16;

/// RSA modulus size used for the local key pair.
pub const RSA_MODULUS_BITS: usize = 4096;

/// Size of one RSA-OAEP block under a 4096-bit modulus; every wrapped
/// secret occupies exactly one block.
pub const WRAPPED_SECRET_BYTES: usize = RSA_MODULUS_BITS / 8; // 512

// ---------------------------------------------------------------------------
// Envelope header
// ---------------------------------------------------------------------------

/// Parsed envelope header.
///
/// Serializes to compact JSON with the members in declaration order:
/// `wrappedKey`, `wrappedIV`, `authTag`. Unknown extra members are
/// tolerated on parse; the three listed members are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    /// Base64 RSA-OAEP ciphertext of the AES key.
    #[serde(rename = "wrappedKey")]
    pub wrapped_key: String,

    /// Base64 RSA-OAEP ciphertext of the IV.
    #[serde(rename = "wrappedIV")]
    pub wrapped_iv: String,

    /// Base64 of the 16-byte GCM tag.
    #[serde(rename = "authTag")]
    pub auth_tag: String,
}

impl EnvelopeHeader {
    /// Decode and length-check the authentication tag.
    pub fn auth_tag_bytes(&self) -> Result<[u8; AEAD_TAG_BYTES], EnvelopeError> {
        let raw = BASE64
            .decode(&self.auth_tag)
            .map_err(|_| EnvelopeError::MalformedEnvelope)?;
        raw.as_slice()
            .try_into()
            .map_err(|_| EnvelopeError::MalformedEnvelope)
    }
}

/// Borrowed view of an unframed envelope.
#[derive(Debug, Clone, Copy)]
pub struct FrameParts<'a> {
    /// The header JSON segment.
    pub header: &'a [u8],
    /// The AEAD ciphertext segment (tag excluded).
    pub ciphertext: &'a [u8],
}

// ---------------------------------------------------------------------------
// Codec operations
// ---------------------------------------------------------------------------

/// Wrap the symmetric key material under `recipient` and serialize the
/// header. Returns the parsed form alongside its exact wire bytes.
pub fn build_header<R: CryptoRngCore>(
    rng: &mut R,
    key: &[u8],
    iv: &[u8],
    tag: &[u8; AEAD_TAG_BYTES],
    recipient: &RsaPublicKey,
) -> Result<(EnvelopeHeader, Vec<u8>), EnvelopeError> {
    let header = EnvelopeHeader {
        wrapped_key: wrap::wrap_secret(rng, key, recipient)?,
        wrapped_iv: wrap::wrap_secret(rng, iv, recipient)?,
        auth_tag: BASE64.encode(tag),
    };
    let bytes = serde_json::to_vec(&header).map_err(|_| EnvelopeError::EncryptionFailure)?;
    Ok((header, bytes))
}

/// Join header and ciphertext into one length-prefixed buffer.
pub fn frame(header: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let header_len = u32::try_from(header.len()).map_err(|_| EnvelopeError::MalformedEnvelope)?;

    let mut out = Vec::with_capacity(LEN_PREFIX_BYTES + header.len() + ciphertext.len());
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(header);
    out.extend_from_slice(ciphertext);
    Ok(out)
}

/// Split an envelope into its header and ciphertext segments.
pub fn unframe(envelope: &[u8]) -> Result<FrameParts<'_>, EnvelopeError> {
    if envelope.len() < LEN_PREFIX_BYTES {
        return Err(EnvelopeError::MalformedEnvelope);
    }

    let len_bytes: [u8; LEN_PREFIX_BYTES] = envelope[..LEN_PREFIX_BYTES]
        .try_into()
        .map_err(|_| EnvelopeError::MalformedEnvelope)?;
    let header_len = u32::from_be_bytes(len_bytes) as usize;

    let body = &envelope[LEN_PREFIX_BYTES..];
    if body.len() < header_len {
        return Err(EnvelopeError::MalformedEnvelope);
    }

    let (header, ciphertext) = body.split_at(header_len);
    Ok(FrameParts { header, ciphertext })
}

/// Parse the header JSON segment.
pub fn parse_header(header: &[u8]) -> Result<EnvelopeHeader, EnvelopeError> {
    serde_json::from_slice(header).map_err(|_| EnvelopeError::MalformedEnvelope)
}
