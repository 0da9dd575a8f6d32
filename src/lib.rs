//! # Bastion Envelope
//!
//! Hybrid RSA envelope encryption for confidential message delivery.
//!
//! A sender encrypts a payload under a fresh AES-256-GCM key and IV, wraps
//! both with RSA-OAEP (SHA-256) under the recipient's 4096-bit public key,
//! and frames everything into one self-describing buffer. The recipient
//! holds the only private key that can unwrap the key material.
//!
//! ## Quick Start
//!
//! ```rust
//! use bastion_envelope::Bastion;
//! use rand_core::OsRng;
//!
//! let bastion = Bastion::new();
//! bastion.initialize(&mut OsRng).unwrap();
//!
//! let recipient_pem = bastion.export_public_key().unwrap();
//! let envelope = bastion
//!     .encrypt_for_recipient(&mut OsRng, b"secret", &recipient_pem)
//!     .unwrap();
//!
//! let plaintext = bastion.decrypt(&envelope).unwrap();
//! assert_eq!(plaintext, b"secret");
//! ```
//!
//! ## Security Properties
//!
//! - **Hybrid scheme**: RSA-OAEP-4096 key transport + AES-256-GCM payload
//!   encryption, with fresh key material on every call
//! - **Uniform errors**: unwrap and authentication failures are
//!   constant-shape values
//! - **Stable wire format**: length-prefixed, self-describing header
//! - **Injected randomness**: every randomized operation takes the CSPRNG
//!   as an argument, so there is no hidden global provider
//!
//! ## What's NOT Provided
//!
//! - Key persistence or rotation
//! - Multi-recipient envelopes
//! - Streaming encryption of payloads larger than memory
//! - Transport (TLS, retries, timeouts)

#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/bastion-envelope/0.1.0")]

// ---------------------------------------------------------------------------
// Internal modules (not part of public API)
// ---------------------------------------------------------------------------

mod aead;
mod error;
mod keystore;
mod wrap;

// Wire module is exposed for tests and fuzzing but is not stable API
#[doc(hidden)]
pub mod wire;

// ---------------------------------------------------------------------------
// Public SDK interface
// ---------------------------------------------------------------------------

mod sdk;

pub use error::EnvelopeError;
pub use keystore::{decode_public_key_pem, encode_public_key_pem, KeyStore};
pub use sdk::{inspect, Bastion, EnvelopeInfo};
pub use wrap::wrap_secret;

// Recipient keys are plain `rsa` types; re-exported so callers don't need
// a direct dependency to hold one.
pub use rsa::RsaPublicKey;

/// SDK version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
