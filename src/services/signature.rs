//! Time-based AES-CMAC signatures for Sesame cloud commands.
//!
//! The Sesame cloud authenticates a command by recomputing an AES-CMAC over
//! a coarse timestamp. The message is bytes 1..4 of the little-endian
//! `u32` Unix time, i.e. `(now >> 8)` truncated to 24 bits, so a signature
//! stays valid for a ~256 second bucket.

use aes::{Aes128, Aes192, Aes256};
use cmac::{Cmac, Mac};
use std::fmt;

/// Length of a CMAC tag over AES (the AES block size).
pub const SIGNATURE_LEN: usize = 16;

/// Errors raised while preparing keys or computing signatures
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid secret key encoding: {0}")]
    InvalidKeyEncoding(#[from] hex::FromHexError),

    #[error("signature computation failed: {0}")]
    SignatureComputation(String),
}

/// AES key used to sign commands for one device.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Decode a hex-encoded AES-128/192/256 key
    pub fn from_hex(secret_key_hex: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(secret_key_hex.trim())?;
        match bytes.len() {
            16 | 24 | 32 => Ok(Self { bytes }),
            n => Err(SignatureError::SignatureComputation(format!(
                "AES key must be 16, 24 or 32 bytes, got {n}"
            ))),
        }
    }

    /// Sign the bucket containing `unix_seconds`
    pub fn sign_at(&self, unix_seconds: i64) -> Result<Signature, SignatureError> {
        cmac_tag(&self.bytes, &time_bucket(unix_seconds)).map(Signature)
    }

    /// Sign the current wall-clock bucket
    pub fn sign_now(&self) -> Result<Signature, SignatureError> {
        self.sign_at(chrono::Utc::now().timestamp())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes redacted>)", self.bytes.len())
    }
}

/// A CMAC tag proving possession of a device secret at a point in time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Lowercase hex form sent in the `sign` field
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Compute the signature for `secret_key_hex` at the current time
pub fn compute_signature(secret_key_hex: &str) -> Result<Signature, SignatureError> {
    SecretKey::from_hex(secret_key_hex)?.sign_now()
}

/// Compute the signature for `secret_key_hex` at an explicit Unix time
pub fn compute_signature_at(
    secret_key_hex: &str,
    unix_seconds: i64,
) -> Result<Signature, SignatureError> {
    SecretKey::from_hex(secret_key_hex)?.sign_at(unix_seconds)
}

/// The 3-byte MAC message for a Unix time.
///
/// The timestamp wraps to `u32` first, then the lowest byte is dropped.
pub fn time_bucket(unix_seconds: i64) -> [u8; 3] {
    let le = (unix_seconds as u32).to_le_bytes();
    [le[1], le[2], le[3]]
}

macro_rules! cmac_over {
    ($cipher:ty, $key:expr, $message:expr) => {{
        let mut mac = <Cmac<$cipher> as Mac>::new_from_slice($key)
            .map_err(|e| SignatureError::SignatureComputation(e.to_string()))?;
        mac.update($message);
        let bytes = mac.finalize().into_bytes();
        let mut tag = [0u8; SIGNATURE_LEN];
        tag.copy_from_slice(&bytes);
        tag
    }};
}

fn cmac_tag(key: &[u8], message: &[u8]) -> Result<[u8; SIGNATURE_LEN], SignatureError> {
    let tag = match key.len() {
        16 => cmac_over!(Aes128, key, message),
        24 => cmac_over!(Aes192, key, message),
        32 => cmac_over!(Aes256, key, message),
        n => {
            return Err(SignatureError::SignatureComputation(format!(
                "unsupported AES key length {n}"
            )));
        }
    };
    Ok(tag)
}
