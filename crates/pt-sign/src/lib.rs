//! Request signing for the KDNiao trace API
//!
//! The vendor verifies every request by recomputing `DataSign` from the
//! posted `RequestData` and the merchant's app key, so the pipeline here has
//! to match theirs byte for byte:
//!
//! ```text
//! percent_escape(base64(hex(md5(payload ++ secret))))
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::{Digest, Md5};

mod escape;
pub use escape::{escape_path_segment, unescape_path_segment, DecodeError};

/// Length of a signature: 32 hex chars base64-encoded with one `=` of padding.
pub const SIGNATURE_LENGTH: usize = 44;

/// Compute the lowercase hex MD5 digest of `payload` followed by `secret`.
///
/// This is the first stage of [`sign`], exposed for diagnostics.
#[must_use]
pub fn digest_hex(payload: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Sign a serialized request payload with the merchant's secret key.
///
/// The secret is appended to the payload with no delimiter. The hex text of
/// the digest (not the raw digest bytes) is what gets base64-encoded.
///
/// Base64 of lowercase hex only ever contains `[A-Za-z0-9=]`, all of which
/// survive path-segment escaping, so the final escape never changes the
/// value. It stays in the pipeline to mirror the vendor's reference client.
#[must_use]
pub fn sign(payload: &str, secret: &str) -> String {
    let hex_digest = digest_hex(payload, secret);
    let encoded = STANDARD.encode(hex_digest.as_bytes());
    escape_path_segment(&encoded)
}
