//! Stable content fingerprint for source snapshots.

use std::fmt;

/// A 32-hex-char identifier of a source's raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub String);

impl fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Fingerprint raw source bytes with blake3, keeping the first 16 bytes.
pub fn compute(bytes: &[u8]) -> Fingerprint {
  let hex = blake3::hash(bytes).to_hex();
  Fingerprint(hex[..32].to_string())
}
