//! Stable identifiers for generated instances and recorded traces.
//!
//! An [`InstanceId`] is derived from content, not allocated: hashing an
//! input's bytes with blake3 means the same maze layout or the same
//! algorithm input always maps to the same id, across runs and across
//! machines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content-derived identity of a puzzle instance or algorithm input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Derives an id from raw bytes (first 8 bytes of the blake3 digest,
    /// little-endian).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        InstanceId(u64::from_le_bytes(prefix))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_content_same_id() {
        let a = InstanceId::from_bytes(b"permutation-generator:AB");
        let b = InstanceId::from_bytes(b"permutation-generator:AB");
        assert_eq!(a, b);
    }

    #[test]
    fn different_content_different_id() {
        let a = InstanceId::from_bytes(b"AB");
        let b = InstanceId::from_bytes(b"BA");
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_fixed_width_hex() {
        assert_eq!(InstanceId(0xab).to_string(), "00000000000000ab");
    }
}
