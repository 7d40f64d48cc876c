//! Content-addressed fingerprints and the duplicate registry.
//!
//! A [`Fingerprint`] is the SHA3-256 digest of the raw upload bytes. Identical
//! payloads always produce the same fingerprint, so the registry can flag a
//! resubmission without keeping the payload itself.
//!
//! The [`FingerprintRegistry`] lives for as long as its owner (the server
//! state) and is never written anywhere. Restarting the process forgets every
//! fingerprint.

use std::fmt;

use dashmap::DashSet;
use serde::{Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use tracing::debug;

/// Digest length in bytes (256 bits).
pub const FINGERPRINT_BYTES: usize = 32;

/// SHA3-256 digest of a byte payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_BYTES]);

impl Fingerprint {
    /// Compute the fingerprint of raw bytes.
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut digest = [0u8; FINGERPRINT_BYTES];
        digest.copy_from_slice(&result);
        Self(digest)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_BYTES] {
        &self.0
    }

    /// Lowercase hex rendering, as used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// In-memory set of fingerprints seen during the owner's lifetime.
///
/// The set is only reachable through [`check_and_register`], which performs
/// the membership test and the insert as one atomic step.
///
/// [`check_and_register`]: FingerprintRegistry::check_and_register
#[derive(Debug, Default)]
pub struct FingerprintRegistry {
    seen: DashSet<Fingerprint>,
}

impl FingerprintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `fingerprint` was already registered before this
    /// call, and registers it otherwise.
    ///
    /// The test-and-insert holds the shard lock for the fingerprint, so of
    /// any number of concurrent calls with the same digest exactly one
    /// returns `false`.
    pub fn check_and_register(&self, fingerprint: Fingerprint) -> bool {
        let inserted = self.seen.insert(fingerprint);
        debug!(
            fingerprint = %fingerprint,
            is_duplicate = !inserted,
            "Fingerprint registry checked"
        );
        !inserted
    }

    /// Number of distinct fingerprints registered so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of(b"same bytes");
        let b = Fingerprint::of(b"same bytes");
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), b.to_hex());
    }

    #[test]
    fn test_fingerprint_known_vector() {
        // SHA3-256 of the empty string
        assert_eq!(
            Fingerprint::of(b"").to_hex(),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_fingerprint_distinct_over_samples() {
        // Deterministic xorshift sampling keeps the test reproducible.
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut payloads = HashSet::new();
        while payloads.len() < 2000 {
            let len = (next() % 64) as usize + 1;
            let bytes: Vec<u8> = (0..len).map(|_| next() as u8).collect();
            payloads.insert(bytes);
        }

        let digests: HashSet<Fingerprint> = payloads.iter().map(|p| Fingerprint::of(p)).collect();
        assert_eq!(digests.len(), payloads.len());
    }

    #[test]
    fn test_fingerprint_single_bit_change() {
        let a = Fingerprint::of(&[0b0000_0000, 1, 2, 3]);
        let b = Fingerprint::of(&[0b0000_0001, 1, 2, 3]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_serializes_as_hex() {
        let fp = Fingerprint::of(b"payload");
        let json = serde_json::to_value(fp).unwrap();
        assert_eq!(json, serde_json::Value::String(fp.to_hex()));
        assert_eq!(fp.to_hex().len(), FINGERPRINT_BYTES * 2);
    }

    #[test]
    fn test_first_submission_not_duplicate_second_is() {
        let registry = FingerprintRegistry::new();
        let fp = Fingerprint::of(b"image bytes");

        assert!(!registry.check_and_register(fp));
        assert!(registry.check_and_register(fp));
        assert!(registry.check_and_register(fp));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_fingerprints_tracked_separately() {
        let registry = FingerprintRegistry::new();
        assert!(registry.is_empty());

        assert!(!registry.check_and_register(Fingerprint::of(b"one")));
        assert!(!registry.check_and_register(Fingerprint::of(b"two")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_identical_submissions_single_winner() {
        const THREADS: usize = 16;

        for round in 0..20u32 {
            let registry = Arc::new(FingerprintRegistry::new());
            let barrier = Arc::new(Barrier::new(THREADS));
            let fp = Fingerprint::of(&round.to_le_bytes());

            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let registry = Arc::clone(&registry);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        registry.check_and_register(fp)
                    })
                })
                .collect();

            let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            let first_seen = results.iter().filter(|dup| !**dup).count();

            assert_eq!(first_seen, 1, "exactly one caller must see a new fingerprint");
            assert_eq!(registry.len(), 1);
        }
    }
}
