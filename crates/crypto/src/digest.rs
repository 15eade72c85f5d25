//! Digests computed over container content for remote signing.

use crate::challenge::{verification_code, HashAlgorithm};

/// Digest of a container's to-be-signed bytes.
///
/// Pinned to the algorithm the signature profile was built with; the user's
/// device signs this value instead of a random challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableDigest {
    value: Vec<u8>,
    algorithm: HashAlgorithm,
}

impl SignableDigest {
    /// Hash `data` with `algorithm`.
    pub fn of(data: &[u8], algorithm: HashAlgorithm) -> Self {
        Self {
            value: algorithm.digest(data),
            algorithm,
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Same derivation as [`crate::Challenge::verification_code`]; the device
    /// shows the code it computes from this digest.
    pub fn verification_code(&self) -> String {
        verification_code(&self.value)
    }
}
