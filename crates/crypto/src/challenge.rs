//! Random authentication challenges and their verification codes.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Number of random bytes drawn for each authentication challenge.
pub const CHALLENGE_SIZE: usize = 64;

/// Digest algorithms accepted by the proofing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Wire token used by the session API.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Hash `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

/// A fresh random payload the user's device must sign to prove possession of
/// its credential.
///
/// The payload doubles as the digest submitted with the session request; the
/// algorithm tag tells the service how the device should treat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    payload: Vec<u8>,
    algorithm: HashAlgorithm,
}

impl Challenge {
    /// Draw a brand-new challenge.
    ///
    /// Every authentication attempt gets its own payload; payloads are never
    /// reused across sessions.
    pub fn generate() -> Self {
        Self::generate_with(HashAlgorithm::Sha512)
    }

    /// Draw a brand-new challenge tagged with a specific algorithm.
    pub fn generate_with(algorithm: HashAlgorithm) -> Self {
        let mut payload = vec![0u8; CHALLENGE_SIZE];
        OsRng.fill_bytes(&mut payload);
        Self { payload, algorithm }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Four-digit code shown to the user on both ends.
    pub fn verification_code(&self) -> String {
        verification_code(&self.payload)
    }
}

/// Derive the four-digit verification code for a signable value.
///
/// SHA-256 over the value, last two digest bytes read as a big-endian
/// integer, modulo 10000, zero-padded. The service derives the same code
/// independently on the user's device, so the derivation must never change.
pub fn verification_code(value: &[u8]) -> String {
    let digest = Sha256::digest(value);
    let tail = u16::from_be_bytes([digest[30], digest[31]]);
    format!("{:04}", tail % 10000)
}
