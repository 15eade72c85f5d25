//! Cryptographic material for out-of-band authentication and signing.
//!
//! This crate produces the values the user's device is asked to sign: fresh
//! random challenges for authentication and fixed-algorithm digests over
//! container content for signing. Both carry a short human verification code
//! derived deterministically from the signable value, so the code the remote
//! service shows on the device can be compared against the one the relying
//! party displays.
//!
//! # Security Principles
//!
//! - Challenge payloads are drawn from the operating system's CSPRNG and are
//!   never derived from user or request data
//! - A payload is used for exactly one session; retries get a new challenge
//! - Verification codes are a pure function of the signable value

pub mod challenge;
pub mod digest;

pub use challenge::{verification_code, Challenge, HashAlgorithm, CHALLENGE_SIZE};
pub use digest::SignableDigest;
