//! Identity claims and authentication response validation for ProofGate.
//!
//! This crate covers the identity-shaped half of the session protocol: the
//! canonical claim naming who is authenticating, the pre-parsed certificate
//! model handed over by trust-store loading, and the validator that turns a
//! raw remote response into a [`VerifiedIdentity`] — or refuses to.
//!
//! # Security Model
//!
//! A `VerifiedIdentity` is only ever constructed after all of:
//! - the response signature covers exactly the challenge that was issued
//! - the signer's certificate chains to a pre-loaded trusted root
//! - the certificate level meets the requested level
//!
//! Validation is all-or-nothing; no partial identity escapes on failure.

pub mod certificate;
pub mod claim;
pub mod validator;

pub use certificate::{Certificate, CertificateLevel, SubjectAttributes};
pub use claim::{ClaimError, IdentityClaim, IdentityType};
pub use validator::{
    AuthenticationResponse, ResponseValidator, ValidationError, VerifiedIdentity,
};
