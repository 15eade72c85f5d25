//! Authentication response validation against a trusted root set.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::certificate::{Certificate, CertificateLevel};
use proofgate_crypto::Challenge;

/// Raw signed assertion returned by the proofing service for a completed
/// authentication session. Nothing in here is trusted yet.
#[derive(Debug, Clone)]
pub struct AuthenticationResponse {
    /// Signature the user's device produced over the challenge payload.
    pub signature_value: Vec<u8>,
    /// Certificate chain, end-entity first, trust anchor last.
    pub certificate_chain: Vec<Certificate>,
    /// Level reported for the signer certificate.
    pub certificate_level: CertificateLevel,
}

/// Identity attributes extracted from a fully validated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub given_name: String,
    pub surname: String,
    /// National identity code, e.g. `30303039914`.
    pub identity_code: String,
    pub country: String,
    /// ISO 8601 date, when the certificate profile includes it.
    pub date_of_birth: Option<String>,
}

/// Validation failures. The response is discarded whole on any of these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The response cannot be decoded into the shapes we verify.
    #[error("response is malformed: {0}")]
    Malformed(&'static str),
    /// The signature does not cover the challenge this session issued.
    #[error("signature does not cover the issued challenge")]
    ChallengeMismatch,
    /// The chain does not terminate in a pre-loaded trusted root.
    #[error("certificate chain does not terminate in a trusted root")]
    UntrustedCertificate,
    /// The reported level is below what the session required.
    #[error("certificate level {actual:?} is below required {required:?}")]
    CertificateLevelMismatch {
        required: CertificateLevel,
        actual: CertificateLevel,
    },
}

/// Validates authentication responses and extracts verified identities.
///
/// Holds the pre-parsed trusted roots supplied by configuration loading. An
/// empty root set rejects every response.
#[derive(Debug, Default)]
pub struct ResponseValidator {
    trusted_roots: Vec<Certificate>,
}

impl ResponseValidator {
    pub fn new(trusted_roots: Vec<Certificate>) -> Self {
        Self { trusted_roots }
    }

    /// Validate `response` against the challenge this session issued.
    ///
    /// All-or-nothing: a [`VerifiedIdentity`] is produced only when the
    /// challenge signature, the trust chain, and the certificate level all
    /// check out, in that order.
    pub fn validate(
        &self,
        response: &AuthenticationResponse,
        challenge: &Challenge,
        required_level: CertificateLevel,
    ) -> Result<VerifiedIdentity, ValidationError> {
        let leaf = response
            .certificate_chain
            .first()
            .ok_or(ValidationError::Malformed("certificate chain is empty"))?;

        self.verify_challenge_signature(leaf, &response.signature_value, challenge)?;
        self.verify_chain(&response.certificate_chain)?;

        if !response.certificate_level.satisfies(required_level) {
            warn!(
                required = required_level.as_str(),
                actual = response.certificate_level.as_str(),
                "certificate level below requested"
            );
            return Err(ValidationError::CertificateLevelMismatch {
                required: required_level,
                actual: response.certificate_level,
            });
        }

        let holder = leaf.holder.as_ref().ok_or(ValidationError::Malformed(
            "signer certificate carries no subject attributes",
        ))?;

        debug!(
            identity_code = %holder.identity_code,
            country = %holder.country,
            "authentication response validated"
        );

        Ok(VerifiedIdentity {
            given_name: holder.given_name.clone(),
            surname: holder.surname.clone(),
            identity_code: holder.identity_code.clone(),
            country: holder.country.clone(),
            date_of_birth: holder.date_of_birth.clone(),
        })
    }

    /// The signature must cover exactly the payload we sent. Anything else is
    /// a replay or a substitution.
    fn verify_challenge_signature(
        &self,
        leaf: &Certificate,
        signature_value: &[u8],
        challenge: &Challenge,
    ) -> Result<(), ValidationError> {
        let key = verifying_key(&leaf.public_key)
            .ok_or(ValidationError::Malformed("signer key is not a valid Ed25519 key"))?;
        let signature_bytes: [u8; 64] = signature_value
            .try_into()
            .map_err(|_| ValidationError::Malformed("signature value is not 64 bytes"))?;
        let signature = Signature::from_bytes(&signature_bytes);

        key.verify(challenge.payload(), &signature).map_err(|_| {
            warn!(
                challenge = %hex::encode(&challenge.payload()[..8.min(challenge.payload().len())]),
                "signature does not match issued challenge"
            );
            ValidationError::ChallengeMismatch
        })
    }

    /// Walk the chain end-entity to anchor, then anchor it in the root set.
    fn verify_chain(&self, chain: &[Certificate]) -> Result<(), ValidationError> {
        for window in chain.windows(2) {
            let (cert, issuer) = (&window[0], &window[1]);
            if cert.issuer != issuer.subject {
                return Err(ValidationError::UntrustedCertificate);
            }
            verify_issued_by(cert, &issuer.public_key)?;
        }

        let terminal = chain
            .last()
            .ok_or(ValidationError::Malformed("certificate chain is empty"))?;

        // The terminal certificate either is a trusted root or was issued
        // directly by one.
        let is_root = self
            .trusted_roots
            .iter()
            .any(|root| root.subject == terminal.subject && root.public_key == terminal.public_key);
        if is_root {
            return Ok(());
        }
        if let Some(root) = self
            .trusted_roots
            .iter()
            .find(|root| root.subject == terminal.issuer)
        {
            return verify_issued_by(terminal, &root.public_key);
        }

        warn!(issuer = %terminal.issuer, "no trusted root anchors the chain");
        Err(ValidationError::UntrustedCertificate)
    }
}

fn verify_issued_by(cert: &Certificate, issuer_key: &[u8]) -> Result<(), ValidationError> {
    let key = verifying_key(issuer_key).ok_or(ValidationError::UntrustedCertificate)?;
    let signature_bytes: [u8; 64] = cert
        .signature
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::UntrustedCertificate)?;
    let signature = Signature::from_bytes(&signature_bytes);
    key.verify(&cert.tbs_bytes(), &signature)
        .map_err(|_| ValidationError::UntrustedCertificate)
}

fn verifying_key(bytes: &[u8]) -> Option<VerifyingKey> {
    let key_bytes: [u8; 32] = bytes.try_into().ok()?;
    VerifyingKey::from_bytes(&key_bytes).ok()
}
