//! Pre-parsed signer certificates and assurance levels.
//!
//! Trust-store loading lives outside this crate; what arrives here is an
//! already-parsed certificate with its chain-relevant fields extracted. The
//! issuer's signature covers the canonical to-be-signed encoding below, so
//! the validator can check chain links without re-parsing DER.

use serde::{Deserialize, Serialize};

/// Assurance level of a signer certificate.
///
/// Ordering matters: `Qualified` satisfies a request for `Advanced`, never
/// the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CertificateLevel {
    Advanced,
    Qualified,
}

impl CertificateLevel {
    /// Wire token used by the session API.
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateLevel::Advanced => "ADVANCED",
            CertificateLevel::Qualified => "QUALIFIED",
        }
    }

    /// Whether this level meets or exceeds `required`.
    pub fn satisfies(&self, required: CertificateLevel) -> bool {
        *self >= required
    }
}

/// Identity attributes carried in a certificate subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAttributes {
    pub given_name: String,
    pub surname: String,
    /// National identity code, e.g. `30303039914`.
    pub identity_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// ISO 8601 date, when the certificate profile includes it.
    pub date_of_birth: Option<String>,
}

/// Certificate as handed over by trust-store loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Certificate serial number
    pub serial: String,
    /// Subject (identity being certified)
    pub subject: String,
    /// Issuer (certificate authority)
    pub issuer: String,
    /// Subject's Ed25519 verifying key (32 bytes)
    pub public_key: Vec<u8>,
    /// Not valid before (Unix timestamp, milliseconds)
    pub not_before: u64,
    /// Not valid after (Unix timestamp, milliseconds)
    pub not_after: u64,
    /// Issuer signature over [`Certificate::tbs_bytes`]
    pub signature: Vec<u8>,
    /// Assurance level the certificate was issued at
    pub level: CertificateLevel,
    /// Person attributes, present on end-entity certificates only
    pub holder: Option<SubjectAttributes>,
}

impl Certificate {
    /// Canonical byte string the issuer signs.
    ///
    /// Field order is fixed; changing it invalidates every issued
    /// certificate.
    pub fn tbs_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        push_field(&mut buf, self.serial.as_bytes());
        push_field(&mut buf, self.subject.as_bytes());
        push_field(&mut buf, self.issuer.as_bytes());
        push_field(&mut buf, &self.public_key);
        buf.extend_from_slice(&self.not_before.to_be_bytes());
        buf.extend_from_slice(&self.not_after.to_be_bytes());
        push_field(&mut buf, self.level.as_str().as_bytes());
        match &self.holder {
            None => buf.push(0),
            Some(holder) => {
                buf.push(1);
                push_field(&mut buf, holder.given_name.as_bytes());
                push_field(&mut buf, holder.surname.as_bytes());
                push_field(&mut buf, holder.identity_code.as_bytes());
                push_field(&mut buf, holder.country.as_bytes());
                push_field(
                    &mut buf,
                    holder.date_of_birth.as_deref().unwrap_or("").as_bytes(),
                );
            }
        }
        buf
    }
}

fn push_field(buf: &mut Vec<u8>, field: &[u8]) {
    buf.extend_from_slice(&(field.len() as u32).to_be_bytes());
    buf.extend_from_slice(field);
}
