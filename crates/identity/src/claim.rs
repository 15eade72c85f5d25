//! Canonical identity claims built from raw user input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building an identity claim.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("country must not be empty")]
    EmptyCountry,
    #[error("national identifier must not be empty")]
    EmptyIdentifier,
}

/// Identity type tokens understood by the proofing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityType {
    /// National personal number ("PNO"), the only type issued here.
    NationalPersonalNumber,
}

impl IdentityType {
    /// Three-letter wire token.
    pub fn code(&self) -> &'static str {
        match self {
            IdentityType::NationalPersonalNumber => "PNO",
        }
    }
}

/// The (country, national identifier) pair naming who is authenticating.
///
/// Immutable once built; both fields are guaranteed non-empty. Alpha-2
/// country validity is checked by the caller before input reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    identity_type: IdentityType,
    country: String,
    national_identifier: String,
}

impl IdentityClaim {
    pub fn new(
        country: impl Into<String>,
        national_identifier: impl Into<String>,
    ) -> Result<Self, ClaimError> {
        let country = country.into();
        let national_identifier = national_identifier.into();
        if country.trim().is_empty() {
            return Err(ClaimError::EmptyCountry);
        }
        if national_identifier.trim().is_empty() {
            return Err(ClaimError::EmptyIdentifier);
        }
        Ok(Self {
            identity_type: IdentityType::NationalPersonalNumber,
            country,
            national_identifier,
        })
    }

    pub fn identity_type(&self) -> IdentityType {
        self.identity_type
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn national_identifier(&self) -> &str {
        &self.national_identifier
    }

    /// Wire form of the claim, e.g. `PNOEE-30303039914`.
    pub fn semantics_identifier(&self) -> String {
        format!(
            "{}{}-{}",
            self.identity_type.code(),
            self.country,
            self.national_identifier
        )
    }
}
