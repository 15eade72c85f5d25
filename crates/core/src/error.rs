//! Unified operation error taxonomy.
//!
//! Every failure a caller can observe from an authentication or signing flow
//! is one [`OperationError`] carrying a stable [`OperationErrorKind`], a
//! message safe to show end users, and the original cause for operator
//! diagnostics. The cause is never part of the user-visible message.

use thiserror::Error;

/// Closed set of failure kinds surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationErrorKind {
    /// Claim input was empty or otherwise unusable before any network call.
    InvalidClaimInput,
    /// The proofing service could not be reached.
    ServiceUnavailable,
    /// No account exists for the submitted identity claim.
    AccountNotFound,
    /// The user declined the request on their device.
    UserRefused,
    /// The user picked a verification code that does not match ours.
    WrongVerificationCodeSelected,
    /// The session expired before the user acted, or the poll cap was hit.
    SessionTimeout,
    /// The user's registered document cannot be used for this operation.
    DocumentUnusable,
    /// The proofing service is in a maintenance window.
    ServerMaintenance,
    /// The returned certificate level is below what was requested.
    CertificateLevelMismatch,
    /// The response could not be decoded or failed signature checks.
    UnprocessableResponse,
    /// The certificate chain does not terminate in a trusted root.
    UntrustedCertificate,
    /// The finished container could not be written to disk.
    ContainerPersistenceFailed,
}

/// Failure of one authentication or signing operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationError {
    kind: OperationErrorKind,
    message: String,
    #[source]
    cause: Option<anyhow::Error>,
}

impl OperationError {
    /// Build an error with no underlying cause.
    pub fn new(kind: OperationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Build an error preserving the original cause for diagnostics.
    pub fn with_cause(
        kind: OperationErrorKind,
        message: impl Into<String>,
        cause: anyhow::Error,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// Stable failure kind for programmatic handling.
    pub fn kind(&self) -> OperationErrorKind {
        self.kind
    }

    /// Message safe to show to end users.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Original cause, if one was attached.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }
}

/// Result alias used across the ProofGate crates.
pub type Result<T> = std::result::Result<T, OperationError>;
