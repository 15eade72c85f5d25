//! Single translation point from component failures to [`OperationError`].
//!
//! Every remote outcome variant and collaborator failure is mapped here and
//! nowhere else; adding a new remote failure mode is a one-place change. The
//! original cause is always preserved for operator diagnostics and never
//! becomes part of the user-visible message.

use proofgate_core::{OperationError, OperationErrorKind};
use proofgate_identity::{ClaimError, ValidationError};

use crate::connector::{ConnectorError, SessionEndResult};
use crate::container::ContainerError;

pub(crate) fn claim(err: ClaimError) -> OperationError {
    OperationError::with_cause(
        OperationErrorKind::InvalidClaimInput,
        "identity claim input is invalid",
        anyhow::Error::new(err),
    )
}

pub(crate) fn connector(err: ConnectorError) -> OperationError {
    let (kind, message) = match &err {
        ConnectorError::Transport(_) => (
            OperationErrorKind::ServiceUnavailable,
            "proofing service is unavailable",
        ),
        ConnectorError::AccountNotFound => (
            OperationErrorKind::AccountNotFound,
            "user account was not found",
        ),
        ConnectorError::Maintenance => (
            OperationErrorKind::ServerMaintenance,
            "proofing service is under maintenance",
        ),
    };
    OperationError::with_cause(kind, message, anyhow::Error::new(err))
}

/// Map a terminal end result onto the taxonomy; `Ok` maps to nothing.
pub(crate) fn end_result(result: SessionEndResult) -> Option<OperationError> {
    match result {
        SessionEndResult::Ok => None,
        SessionEndResult::UserRefused => Some(OperationError::new(
            OperationErrorKind::UserRefused,
            "user refused the request",
        )),
        SessionEndResult::Timeout => Some(OperationError::new(
            OperationErrorKind::SessionTimeout,
            "session timed out before the user acted",
        )),
        SessionEndResult::WrongVerificationCodeSelected => Some(OperationError::new(
            OperationErrorKind::WrongVerificationCodeSelected,
            "user selected the wrong verification code",
        )),
        SessionEndResult::DocumentUnusable => Some(OperationError::new(
            OperationErrorKind::DocumentUnusable,
            "user's document cannot be used for this operation",
        )),
    }
}

/// Local poll cap exceeded without the service reporting a timeout.
pub(crate) fn poll_cap_exceeded() -> OperationError {
    OperationError::new(
        OperationErrorKind::SessionTimeout,
        "session timed out before the user acted",
    )
}

pub(crate) fn validation(err: ValidationError) -> OperationError {
    let (kind, message) = match &err {
        ValidationError::Malformed(_) | ValidationError::ChallengeMismatch => (
            OperationErrorKind::UnprocessableResponse,
            "response could not be processed",
        ),
        ValidationError::UntrustedCertificate => (
            OperationErrorKind::UntrustedCertificate,
            "signer certificate is not trusted",
        ),
        ValidationError::CertificateLevelMismatch { .. } => (
            OperationErrorKind::CertificateLevelMismatch,
            "certificate level does not meet the requested level",
        ),
    };
    OperationError::with_cause(kind, message, anyhow::Error::new(err))
}

/// A completed session that is missing data it promised.
pub(crate) fn unprocessable(detail: &'static str) -> OperationError {
    OperationError::with_cause(
        OperationErrorKind::UnprocessableResponse,
        "response could not be processed",
        anyhow::anyhow!(detail),
    )
}

pub(crate) fn container(err: ContainerError) -> OperationError {
    let (kind, message) = match &err {
        ContainerError::Rejected(_) => (
            OperationErrorKind::DocumentUnusable,
            "uploaded file cannot be used for signing",
        ),
        ContainerError::Signature(_) => (
            OperationErrorKind::UnprocessableResponse,
            "returned signature could not be embedded",
        ),
        ContainerError::Io(_) => (
            OperationErrorKind::ContainerPersistenceFailed,
            "signed container could not be written",
        ),
    };
    OperationError::with_cause(kind, message, anyhow::Error::new(err))
}

/// Signing was requested without a document.
pub(crate) fn missing_document() -> OperationError {
    OperationError::new(
        OperationErrorKind::DocumentUnusable,
        "no document was provided for signing",
    )
}
