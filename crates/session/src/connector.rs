//! Typed interface to the remote proofing service.
//!
//! Transport is an external concern: implementations wrap whatever RPC client
//! talks to the service endpoint. The shapes here mirror the session API's
//! request and response objects, not their wire bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use proofgate_crypto::HashAlgorithm;
use proofgate_identity::{Certificate, CertificateLevel, IdentityClaim};

/// Opaque handle naming one remote session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(pub String);

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interactions the user's device may be asked to perform.
///
/// Order matters: the service walks the list and runs the first interaction
/// the device supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    /// Confirmation dialog without code entry.
    ConfirmationMessage { text: String },
    /// Display text and ask for PIN entry.
    DisplayTextAndPin { text: String },
}

/// Digest material submitted with a session request.
#[derive(Debug, Clone)]
pub struct DigestToSign {
    pub value: Vec<u8>,
    pub algorithm: HashAlgorithm,
}

/// Request to open an authentication session for a claim.
#[derive(Debug, Clone)]
pub struct AuthenticationSessionRequest {
    pub claim: IdentityClaim,
    pub digest: DigestToSign,
    pub certificate_level: CertificateLevel,
    pub interactions: Vec<Interaction>,
}

/// Request to open a signing session for a known device document.
#[derive(Debug, Clone)]
pub struct SigningSessionRequest {
    pub document_number: String,
    pub digest: DigestToSign,
    pub certificate_level: CertificateLevel,
    pub interactions: Vec<Interaction>,
}

/// Terminal outcome variants the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEndResult {
    Ok,
    UserRefused,
    Timeout,
    WrongVerificationCodeSelected,
    DocumentUnusable,
}

/// One status poll answer.
#[derive(Debug, Clone)]
pub enum SessionStatus {
    /// The user has not acted yet; poll again.
    Running,
    /// Terminal; no further polling is meaningful.
    Complete(SessionOutcome),
}

/// Body of a completed session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub end_result: SessionEndResult,
    /// Raw signature over the submitted digest; present on success.
    pub signature_value: Option<Vec<u8>>,
    /// Signer certificate chain, end-entity first; present on success.
    pub certificate_chain: Vec<Certificate>,
    /// Level of the returned certificate; present on success.
    pub certificate_level: Option<CertificateLevel>,
}

impl SessionOutcome {
    /// Outcome carrying only a failure signal.
    pub fn failed(end_result: SessionEndResult) -> Self {
        Self {
            end_result,
            signature_value: None,
            certificate_chain: Vec::new(),
            certificate_level: None,
        }
    }
}

/// Failures a connector can raise before a session reaches a terminal state.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The service endpoint could not be reached.
    #[error("proofing service unreachable")]
    Transport(#[source] anyhow::Error),
    /// The service knows no account for the submitted claim.
    #[error("no account for the submitted identity claim")]
    AccountNotFound,
    /// The service is in a maintenance window.
    #[error("proofing service is under maintenance")]
    Maintenance,
}

/// Typed client for the remote session API.
///
/// Implementations perform exactly one network call per method; retry policy
/// belongs to the service integration, not to the protocol core.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn create_authentication_session(
        &self,
        request: AuthenticationSessionRequest,
    ) -> Result<SessionHandle, ConnectorError>;

    async fn create_signing_session(
        &self,
        request: SigningSessionRequest,
    ) -> Result<SessionHandle, ConnectorError>;

    async fn get_session_status(
        &self,
        handle: &SessionHandle,
    ) -> Result<SessionStatus, ConnectorError>;
}

#[async_trait]
impl<C: SessionConnector + ?Sized> SessionConnector for std::sync::Arc<C> {
    async fn create_authentication_session(
        &self,
        request: AuthenticationSessionRequest,
    ) -> Result<SessionHandle, ConnectorError> {
        (**self).create_authentication_session(request).await
    }

    async fn create_signing_session(
        &self,
        request: SigningSessionRequest,
    ) -> Result<SessionHandle, ConnectorError> {
        (**self).create_signing_session(request).await
    }

    async fn get_session_status(
        &self,
        handle: &SessionHandle,
    ) -> Result<SessionStatus, ConnectorError> {
        (**self).get_session_status(handle).await
    }
}
