//! Remote session protocol driver for ProofGate.
//!
//! This crate drives the asynchronous request/poll/validate lifecycle against
//! the out-of-band proofing service: it submits authentication and signing
//! requests, polls session status until a terminal state, hands successful
//! responses to the validator, and translates the service's many failure
//! signals into the unified [`proofgate_core::OperationError`] taxonomy.
//!
//! # Flow
//!
//! Authentication:
//! 1. [`AuthenticationFlow::start_authentication`] — claim + fresh challenge,
//!    verification code ready for display
//! 2. [`AuthenticationFlow::authenticate`] — submit, poll, validate
//!
//! Signing:
//! 1. [`SigningFlow::send_signature_request`] — container + digest +
//!    verification code
//! 2. [`SigningFlow::sign`] — submit, poll, finalize, persist
//!
//! Each attempt is one sequential flow; the poll loop is its only extended
//! suspend point and stops issuing requests as soon as the caller drops the
//! future.

pub mod auth;
pub mod client;
pub mod connector;
pub mod container;
pub mod request;
pub mod signing;
mod translate;

pub use auth::{AuthenticationFlow, AuthenticationSessionInfo};
pub use client::{PollPolicy, RemoteSessionClient};
pub use connector::{
    AuthenticationSessionRequest, ConnectorError, DigestToSign, Interaction, SessionConnector,
    SessionEndResult, SessionHandle, SessionOutcome, SessionStatus, SigningSessionRequest,
};
pub use container::{
    ContainerError, ContainerFactory, EmbeddedSignature, SignatureContainer, UploadedFile,
};
pub use request::UserRequest;
pub use signing::{
    CertificateLookup, SignerCertificate, SigningFlow, SigningResult, SigningSessionInfo,
};
