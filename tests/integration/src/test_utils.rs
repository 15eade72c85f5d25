//! Shared fixtures: a scripted connector, a tiny Ed25519 PKI, and in-memory
//! container collaborators.

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proofgate_identity::{Certificate, CertificateLevel, IdentityClaim, SubjectAttributes};
use proofgate_session::{
    AuthenticationSessionRequest, CertificateLookup, ConnectorError, ContainerError,
    ContainerFactory, EmbeddedSignature, SessionConnector, SessionEndResult, SessionHandle,
    SessionOutcome, SessionStatus, SignatureContainer, SignerCertificate, SigningSessionRequest,
    UploadedFile,
};

/// Route flow logs into test output when `RUST_LOG` asks for them.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn signing_key() -> SigningKey {
    let mut key_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut key_bytes);
    SigningKey::from_bytes(&key_bytes)
}

/// Issue `subject_key`'s certificate, signed by `issuer_key`.
pub fn issue_certificate(
    subject: &str,
    issuer: &str,
    subject_key: &SigningKey,
    issuer_key: &SigningKey,
    holder: Option<SubjectAttributes>,
) -> Certificate {
    let mut cert = Certificate {
        serial: format!("{subject}-serial"),
        subject: subject.to_string(),
        issuer: issuer.to_string(),
        public_key: subject_key.verifying_key().to_bytes().to_vec(),
        not_before: 0,
        not_after: u64::MAX,
        signature: vec![],
        level: CertificateLevel::Qualified,
        holder,
    };
    cert.signature = issuer_key.sign(&cert.tbs_bytes()).to_bytes().to_vec();
    cert
}

pub fn demo_holder(identity_code: &str, country: &str) -> SubjectAttributes {
    SubjectAttributes {
        given_name: "DEMO".to_string(),
        surname: "USER".to_string(),
        identity_code: identity_code.to_string(),
        country: country.to_string(),
        date_of_birth: Some("1903-03-03".to_string()),
    }
}

/// One self-signed root plus a device certificate issued under it.
pub struct DemoPki {
    pub root: Certificate,
    pub device_key: SigningKey,
    pub device_chain: Vec<Certificate>,
}

impl DemoPki {
    pub fn new(identity_code: &str, country: &str) -> Self {
        let root_key = signing_key();
        let device_key = signing_key();
        let root = issue_certificate("DEMO-ROOT-CA", "DEMO-ROOT-CA", &root_key, &root_key, None);
        let leaf = issue_certificate(
            &format!("PNO{country}-{identity_code}"),
            "DEMO-ROOT-CA",
            &device_key,
            &root_key,
            Some(demo_holder(identity_code, country)),
        );
        Self {
            root,
            device_key,
            device_chain: vec![leaf],
        }
    }

    /// Successful outcome: the device signed `payload`.
    pub fn signed_outcome(&self, payload: &[u8]) -> SessionOutcome {
        SessionOutcome {
            end_result: SessionEndResult::Ok,
            signature_value: Some(self.device_key.sign(payload).to_bytes().to_vec()),
            certificate_chain: self.device_chain.clone(),
            certificate_level: Some(CertificateLevel::Qualified),
        }
    }
}

/// What the scripted connector should answer to a create call.
pub enum CreateBehavior {
    Accept,
    Reject(fn() -> ConnectorError),
}

/// Connector that replays a scripted status sequence.
///
/// Captures the submitted requests so scenarios can assert on what actually
/// went over the seam.
pub struct ScriptedConnector {
    create: CreateBehavior,
    statuses: Mutex<VecDeque<SessionStatus>>,
    pub status_calls: Arc<AtomicUsize>,
    pub auth_requests: Mutex<Vec<AuthenticationSessionRequest>>,
    pub signing_requests: Mutex<Vec<SigningSessionRequest>>,
}

impl ScriptedConnector {
    pub fn new(statuses: Vec<SessionStatus>) -> Self {
        Self {
            create: CreateBehavior::Accept,
            statuses: Mutex::new(statuses.into()),
            status_calls: Arc::new(AtomicUsize::new(0)),
            auth_requests: Mutex::new(Vec::new()),
            signing_requests: Mutex::new(Vec::new()),
        }
    }

    /// Terminal `outcome` after `running_polls` RUNNING answers.
    pub fn completing_after(running_polls: usize, outcome: SessionOutcome) -> Self {
        let mut statuses = vec![];
        for _ in 0..running_polls {
            statuses.push(SessionStatus::Running);
        }
        statuses.push(SessionStatus::Complete(outcome));
        Self::new(statuses)
    }

    pub fn rejecting_create(reason: fn() -> ConnectorError) -> Self {
        let mut connector = Self::new(vec![]);
        connector.create = CreateBehavior::Reject(reason);
        connector
    }

    /// Append a status answer after construction; lets a scenario script the
    /// device's response once it has seen the issued challenge.
    pub fn push_status(&self, status: SessionStatus) {
        self.statuses.lock().unwrap().push_back(status);
    }
}

#[async_trait]
impl SessionConnector for ScriptedConnector {
    async fn create_authentication_session(
        &self,
        request: AuthenticationSessionRequest,
    ) -> Result<SessionHandle, ConnectorError> {
        if let CreateBehavior::Reject(reason) = &self.create {
            return Err(reason());
        }
        self.auth_requests.lock().unwrap().push(request);
        Ok(SessionHandle("session-0001".to_string()))
    }

    async fn create_signing_session(
        &self,
        request: SigningSessionRequest,
    ) -> Result<SessionHandle, ConnectorError> {
        if let CreateBehavior::Reject(reason) = &self.create {
            return Err(reason());
        }
        self.signing_requests.lock().unwrap().push(request);
        Ok(SessionHandle("session-0001".to_string()))
    }

    async fn get_session_status(
        &self,
        _handle: &SessionHandle,
    ) -> Result<SessionStatus, ConnectorError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        Ok(next.unwrap_or(SessionStatus::Running))
    }
}

/// Lookup that always returns the same signer certificate.
pub struct StaticLookup {
    pub signer: SignerCertificate,
}

#[async_trait]
impl CertificateLookup for StaticLookup {
    async fn signing_certificate(
        &self,
        _claim: &IdentityClaim,
    ) -> Result<SignerCertificate, ConnectorError> {
        Ok(self.signer.clone())
    }
}

/// Lookup for a user the service does not know.
pub struct MissingAccountLookup;

#[async_trait]
impl CertificateLookup for MissingAccountLookup {
    async fn signing_certificate(
        &self,
        _claim: &IdentityClaim,
    ) -> Result<SignerCertificate, ConnectorError> {
        Err(ConnectorError::AccountNotFound)
    }
}

/// Container that keeps the document in memory until persisted.
pub struct MemoryContainer {
    document: Vec<u8>,
    signature: Option<Vec<u8>>,
}

impl SignatureContainer for MemoryContainer {
    fn data_to_sign(&self) -> Result<Vec<u8>, ContainerError> {
        Ok(self.document.clone())
    }

    fn finalize(&mut self, signature_value: &[u8]) -> Result<EmbeddedSignature, ContainerError> {
        if signature_value.is_empty() {
            return Err(ContainerError::Signature("empty signature value".into()));
        }
        self.signature = Some(signature_value.to_vec());
        Ok(EmbeddedSignature {
            valid: true,
            timestamp: 1_700_000_000_000,
        })
    }

    fn save_to(&self, path: &Path) -> Result<(), ContainerError> {
        let signature = self
            .signature
            .as_ref()
            .ok_or_else(|| ContainerError::Signature("container not finalized".into()))?;
        let mut bytes = self.document.clone();
        bytes.extend_from_slice(signature);
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Factory producing [`MemoryContainer`]s; rejects empty uploads.
pub struct MemoryContainerFactory;

impl ContainerFactory for MemoryContainerFactory {
    fn build(
        &self,
        file: &UploadedFile,
        _signer: &Certificate,
    ) -> Result<Box<dyn SignatureContainer>, ContainerError> {
        if file.bytes.is_empty() {
            return Err(ContainerError::Rejected("empty file".into()));
        }
        Ok(Box::new(MemoryContainer {
            document: file.bytes.clone(),
            signature: None,
        }))
    }
}

pub fn text_file(name: &str, body: &[u8]) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        content_type: "text/plain".to_string(),
        bytes: body.to_vec(),
    }
}
