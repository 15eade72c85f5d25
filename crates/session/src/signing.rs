//! Signing flow: container digest → remote signature → finalized file.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::PathBuf;
use tracing::{info, warn};

use proofgate_core::{Config, OperationError};
use proofgate_crypto::{HashAlgorithm, SignableDigest};
use proofgate_identity::{Certificate, CertificateLevel, IdentityClaim};

use crate::client::RemoteSessionClient;
use crate::connector::{
    ConnectorError, DigestToSign, Interaction, SessionConnector, SigningSessionRequest,
};
use crate::container::{ContainerFactory, SignatureContainer};
use crate::request::UserRequest;
use crate::translate;

/// Signer certificate with the device document it lives on.
#[derive(Debug, Clone)]
pub struct SignerCertificate {
    pub certificate: Certificate,
    pub document_number: String,
}

/// Looks up the signing certificate registered for a claim.
#[async_trait]
pub trait CertificateLookup: Send + Sync {
    async fn signing_certificate(
        &self,
        claim: &IdentityClaim,
    ) -> Result<SignerCertificate, ConnectorError>;
}

/// Session-scoped state for one signing attempt.
///
/// Carries the not-yet-finalized container; consumed by
/// [`SigningFlow::sign`]. The digest is recomputed from the container on
/// every [`SigningFlow::send_signature_request`], so a changed document
/// always yields a new challenge.
pub struct SigningSessionInfo {
    digest: SignableDigest,
    container: Box<dyn SignatureContainer>,
    signer: SignerCertificate,
    verification_code: String,
}

impl SigningSessionInfo {
    pub fn document_number(&self) -> &str {
        &self.signer.document_number
    }

    pub fn digest(&self) -> &SignableDigest {
        &self.digest
    }

    /// Code to display to the user before the blocking call.
    pub fn verification_code(&self) -> &str {
        &self.verification_code
    }
}

impl std::fmt::Debug for SigningSessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSessionInfo")
            .field("document_number", &self.signer.document_number)
            .field("verification_code", &self.verification_code)
            .finish_non_exhaustive()
    }
}

/// Outcome of a completed signing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningResult {
    pub result: String,
    /// Structural validity of the embedded signature.
    pub valid: bool,
    /// Signature creation time, Unix epoch milliseconds.
    pub timestamp: u64,
    pub container_path: PathBuf,
}

/// Drives remote document signing against the proofing service.
pub struct SigningFlow<C, F, L> {
    client: RemoteSessionClient<C>,
    containers: F,
    certificates: L,
    required_level: CertificateLevel,
    confirmation_message: String,
    display_text: String,
    output_dir: PathBuf,
}

impl<C, F, L> SigningFlow<C, F, L>
where
    C: SessionConnector,
    F: ContainerFactory,
    L: CertificateLookup,
{
    pub fn new(
        client: RemoteSessionClient<C>,
        containers: F,
        certificates: L,
        config: &Config,
    ) -> Self {
        Self {
            client,
            containers,
            certificates,
            required_level: CertificateLevel::Qualified,
            confirmation_message: config.interaction.sign_confirmation_message.clone(),
            display_text: config.interaction.sign_display_text.clone(),
            output_dir: std::env::temp_dir(),
        }
    }

    /// Write finished containers somewhere other than the system temp dir.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Package the document and prepare the digest the device will sign.
    ///
    /// Performs the certificate lookup but opens no session yet; the
    /// verification code is ready for display afterwards.
    pub async fn send_signature_request(
        &self,
        request: UserRequest,
    ) -> Result<SigningSessionInfo, OperationError> {
        let claim = IdentityClaim::new(&request.country, &request.national_identity_number)
            .map_err(translate::claim)?;
        let file = request.file.ok_or_else(translate::missing_document)?;

        let signer = self
            .certificates
            .signing_certificate(&claim)
            .await
            .map_err(translate::connector)?;

        let container = self
            .containers
            .build(&file, &signer.certificate)
            .map_err(translate::container)?;
        let data = container.data_to_sign().map_err(translate::container)?;
        let digest = SignableDigest::of(&data, HashAlgorithm::Sha256);
        let verification_code = digest.verification_code();

        info!(
            document = %signer.document_number,
            file = %file.name,
            code = %verification_code,
            "signature request prepared"
        );

        Ok(SigningSessionInfo {
            digest,
            container,
            signer,
            verification_code,
        })
    }

    /// Submit the signing session and suspend until the user confirms.
    ///
    /// On success the raw signature is embedded into the container and the
    /// container is persisted under a unique name. The session info is
    /// consumed either way; a retry restarts at
    /// [`send_signature_request`](Self::send_signature_request).
    pub async fn sign(&self, session: SigningSessionInfo) -> Result<SigningResult, OperationError> {
        let SigningSessionInfo {
            digest,
            mut container,
            signer,
            ..
        } = session;

        let request = SigningSessionRequest {
            document_number: signer.document_number.clone(),
            digest: DigestToSign {
                value: digest.value().to_vec(),
                algorithm: digest.algorithm(),
            },
            certificate_level: self.required_level,
            // The service requires this interaction order; the two are not
            // interchangeable.
            interactions: vec![
                Interaction::ConfirmationMessage {
                    text: self.confirmation_message.clone(),
                },
                Interaction::DisplayTextAndPin {
                    text: self.display_text.clone(),
                },
            ],
        };

        let handle = self.client.start_signing(request).await?;
        let outcome = self.client.poll_until_terminal(&handle).await?;

        if let Some(err) = translate::end_result(outcome.end_result) {
            warn!(
                document = %signer.document_number,
                end_result = ?outcome.end_result,
                "signing session failed"
            );
            return Err(err);
        }

        let signature_value = outcome
            .signature_value
            .ok_or_else(|| translate::unprocessable("completed session carries no signature"))?;

        let embedded = container
            .finalize(&signature_value)
            .map_err(translate::container)?;
        let path = self.unique_container_path();
        container.save_to(&path).map_err(translate::container)?;

        info!(
            document = %signer.document_number,
            path = %path.display(),
            valid = embedded.valid,
            "container persisted"
        );

        Ok(SigningResult {
            result: "Signing successful".to_string(),
            valid: embedded.valid,
            timestamp: embedded.timestamp,
            container_path: path,
        })
    }

    fn unique_container_path(&self) -> PathBuf {
        let mut tag = [0u8; 8];
        OsRng.fill_bytes(&mut tag);
        self.output_dir
            .join(format!("proofgate-container-{}.asice", hex::encode(tag)))
    }
}
