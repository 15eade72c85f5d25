//! Authentication flow: claim → challenge → session → verified identity.

use tracing::{info, warn};

use proofgate_core::{Config, OperationError};
use proofgate_crypto::Challenge;
use proofgate_identity::{
    AuthenticationResponse, CertificateLevel, IdentityClaim, ResponseValidator, VerifiedIdentity,
};

use crate::client::RemoteSessionClient;
use crate::connector::{
    AuthenticationSessionRequest, DigestToSign, Interaction, SessionConnector,
};
use crate::request::UserRequest;
use crate::translate;

/// Session-scoped state for one authentication attempt.
///
/// Exclusively owned by the flow that created it and consumed by
/// [`AuthenticationFlow::authenticate`]; a new attempt always carries a fresh
/// challenge.
#[derive(Debug)]
pub struct AuthenticationSessionInfo {
    request: UserRequest,
    claim: IdentityClaim,
    challenge: Challenge,
    verification_code: String,
}

impl AuthenticationSessionInfo {
    pub fn request(&self) -> &UserRequest {
        &self.request
    }

    pub fn claim(&self) -> &IdentityClaim {
        &self.claim
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    /// Code to display to the user before the blocking call.
    pub fn verification_code(&self) -> &str {
        &self.verification_code
    }
}

/// Drives out-of-band authentication against the proofing service.
pub struct AuthenticationFlow<C> {
    client: RemoteSessionClient<C>,
    validator: ResponseValidator,
    required_level: CertificateLevel,
    display_text: String,
}

impl<C: SessionConnector> AuthenticationFlow<C> {
    pub fn new(
        client: RemoteSessionClient<C>,
        validator: ResponseValidator,
        config: &Config,
    ) -> Self {
        Self {
            client,
            validator,
            required_level: CertificateLevel::Qualified,
            display_text: config.interaction.auth_display_text.clone(),
        }
    }

    /// Accept a lower assurance level than the default `Qualified`.
    pub fn with_required_level(mut self, level: CertificateLevel) -> Self {
        self.required_level = level;
        self
    }

    /// Build the claim and a brand-new challenge.
    ///
    /// The returned session info carries the verification code so the caller
    /// can display it before invoking [`authenticate`](Self::authenticate).
    /// No network traffic happens here.
    pub fn start_authentication(
        &self,
        request: UserRequest,
    ) -> Result<AuthenticationSessionInfo, OperationError> {
        let claim = IdentityClaim::new(&request.country, &request.national_identity_number)
            .map_err(translate::claim)?;
        // A new hash value must be created for each authentication request.
        let challenge = Challenge::generate();
        let verification_code = challenge.verification_code();

        info!(
            identity = %claim.semantics_identifier(),
            code = %verification_code,
            "authentication challenge issued"
        );

        Ok(AuthenticationSessionInfo {
            request,
            claim,
            challenge,
            verification_code,
        })
    }

    /// Submit the session and suspend until the user acts on their device.
    ///
    /// May stay suspended for the whole poll duration. The session info is
    /// consumed: whatever the outcome, a retry starts over with
    /// [`start_authentication`](Self::start_authentication).
    pub async fn authenticate(
        &self,
        session: AuthenticationSessionInfo,
    ) -> Result<VerifiedIdentity, OperationError> {
        let AuthenticationSessionInfo {
            claim, challenge, ..
        } = session;

        let request = AuthenticationSessionRequest {
            claim: claim.clone(),
            digest: DigestToSign {
                value: challenge.payload().to_vec(),
                algorithm: challenge.algorithm(),
            },
            certificate_level: self.required_level,
            interactions: vec![Interaction::DisplayTextAndPin {
                text: self.display_text.clone(),
            }],
        };

        let handle = self.client.start_authentication(request).await?;
        let outcome = self.client.poll_until_terminal(&handle).await?;

        if let Some(err) = translate::end_result(outcome.end_result) {
            warn!(
                identity = %claim.semantics_identifier(),
                end_result = ?outcome.end_result,
                "authentication session failed"
            );
            return Err(err);
        }

        let response = AuthenticationResponse {
            signature_value: outcome
                .signature_value
                .ok_or_else(|| translate::unprocessable("completed session carries no signature"))?,
            certificate_level: outcome.certificate_level.ok_or_else(|| {
                translate::unprocessable("completed session carries no certificate level")
            })?,
            certificate_chain: outcome.certificate_chain,
        };

        let identity = self
            .validator
            .validate(&response, &challenge, self.required_level)
            .map_err(translate::validation)?;

        info!(
            identity_code = %identity.identity_code,
            country = %identity.country,
            "authentication completed"
        );
        Ok(identity)
    }
}
