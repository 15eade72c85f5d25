//! Session lifecycle driver: start a session, poll it to a terminal state.

use std::time::Duration;
use tokio::time;
use tracing::{debug, info};

use proofgate_core::config::PollConfig;
use proofgate_core::OperationError;

use crate::connector::{
    AuthenticationSessionRequest, SessionConnector, SessionHandle, SessionOutcome, SessionStatus,
    SigningSessionRequest,
};
use crate::translate;

/// Poll tuning for [`RemoteSessionClient`].
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Pause between status queries.
    pub interval: Duration,
    /// Hard cap on total wait. Exceeding it surfaces `SessionTimeout`
    /// locally, whether or not the service ever reports one.
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(120),
        }
    }
}

impl PollPolicy {
    pub fn from_config(poll: &PollConfig) -> Self {
        Self {
            interval: Duration::from_millis(poll.interval_ms),
            max_wait: Duration::from_millis(poll.max_wait_ms),
        }
    }
}

/// Drives remote sessions to a terminal outcome.
///
/// The poll loop sleeps between round-trips instead of busy-spinning and is
/// the single place in a flow allowed to suspend for wall-clock time.
/// Cancellation is the async-native kind: dropping the returned future stops
/// the loop before its next status request, and the remote session is left to
/// expire on its own timeout.
pub struct RemoteSessionClient<C> {
    connector: C,
    policy: PollPolicy,
}

impl<C: SessionConnector> RemoteSessionClient<C> {
    pub fn new(connector: C, policy: PollPolicy) -> Self {
        Self { connector, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Submit an authentication session request. One network call.
    pub async fn start_authentication(
        &self,
        request: AuthenticationSessionRequest,
    ) -> Result<SessionHandle, OperationError> {
        let handle = self
            .connector
            .create_authentication_session(request)
            .await
            .map_err(translate::connector)?;
        info!(session = %handle, "authentication session created");
        Ok(handle)
    }

    /// Submit a signing session request. One network call.
    pub async fn start_signing(
        &self,
        request: SigningSessionRequest,
    ) -> Result<SessionHandle, OperationError> {
        let handle = self
            .connector
            .create_signing_session(request)
            .await
            .map_err(translate::connector)?;
        info!(session = %handle, "signing session created");
        Ok(handle)
    }

    /// Poll at the policy interval until the first non-running status.
    ///
    /// Returns whatever terminal outcome the service reported; mapping a
    /// failed outcome into an error is the caller's next step through the
    /// translator.
    pub async fn poll_until_terminal(
        &self,
        handle: &SessionHandle,
    ) -> Result<SessionOutcome, OperationError> {
        match time::timeout(self.policy.max_wait, self.poll_loop(handle)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(session = %handle, "poll cap exceeded");
                Err(translate::poll_cap_exceeded())
            }
        }
    }

    async fn poll_loop(&self, handle: &SessionHandle) -> Result<SessionOutcome, OperationError> {
        loop {
            let status = self
                .connector
                .get_session_status(handle)
                .await
                .map_err(translate::connector)?;
            match status {
                SessionStatus::Running => {
                    debug!(session = %handle, "session still running");
                    time::sleep(self.policy.interval).await;
                }
                SessionStatus::Complete(outcome) => {
                    info!(session = %handle, end_result = ?outcome.end_result, "session reached terminal state");
                    return Ok(outcome);
                }
            }
        }
    }
}
