//! Poll-loop timing under a paused clock.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use proofgate_core::OperationErrorKind;
use proofgate_session::{
    PollPolicy, RemoteSessionClient, SessionEndResult, SessionHandle, SessionOutcome,
};

use crate::test_utils::ScriptedConnector;

fn tight_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_secs(1),
        max_wait: Duration::from_secs(8),
    }
}

#[tokio::test(start_paused = true)]
async fn poll_terminates_on_first_terminal_status() {
    let connector = Arc::new(ScriptedConnector::completing_after(
        3,
        SessionOutcome::failed(SessionEndResult::Ok),
    ));
    let client = RemoteSessionClient::new(Arc::clone(&connector), tight_policy());

    let outcome = client
        .poll_until_terminal(&SessionHandle("s".to_string()))
        .await
        .unwrap();
    assert_eq!(outcome.end_result, SessionEndResult::Ok);
    assert_eq!(connector.status_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn poll_cap_is_enforced_without_remote_timeout_signal() {
    // The service keeps answering RUNNING forever.
    let connector = Arc::new(ScriptedConnector::new(vec![]));
    let client = RemoteSessionClient::new(Arc::clone(&connector), tight_policy());

    let started = tokio::time::Instant::now();
    let err = client
        .poll_until_terminal(&SessionHandle("s".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), OperationErrorKind::SessionTimeout);
    assert_eq!(started.elapsed(), Duration::from_secs(8));
}

#[tokio::test(start_paused = true)]
async fn abandoned_flow_stops_issuing_status_requests() {
    let connector = Arc::new(ScriptedConnector::new(vec![]));
    let client = Arc::new(RemoteSessionClient::new(
        Arc::clone(&connector),
        PollPolicy {
            interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(600),
        },
    ));

    let poller = {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            client
                .poll_until_terminal(&SessionHandle("s".to_string()))
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(4_500)).await;
    poller.abort();
    let issued_before_abandon = connector.status_calls.load(Ordering::SeqCst);
    assert!(issued_before_abandon >= 1);

    // Long after the caller walked away, no further requests went out.
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(
        connector.status_calls.load(Ordering::SeqCst),
        issued_before_abandon
    );
}
