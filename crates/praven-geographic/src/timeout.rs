//! Bounded external calls.
//!
//! The call runs on its own thread and hands its result back over a
//! `crossbeam-channel` of capacity one. The caller waits at most `timeout`;
//! a late worker finishes in the background and its send is dropped.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use praven_core::errors::ServiceError;
use tracing::warn;

/// Run `call` with an upper bound on how long the caller waits.
pub fn call_with_timeout<T, F>(service: &str, timeout: Duration, call: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
{
    let (tx, rx) = bounded(1);
    let spawned = thread::Builder::new()
        .name(format!("praven-{service}"))
        .spawn(move || {
            let _ = tx.send(call());
        });
    if let Err(e) = spawned {
        return Err(ServiceError::Transport {
            service: service.to_string(),
            reason: format!("could not start worker: {e}"),
        });
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(service, timeout_ms = timeout.as_millis() as u64, "service call timed out");
            Err(ServiceError::Timeout {
                service: service.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(ServiceError::Transport {
            service: service.to_string(),
            reason: "worker exited without a result".to_string(),
        }),
    }
}
