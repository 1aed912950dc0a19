//! Debounced Username Availability Checking
//!
//! Wraps an availability probe with a 500ms debounce so that rapid
//! keystrokes collapse into a single request. State is shared behind a
//! mutex so UI code can snapshot it at any time; the lock is never held
//! across an await.
//!
//! ## Debounce contract
//! - Every call cancels the previously scheduled probe, fired or not yet
//! - Inputs shorter than the minimum length short-circuit locally and
//!   never reach the network
//! - Whitespace-only input resets the state entirely

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use tokio::task::JoinHandle;

/// Delay between the last keystroke and the availability request
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Minimum username length checked locally before any request
const LOCAL_MIN_LENGTH: usize = 3;

/// Fallback message when the request fails for reasons the server
/// never explained
const FALLBACK_ERROR: &str = "Failed to check username availability";

/// Availability verdict as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckVerdict {
    pub available: bool,
    pub message: String,
}

/// Observable state of the checker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckState {
    /// A probe is scheduled or in flight
    pub is_checking: bool,
    /// Last verdict received (or produced locally)
    pub result: Option<CheckVerdict>,
    /// Last request failure, user-facing
    pub error: Option<String>,
}

/// Probe failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProbeError {
    /// The server answered with a structured fault
    #[error("{message}")]
    Api { message: String },

    /// The request never completed
    #[error("transport error: {0}")]
    Transport(String),
}

impl ProbeError {
    /// Message suitable for direct display
    pub fn user_message(&self) -> String {
        match self {
            ProbeError::Api { message } => message.clone(),
            ProbeError::Transport(_) => FALLBACK_ERROR.to_string(),
        }
    }
}

/// Transport that answers availability questions
#[trait_variant::make(AvailabilityProbe: Send)]
pub trait LocalAvailabilityProbe {
    async fn check(&self, username: &str) -> Result<CheckVerdict, ProbeError>;
}

/// Debounced availability checker
///
/// Holds a single timer slot; scheduling a new check aborts whatever
/// occupied the slot before.
pub struct UsernameChecker<P> {
    probe: Arc<P>,
    state: Arc<Mutex<CheckState>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl<P> UsernameChecker<P>
where
    P: AvailabilityProbe + Send + Sync + 'static,
{
    pub fn new(probe: Arc<P>) -> Self {
        Self::with_debounce(probe, DEBOUNCE_DELAY)
    }

    pub fn with_debounce(probe: Arc<P>, debounce: Duration) -> Self {
        Self {
            probe,
            state: Arc::new(Mutex::new(CheckState::default())),
            timer: Mutex::new(None),
            debounce,
        }
    }

    /// Snapshot the current state
    pub fn snapshot(&self) -> CheckState {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// React to an input change.
    ///
    /// Cancels any pending probe, then either resets (blank input),
    /// answers locally (too short), or schedules a debounced probe.
    pub fn check_username(&self, input: &str) {
        self.cancel_pending();

        if input.trim().is_empty() {
            let mut state = self.state.lock().expect("state lock poisoned");
            *state = CheckState::default();
            return;
        }

        // Length gate runs on the raw input, before any server-side
        // normalization
        if input.chars().count() < LOCAL_MIN_LENGTH {
            let mut state = self.state.lock().expect("state lock poisoned");
            state.is_checking = false;
            state.error = None;
            state.result = Some(CheckVerdict {
                available: false,
                message: "Username must be at least 3 characters".to_string(),
            });
            return;
        }

        {
            let mut state = self.state.lock().expect("state lock poisoned");
            state.is_checking = true;
            state.error = None;
        }

        let probe = Arc::clone(&self.probe);
        let state = Arc::clone(&self.state);
        let username = input.to_string();
        let delay = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let outcome = probe.check(&username).await;

            let mut state = state.lock().expect("state lock poisoned");
            match outcome {
                Ok(verdict) => {
                    state.result = Some(verdict);
                    state.error = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Username availability probe failed");
                    state.result = None;
                    state.error = Some(e.user_message());
                }
            }
            state.is_checking = false;
        });

        let mut slot = self.timer.lock().expect("timer lock poisoned");
        *slot = Some(handle);
    }

    /// Reset the state and cancel any pending probe
    pub fn clear_check(&self) {
        self.cancel_pending();
        let mut state = self.state.lock().expect("state lock poisoned");
        *state = CheckState::default();
    }

    fn cancel_pending(&self) {
        let mut slot = self.timer.lock().expect("timer lock poisoned");
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
