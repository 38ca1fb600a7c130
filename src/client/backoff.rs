//! Client-side error tracking and request blocking
//!
//! Authoritative upstream failures (rate limit, auth, permission) block all
//! outgoing requests for [`BLOCK_DURATION_MS`]. Any other failure counts
//! towards [`MAX_CONSECUTIVE_ERRORS`]; reaching it blocks as well. Expiry is
//! checked lazily on the next [`BackoffManager::can_make_request`] call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use log::{debug, error};
use tokio::sync::broadcast;

use super::clock::{Clock, to_datetime};
use crate::error::ApiError;

/// Consecutive unclassified failures before requests are blocked.
pub const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// How long a block lasts.
pub const BLOCK_DURATION_MS: i64 = 60_000;

/// Quiet period after which the consecutive-error count is forgotten.
pub const ERROR_RESET_TIME_MS: i64 = 300_000;

const EVENT_CAPACITY: usize = 16;

/// Classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    AuthParameterMissing,
    InvalidCredentials,
    Forbidden,
    MethodNotAllowed,
    Timeout,
    Network,
    Other,
    /// Raised locally while blocked; never fed back into the manager.
    Blocked,
}

impl FailureKind {
    /// Hard failures block immediately instead of counting.
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            FailureKind::RateLimited
                | FailureKind::AuthParameterMissing
                | FailureKind::InvalidCredentials
                | FailureKind::Forbidden
                | FailureKind::MethodNotAllowed
        )
    }
}

/// Emitted every time the manager enters the blocked state.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEvent {
    pub reason: String,
    pub blocked_until: DateTime<Utc>,
}

/// Read-only snapshot of the manager state for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInfo {
    pub is_blocked: bool,
    pub reason: Option<String>,
    pub unblock_at: Option<DateTime<Utc>>,
    pub consecutive_errors: u32,
}

#[derive(Debug, Default)]
struct BackoffState {
    is_blocked: bool,
    block_until: i64,
    consecutive_errors: u32,
    last_error_time: i64,
    reason: Option<String>,
}

/// Tracks upstream failures and decides whether new requests may be sent.
///
/// One instance is shared by every client in the process.
pub struct BackoffManager {
    clock: Arc<dyn Clock>,
    state: Mutex<BackoffState>,
    events: broadcast::Sender<BlockEvent>,
}

impl BackoffManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            clock,
            state: Mutex::new(BackoffState::default()),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BackoffState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to block notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<BlockEvent> {
        self.events.subscribe()
    }

    /// Whether a request may be sent now. Clears an expired block.
    pub fn can_make_request(&self) -> bool {
        let now = self.clock.now_millis();
        let mut state = self.lock();

        if state.is_blocked && now < state.block_until {
            return false;
        }

        if state.is_blocked {
            debug!("Request block expired, reopening");
            state.is_blocked = false;
            state.consecutive_errors = 0;
            state.reason = None;
        }

        if now - state.last_error_time > ERROR_RESET_TIME_MS {
            state.consecutive_errors = 0;
        }

        true
    }

    /// Record a successful upstream response.
    pub fn on_success(&self) {
        self.lock().consecutive_errors = 0;
    }

    /// Record a failed upstream call.
    pub fn on_failure(&self, err: &ApiError) {
        let kind = err.kind();
        if kind == FailureKind::Blocked {
            return;
        }

        let now = self.clock.now_millis();
        let event = {
            let mut state = self.lock();
            state.last_error_time = now;

            if kind.is_hard() {
                Some(Self::block(&mut state, now, err.to_string()))
            } else {
                state.consecutive_errors += 1;
                debug!(
                    "Upstream failure {}/{}: {}",
                    state.consecutive_errors, MAX_CONSECUTIVE_ERRORS, err
                );
                if state.consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    let reason = format!(
                        "Too many consecutive errors ({}). Temporarily blocking requests.",
                        state.consecutive_errors
                    );
                    Some(Self::block(&mut state, now, reason))
                } else {
                    None
                }
            }
        };

        if let Some(event) = event {
            error!(
                "[Marvel API] {} Blocked until: {}",
                event.reason,
                event.blocked_until.format("%H:%M:%S")
            );
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
    }

    fn block(state: &mut BackoffState, now: i64, reason: String) -> BlockEvent {
        state.is_blocked = true;
        state.block_until = now + BLOCK_DURATION_MS;
        state.reason = Some(reason.clone());
        BlockEvent {
            reason,
            blocked_until: to_datetime(state.block_until),
        }
    }

    /// Snapshot of the current state. Does not clear expired blocks.
    pub fn block_info(&self) -> BlockInfo {
        let state = self.lock();
        if !state.is_blocked {
            return BlockInfo {
                is_blocked: false,
                reason: None,
                unblock_at: None,
                consecutive_errors: state.consecutive_errors,
            };
        }

        BlockInfo {
            is_blocked: true,
            reason: state.reason.clone(),
            unblock_at: Some(to_datetime(state.block_until)),
            consecutive_errors: state.consecutive_errors,
        }
    }

    /// Error returned to callers while requests are blocked.
    pub fn blocked_error(&self) -> ApiError {
        let state = self.lock();
        ApiError::UpstreamTemporarilyBlocked {
            reason: state
                .reason
                .clone()
                .unwrap_or_else(|| "API temporarily blocked due to errors".to_string()),
            until: to_datetime(state.block_until),
        }
    }
}
