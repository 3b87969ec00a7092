//! Cooperative cancellation for the exponential searches.
//!
//! Subgroup enumeration and isomorphism backtracking are worst-case
//! exponential in the group order. Both check a `CancelToken` at their
//! natural suspension points (top of each enumeration layer, top of each
//! backtracking branch) and bail out with `GroupError::Cancelled` when it
//! trips. A token combines an optional shared stop flag with an optional
//! deadline; either is enough to cancel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
pub struct CancelToken {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that never cancels. Used by the convenience accessors.
    pub fn none() -> Self {
        CancelToken::default()
    }

    /// Cancel once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        CancelToken {
            flag: None,
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Cancel when `flag` becomes true. The flag is shared; any holder may
    /// trip it from another thread.
    pub fn with_flag(flag: Arc<AtomicBool>) -> Self {
        CancelToken {
            flag: Some(flag),
            deadline: None,
        }
    }

    /// Attach a deadline to an existing token.
    pub fn and_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        if let Some(flag) = &self.flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        false
    }
}
