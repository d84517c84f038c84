//! Delegation state for the off-main-thread step path.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegationState {
    Uninitialized,
    Delegated,
    LocalFallback,
}

/// Tracks whether agent stepping is delegated to the worker.
///
/// `LocalFallback` is terminal: once any failure is observed the worker is
/// never consulted again, even if it is still alive.
#[derive(Debug)]
pub struct DelegationLink {
    state: DelegationState,
}

impl DelegationLink {
    pub fn new() -> Self {
        Self {
            state: DelegationState::Uninitialized,
        }
    }

    pub fn state(&self) -> DelegationState {
        self.state
    }

    pub fn is_delegated(&self) -> bool {
        self.state == DelegationState::Delegated
    }

    /// Worker came up. Only honored before any failure.
    pub fn mark_delegated(&mut self) -> bool {
        if self.state == DelegationState::Uninitialized {
            self.state = DelegationState::Delegated;
            true
        } else {
            false
        }
    }

    /// Permanent switch to local stepping; later failures are ignored.
    pub fn mark_failed(&mut self, reason: &str) {
        if self.state != DelegationState::LocalFallback {
            log::warn!("[field] worker path abandoned ({reason}); stepping locally from here on");
            self.state = DelegationState::LocalFallback;
        }
    }
}

impl Default for DelegationLink {
    fn default() -> Self {
        Self::new()
    }
}
