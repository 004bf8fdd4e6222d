//! Optimistic address updates with explicit rollback.
//!
//! An address edit is shown immediately and reverted if the backend rejects
//! it. The three observable phases (pending, applied, rolled back) are
//! modelled explicitly so the caller renders each one instead of juggling
//! ad-hoc flags.

use crate::types::AddressInput;

/// Where an optimistic update currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePhase {
    /// No update in flight.
    #[default]
    Idle,
    /// New value applied locally, request in flight.
    Pending,
    /// Backend accepted the update.
    Applied,
    /// Backend rejected the update; the previous value was restored.
    RolledBack,
}

/// An address value that can be updated optimistically.
#[derive(Debug, Clone, Default)]
pub struct OptimisticAddress {
    current: Option<AddressInput>,
    previous: Option<Option<AddressInput>>,
    phase: UpdatePhase,
}

impl OptimisticAddress {
    /// Start from the address currently on the order, if any.
    #[must_use]
    pub const fn with_current(address: Option<AddressInput>) -> Self {
        Self {
            current: address,
            previous: None,
            phase: UpdatePhase::Idle,
        }
    }

    /// The value to display right now.
    #[must_use]
    pub const fn current(&self) -> Option<&AddressInput> {
        self.current.as_ref()
    }

    /// The current update phase.
    #[must_use]
    pub const fn phase(&self) -> UpdatePhase {
        self.phase
    }

    /// Apply a new value locally and remember the old one for rollback.
    pub fn begin(&mut self, new: AddressInput) {
        self.previous = Some(self.current.take());
        self.current = Some(new);
        self.phase = UpdatePhase::Pending;
    }

    /// The backend accepted the update; discard the saved value.
    pub fn commit(&mut self) {
        self.previous = None;
        self.phase = UpdatePhase::Applied;
    }

    /// The backend rejected the update; restore the saved value.
    pub fn roll_back(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.current = previous;
        }
        self.phase = UpdatePhase::RolledBack;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(city: &str) -> AddressInput {
        AddressInput {
            city: city.to_string(),
            ..AddressInput::default()
        }
    }

    #[test]
    fn test_begin_applies_immediately() {
        let mut state = OptimisticAddress::with_current(Some(address("Dhaka")));
        state.begin(address("Chattogram"));

        assert_eq!(state.phase(), UpdatePhase::Pending);
        assert_eq!(state.current().map(|a| a.city.as_str()), Some("Chattogram"));
    }

    #[test]
    fn test_commit_keeps_new_value() {
        let mut state = OptimisticAddress::with_current(Some(address("Dhaka")));
        state.begin(address("Chattogram"));
        state.commit();

        assert_eq!(state.phase(), UpdatePhase::Applied);
        assert_eq!(state.current().map(|a| a.city.as_str()), Some("Chattogram"));
    }

    #[test]
    fn test_roll_back_restores_previous_value() {
        let mut state = OptimisticAddress::with_current(Some(address("Dhaka")));
        state.begin(address("Chattogram"));
        state.roll_back();

        assert_eq!(state.phase(), UpdatePhase::RolledBack);
        assert_eq!(state.current().map(|a| a.city.as_str()), Some("Dhaka"));
    }

    #[test]
    fn test_roll_back_to_no_address() {
        let mut state = OptimisticAddress::default();
        state.begin(address("Chattogram"));
        state.roll_back();

        assert!(state.current().is_none());
    }
}
