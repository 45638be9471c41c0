use tracing::trace;

use crate::prelude::*;

impl Machine {
    /// Returns a copy of `self` that only retains the states which are reachable from the
    /// initial state. Alphabets, initial state and transition function are unchanged.
    pub fn trim(&self) -> Result<Machine, MachineError> {
        let reachable = self.reachable_states()?;
        trace!(
            "trimming removes {} of {} states",
            self.size().saturating_sub(reachable.len()),
            self.size()
        );
        Ok(self.clone().with_states(reachable))
    }

    /// Removes all states that are not reachable from the initial state.
    pub fn trim_in_place(&mut self) -> Result<(), MachineError> {
        *self = self.trim()?;
        Ok(())
    }
}

/// Restricts `machine` to its reachable part, see [`Machine::trim`].
pub fn trim(machine: &Machine) -> Result<Machine, MachineError> {
    machine.trim()
}
