//! Step observer trait for monitoring world stepping.

/// Hooks called by [`World::step`](crate::world::World::step).
///
/// All methods default to no-ops.
pub trait StepObserver {
    /// Called after all bodies have been integrated for a sub-step.
    fn on_integrate(&mut self, _awake: usize) {}

    /// Called after each relaxation pass with the number of contacts resolved.
    fn on_contacts(&mut self, _iteration: usize, _contacts: usize) {}

    /// Called when a body falls asleep.
    fn on_sleep(&mut self) {}

    /// Called when a full step is complete.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores everything.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Running counters, used for debug reporting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepStats {
    pub steps: u64,
    pub sub_steps: u64,
    pub contacts: u64,
    pub sleeps: u64,
    /// Awake bodies seen in the last sub-step.
    pub last_awake: usize,
}

impl StepObserver for StepStats {
    fn on_integrate(&mut self, awake: usize) {
        self.sub_steps += 1;
        self.last_awake = awake;
    }

    fn on_contacts(&mut self, _iteration: usize, contacts: usize) {
        self.contacts += contacts as u64;
    }

    fn on_sleep(&mut self) {
        self.sleeps += 1;
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
