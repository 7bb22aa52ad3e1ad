//! Step observer trait for monitoring simulation progress.

/// Trait for observing the phases of a model step.
///
/// Each callback fires after the matching phase has finished for every
/// spring or particle, so an observer always sees a consistent state. All
/// methods have default no-op implementations.
pub trait StepObserver {
    /// Called once every spring has pushed its forces into velocities.
    fn on_spring_forces(&mut self) {}

    /// Called after gravity, drag and the model's external hook.
    fn on_external_forces(&mut self) {}

    /// Called after every particle has moved by its velocity.
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
