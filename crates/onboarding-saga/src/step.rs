/// A step in a saga that can be executed and compensated.
///
/// All steps of a saga share one `Data` type: each step receives the value
/// produced by the previous step and returns the value for the next one.
///
/// # Type Parameters
///
/// - `Data`: Value threaded through the saga
/// - `Context`: Shared dependencies (injected, not passed between steps)
/// - `Error`: The error type for step failures
pub trait SagaStep: Send + Sync {
    /// Value threaded through the saga.
    type Data: Clone + Send + 'static;

    /// Shared context providing dependencies.
    type Context;

    /// Error type for step failures.
    type Error;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Whether the step has work to do for `data`.
    ///
    /// Skipped steps pass their input through unchanged and are never
    /// compensated.
    fn should_execute(&self, ctx: &Self::Context, data: &Self::Data) -> bool {
        let _ = (ctx, data);
        true
    }

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails to complete.
    fn execute(&self, ctx: &Self::Context, data: Self::Data) -> Result<Self::Data, Self::Error>;

    /// Compensate (undo) the step's effects.
    ///
    /// Called during rollback when a later step fails. Receives the value
    /// this step returned from `execute()`.
    ///
    /// The default implementation is a no-op, suitable for steps without
    /// side effects.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails.
    fn compensate(&self, ctx: &Self::Context, data: Self::Data) -> Result<(), Self::Error> {
        let _ = (ctx, data);
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.name())
    }
}
