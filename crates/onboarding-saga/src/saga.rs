use std::fmt::Debug;

use crate::audit::SagaAuditLog;
use crate::error::{CompensationError, SagaError};
use crate::step::SagaStep;

pub(crate) type BoxedStep<Data, Ctx, Err> =
    Box<dyn SagaStep<Data = Data, Context = Ctx, Error = Err>>;

struct CompletedStep<Data> {
    step_index: usize,
    record_index: usize,
    output: Data,
}

/// A compiled saga ready for execution.
///
/// Steps run in order. If any step fails, previously completed steps are
/// compensated in reverse order (LIFO); skipped steps are left alone.
pub struct Saga<Data, Ctx, Err> {
    steps: Vec<BoxedStep<Data, Ctx, Err>>,
}

impl<Data, Ctx, Err> Saga<Data, Ctx, Err>
where
    Data: Clone + Send + 'static,
    Err: Debug,
{
    pub(crate) fn from_steps(steps: Vec<BoxedStep<Data, Ctx, Err>>) -> Self {
        Self { steps }
    }

    /// Names of the saga's steps in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Execute the saga, returning the final data on success.
    ///
    /// # Errors
    ///
    /// Returns `SagaError::StepFailed` if a step fails and all compensations succeed.
    /// Returns `SagaError::CompensationFailed` if a step fails and some compensations also fail.
    pub fn execute(&self, ctx: &Ctx, input: Data) -> Result<Data, SagaError<Err>> {
        let (result, _audit_log) = self.execute_internal(ctx, input);
        result
    }

    /// Execute the saga and return both the result and an audit log.
    pub fn execute_with_audit(
        &self,
        ctx: &Ctx,
        input: Data,
    ) -> (Result<Data, SagaError<Err>>, SagaAuditLog) {
        self.execute_internal(ctx, input)
    }

    fn execute_internal(
        &self,
        ctx: &Ctx,
        input: Data,
    ) -> (Result<Data, SagaError<Err>>, SagaAuditLog) {
        let mut audit_log = SagaAuditLog::new();
        let mut completed: Vec<CompletedStep<Data>> = Vec::new();
        let mut current = input;

        for (step_index, step) in self.steps.iter().enumerate() {
            if !step.should_execute(ctx, &current) {
                audit_log.record_skipped(step.name());
                continue;
            }

            let record_index = audit_log.record_start(step.name());

            match step.execute(ctx, current) {
                Ok(output) => {
                    audit_log.record_success(record_index, step.compensation_description());
                    completed.push(CompletedStep {
                        step_index,
                        record_index,
                        output: output.clone(),
                    });
                    current = output;
                }
                Err(error) => {
                    audit_log.record_failure(record_index);
                    let saga_error =
                        self.compensate(ctx, &mut audit_log, completed, step.name(), error);
                    return (Err(saga_error), audit_log);
                }
            }
        }

        (Ok(current), audit_log)
    }

    fn compensate(
        &self,
        ctx: &Ctx,
        audit_log: &mut SagaAuditLog,
        mut completed: Vec<CompletedStep<Data>>,
        failed_step: &str,
        step_error: Err,
    ) -> SagaError<Err> {
        let mut compensation_errors = Vec::new();

        while let Some(done) = completed.pop() {
            let step = &self.steps[done.step_index];

            match step.compensate(ctx, done.output) {
                Ok(()) => audit_log.record_compensated(done.record_index),
                Err(error) => {
                    audit_log.record_compensation_failed(done.record_index);
                    compensation_errors.push(CompensationError {
                        step: step.name().to_string(),
                        description: step.compensation_description(),
                        error,
                    });
                }
            }
        }

        if compensation_errors.is_empty() {
            SagaError::StepFailed {
                step: failed_step.to_string(),
                source: step_error,
            }
        } else {
            SagaError::CompensationFailed {
                failed_step: failed_step.to_string(),
                step_error,
                compensation_errors,
            }
        }
    }
}
