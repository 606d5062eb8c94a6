use std::fmt::Debug;
use std::marker::PhantomData;

use crate::saga::{BoxedStep, Saga};
use crate::step::SagaStep;

/// Marker type for a builder with no steps.
pub struct Empty;

/// Marker type for a builder with at least one step.
pub struct HasSteps;

/// Type-state builder for sagas.
///
/// Every step must share the saga's data, context and error types, and a
/// saga without steps cannot be built:
///
/// ```compile_fail
/// use onboarding_saga::SagaBuilder;
///
/// // `build()` is only available after `first_step()`
/// let saga = SagaBuilder::<i32, (), ()>::new().build();
/// ```
pub struct SagaBuilder<Data, Ctx, Err, State = Empty> {
    steps: Vec<BoxedStep<Data, Ctx, Err>>,
    _state: PhantomData<State>,
}

impl<Data, Ctx, Err> SagaBuilder<Data, Ctx, Err, Empty> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Add the first step to the saga.
    #[must_use]
    pub fn first_step<S>(self, step: S) -> SagaBuilder<Data, Ctx, Err, HasSteps>
    where
        S: SagaStep<Data = Data, Context = Ctx, Error = Err> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(step));
        SagaBuilder {
            steps,
            _state: PhantomData,
        }
    }
}

impl<Data, Ctx, Err> Default for SagaBuilder<Data, Ctx, Err, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Data, Ctx, Err> SagaBuilder<Data, Ctx, Err, HasSteps> {
    /// Append another step; it runs after every step added before it.
    #[must_use]
    pub fn then<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Data = Data, Context = Ctx, Error = Err> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    #[must_use]
    pub fn build(self) -> Saga<Data, Ctx, Err>
    where
        Data: Clone + Send + 'static,
        Err: Debug,
    {
        Saga::from_steps(self.steps)
    }
}
