use std::marker::PhantomData;

use onboarding_core::DraftField;
use onboarding_saga::SagaStep;
use serde_json::json;
use tracing::debug;

use super::context::SubmissionContext;
use super::saga_data::SubmissionSagaData;
use crate::OperationError;
use crate::traits::{RemoteExecutor, RemoteOperation, redact_secrets, response_id};

fn call<R: RemoteExecutor>(
    ctx: &SubmissionContext<R>,
    operation: RemoteOperation,
    variables: &serde_json::Value,
) -> Result<String, OperationError> {
    debug!(
        operation = %operation,
        variables = %redact_secrets(variables),
        "issuing remote operation"
    );
    let data = ctx
        .executor()
        .execute(operation, variables)
        .map_err(|source| OperationError::Remote { operation, source })?;
    response_id(operation, &data).ok_or(OperationError::EmptyResponse { operation })
}

/// Creates the organization unless a previous attempt already did.
pub struct EnsureOrganizationStep<R> {
    _marker: PhantomData<R>,
}

impl<R> EnsureOrganizationStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for EnsureOrganizationStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SagaStep for EnsureOrganizationStep<R>
where
    R: RemoteExecutor + 'static,
{
    type Data = SubmissionSagaData;
    type Context = SubmissionContext<R>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "ensure_organization"
    }

    fn should_execute(&self, _ctx: &Self::Context, data: &Self::Data) -> bool {
        data.organization_id.is_none()
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        mut data: Self::Data,
    ) -> Result<Self::Data, Self::Error> {
        let variables = data.organization_variables();
        let id = call(ctx, RemoteOperation::CreateOrganization, &variables)?;
        debug!(organization_id = %id, "organization created");

        data.organization_id = Some(id);
        data.organization_created = true;
        Ok(data)
    }

    fn compensate(&self, ctx: &Self::Context, data: Self::Data) -> Result<(), Self::Error> {
        if !data.organization_created {
            return Ok(());
        }
        let Some(id) = data.organization_id else {
            return Ok(());
        };
        debug!(organization_id = %id, "deactivating organization");
        let variables = json!({ "id": id });
        ctx.executor()
            .execute(RemoteOperation::DeactivateOrganization, &variables)
            .map_err(|source| OperationError::DeactivationFailed {
                organization_id: id,
                source,
            })?;
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "deactivate the newly created organization".to_string()
    }
}

/// Subscribes the organization to the selected plan.
pub struct CreateSubscriptionStep<R> {
    _marker: PhantomData<R>,
}

impl<R> CreateSubscriptionStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for CreateSubscriptionStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SagaStep for CreateSubscriptionStep<R>
where
    R: RemoteExecutor + 'static,
{
    type Data = SubmissionSagaData;
    type Context = SubmissionContext<R>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "create_subscription"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        mut data: Self::Data,
    ) -> Result<Self::Data, Self::Error> {
        let organization_id = data
            .organization_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(OperationError::MissingPrecondition {
                field: "organizationId",
            })?;
        let plan_id = data.draft.get(DraftField::PlanId).trim().to_string();
        if plan_id.is_empty() {
            return Err(OperationError::MissingPrecondition { field: "planId" });
        }

        let variables = data.subscription_variables(&organization_id, &plan_id);
        let id = call(ctx, RemoteOperation::CreateSubscription, &variables)?;
        debug!(subscription_id = %id, plan = %plan_id, "subscription created");

        data.subscription_id = Some(id);
        Ok(data)
    }

    fn compensation_description(&self) -> String {
        "nothing to undo for the subscription".to_string()
    }
}
