use std::sync::Arc;

use crate::traits::RemoteExecutor;

pub struct SubmissionContext<R> {
    executor: Arc<R>,
}

impl<R> Clone for SubmissionContext<R> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<R: RemoteExecutor> SubmissionContext<R> {
    #[must_use]
    pub fn new(executor: Arc<R>) -> Self {
        Self { executor }
    }

    #[must_use]
    pub fn executor(&self) -> &R {
        &self.executor
    }
}
