//! Per-operation dispatch overrides for tests.
//!
//! Each [`ApiClient`](super::ApiClient) owns one [`MockRegistry`]. While an
//! operation has a mock installed, dispatching it performs no network I/O
//! and returns whatever the mock returns.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::endpoint::Endpoint;
use crate::error::{ApiError, ConfigError};
use crate::operation_id::OperationId;
use crate::options::MethodOptions;
use crate::params::ApiRequest;
use crate::response::{ApiReply, ResponseFormat};

/// Signature of an installed mock for a request type and payload type.
pub type MockFn<Req, Out> =
    dyn Fn(&Req, &MethodOptions) -> Result<ApiReply<Out>, ApiError> + Send + Sync;

/// Table of installed mocks, keyed by operation.
///
/// Reads (every dispatch) share the lock; install and remove take it
/// exclusively.
#[derive(Default)]
pub struct MockRegistry {
    mocks: RwLock<HashMap<OperationId, Arc<dyn Any + Send + Sync>>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `mock` for the endpoint's operation, replacing any earlier one.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// client.mocks().install(&endpoints::CONVERT_DOCX_BLOCK, |req: &ConvertDocxBlockReq, _| {
    ///     Ok(ApiReply::detached(ConvertDocxBlockResp::default()))
    /// });
    /// ```
    pub fn install<Req, F, M>(&self, endpoint: &Endpoint<F>, mock: M)
    where
        Req: ApiRequest + 'static,
        F: ResponseFormat,
        M: Fn(&Req, &MethodOptions) -> Result<ApiReply<F::Output>, ApiError> + Send + Sync + 'static,
    {
        let handler: Arc<MockFn<Req, F::Output>> = Arc::new(mock);
        self.write()
            .insert(endpoint.operation().clone(), Arc::new(handler));
    }

    /// Removes the mock for the endpoint's operation.
    ///
    /// Returns `true` if one was installed.
    pub fn remove<F: ResponseFormat>(&self, endpoint: &Endpoint<F>) -> bool {
        self.write().remove(endpoint.operation()).is_some()
    }

    pub fn is_mocked(&self, operation: &OperationId) -> bool {
        self.read().contains_key(operation)
    }

    /// Removes every mock.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns the mock for `operation`, if any.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::MockTypeMismatch`] if the installed mock was written
    /// for a different request or payload type.
    pub(crate) fn lookup<Req, Out>(
        &self,
        operation: &OperationId,
    ) -> Result<Option<Arc<MockFn<Req, Out>>>, ConfigError>
    where
        Req: 'static,
        Out: 'static,
    {
        let mocks = self.read();
        let Some(entry) = mocks.get(operation) else {
            return Ok(None);
        };

        entry
            .downcast_ref::<Arc<MockFn<Req, Out>>>()
            .cloned()
            .map(Some)
            .ok_or_else(|| ConfigError::MockTypeMismatch {
                operation: operation.to_string(),
            })
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<OperationId, Arc<dyn Any + Send + Sync>>> {
        self.mocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<OperationId, Arc<dyn Any + Send + Sync>>> {
        self.mocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mocked: Vec<String> = self.read().keys().map(ToString::to_string).collect();
        mocked.sort();
        f.debug_struct("MockRegistry").field("mocked", &mocked).finish()
    }
}
