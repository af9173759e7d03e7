//! Detached units of asynchronous work.

use std::future::Future;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Errors from scheduling or joining detached work.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No tokio runtime is available to run a detached dispatch")]
    NoRuntime,

    #[error("Detached dispatch was cancelled")]
    Cancelled,

    #[error("Detached dispatch panicked")]
    Panicked,
}

/// Handle to a detached reducer invocation.
///
/// Dropping the handle does not stop the work. [`cancel`](Self::cancel) is
/// cooperative: the body stops at its next suspension point, and whatever it
/// already applied to state stays applied.
#[derive(Debug)]
pub struct TaskHandle {
    inner: JoinHandle<()>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.inner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Wait for the work to end. The reducer's own result was already
    /// discarded; this only reports how the task ended.
    pub async fn join(self) -> Result<(), DispatchError> {
        self.inner.await.map_err(|err| {
            if err.is_cancelled() {
                DispatchError::Cancelled
            } else {
                DispatchError::Panicked
            }
        })
    }
}

/// Spawn `future` on the ambient tokio runtime.
pub(crate) fn spawn_detached<F>(future: F) -> Result<TaskHandle, DispatchError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let Ok(runtime) = Handle::try_current() else {
        tracing::warn!("Detached dispatch requested outside a tokio runtime");
        return Err(DispatchError::NoRuntime);
    };
    Ok(TaskHandle {
        inner: runtime.spawn(future),
    })
}
