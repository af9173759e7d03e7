//! Bridge from async streams to subjects.

use std::future::poll_fn;

use futures_core::Stream;

use super::PassthroughSubject;
use crate::task::{spawn_detached, DispatchError, TaskHandle};

/// Drive `stream` on the ambient tokio runtime, sending every item into
/// `subject`.
///
/// `Ok` items are sent as values. The first `Err` fails the subject and
/// stops polling; exhausting the stream finishes it. Subscribe to `subject`
/// before calling this, since the task may start emitting right away.
pub fn forward_stream<S, T, E>(
    stream: S,
    subject: &PassthroughSubject<T, E>,
) -> Result<TaskHandle, DispatchError>
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    let subject = subject.clone();
    spawn_detached(async move {
        let mut stream = std::pin::pin!(stream);
        while let Some(item) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
            match item {
                Ok(value) => subject.send(value),
                Err(error) => {
                    subject.fail(error);
                    return;
                }
            }
        }
        subject.finish();
    })
}
