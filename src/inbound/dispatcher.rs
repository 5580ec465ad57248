//! Background task feeding inbound events to the matcher in order.

use mockable::Clock;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::contact::ports::ContactStore;
use crate::inbound::{InboundMessageMatcher, InboundSms};
use crate::message::ports::MessageStore;

/// The dispatcher task has stopped and no longer accepts events.
#[derive(Debug, Error)]
#[error("inbound dispatcher has stopped")]
pub struct InboundClosed(pub InboundSms);

/// Handle for delivering events to a running dispatcher.
///
/// Cloning is cheap. The dispatcher stops once every sender is dropped and
/// the queue has drained.
#[derive(Debug, Clone)]
pub struct InboundSender {
    queue: mpsc::Sender<InboundSms>,
}

impl InboundSender {
    /// Queues an event, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`InboundClosed`] carrying the event back if the dispatcher has
    /// stopped.
    pub async fn send(&self, event: InboundSms) -> Result<(), InboundClosed> {
        self.queue
            .send(event)
            .await
            .map_err(|mpsc::error::SendError(rejected)| InboundClosed(rejected))
    }
}

/// Spawns the background task that runs the matcher.
#[derive(Debug, Clone, Copy)]
pub struct InboundDispatcher;

impl InboundDispatcher {
    /// Starts a dispatcher with room for `capacity` queued events.
    ///
    /// Events are processed one at a time in the order they were queued. A
    /// zero capacity is raised to one.
    #[must_use]
    pub fn spawn<C, M, K>(
        matcher: InboundMessageMatcher<C, M, K>,
        capacity: usize,
    ) -> (InboundSender, JoinHandle<()>)
    where
        C: ContactStore + 'static,
        M: MessageStore + 'static,
        K: Clock + Send + Sync + 'static,
    {
        let (queue, mut events) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                matcher.deliver(&event).await;
            }
            tracing::debug!("inbound dispatcher stopped");
        });
        (InboundSender { queue }, handle)
    }
}
