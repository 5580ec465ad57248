//! Change notification and live query streams.
//!
//! Every table owns a [`ChangeNotifier`] holding a version counter. Writers
//! bump the counter after each successful write; readers turn a subscription
//! into a [`LiveQuery`] that re-runs its query whenever the counter moves.

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

/// A stream of full snapshots, re-emitted whenever the underlying table
/// changes.
///
/// The first poll yields the current snapshot. Changes that land while a
/// snapshot is being queried are coalesced into the next emission, so a
/// subscriber always converges on the latest state. The stream ends only when
/// the owning store is dropped.
pub type LiveQuery<T> = BoxStream<'static, T>;

/// Version counter broadcasting "table changed" signals to live queries.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: Arc<watch::Sender<u64>>,
}

impl ChangeNotifier {
    /// Creates a notifier at version zero.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Signals that the table changed.
    pub fn notify(&self) {
        self.sender
            .send_modify(|version| *version = version.wrapping_add(1));
    }

    /// Returns the current version.
    #[must_use]
    pub fn version(&self) -> u64 {
        *self.sender.borrow()
    }

    /// Subscribes to future change signals.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`LiveQuery`] that runs `query` once up front and again after
/// every change signal observed on `changes`.
pub fn live_query<T, F, Fut>(changes: watch::Receiver<u64>, query: F) -> LiveQuery<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    stream::unfold(
        (changes, query, true),
        |(mut changes, query, first)| async move {
            if first {
                changes.borrow_and_update();
            } else {
                changes.changed().await.ok()?;
            }
            let snapshot = query().await;
            Some((snapshot, (changes, query, false)))
        },
    )
    .boxed()
}
