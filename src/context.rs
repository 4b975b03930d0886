use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};

struct RawContext {
    _sender: oneshot::Sender<()>,
    cancel_receiver: broadcast::Receiver<()>,
}

/// A cancellation context handed to long-running tasks. `done()` resolves
/// once the matching [`Handler`] cancels, and the handler in turn can wait
/// for every clone of the context to be dropped.
#[derive(Clone)]
pub struct Context(Arc<RawContext>);

impl Context {
    pub fn new() -> (Self, Handler) {
        let (sender, recv) = oneshot::channel();
        let (cancel_sender, cancel_receiver) = broadcast::channel(1);

        (
            Self(Arc::new(RawContext {
                _sender: sender,
                cancel_receiver,
            })),
            Handler {
                recv,
                cancel_sender,
            },
        )
    }

    pub async fn done(&self) {
        let mut recv = self.0.cancel_receiver.resubscribe();
        // The sender side only ever drops, it never sends.
        let _ = recv.recv().await;
    }
}

pub struct Handler {
    recv: oneshot::Receiver<()>,
    cancel_sender: broadcast::Sender<()>,
}

impl Handler {
    /// Resolves once every clone of the context has been dropped.
    pub async fn done(&mut self) {
        let _ = (&mut self.recv).await;
    }

    /// Cancels the context and waits for every clone of it to be dropped.
    pub async fn cancel(self) {
        drop(self.cancel_sender);

        let _ = self.recv.await;
    }
}
