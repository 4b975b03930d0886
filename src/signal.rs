use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Funnels any number of unix signals into a single receiver.
pub struct SignalHandler {
    signal_recv: mpsc::Receiver<SignalKind>,
}

impl SignalHandler {
    pub fn with_signals(kinds: impl IntoIterator<Item = SignalKind>) -> Self {
        let (signal_send, signal_recv) = mpsc::channel(1);

        for kind in kinds {
            let mut stream = signal(kind).expect("failed to create signal stream");
            let send = signal_send.clone();
            tokio::spawn(async move {
                loop {
                    stream.recv().await;
                    if send.send(kind).await.is_err() {
                        break;
                    }
                }
            });
        }

        Self { signal_recv }
    }

    pub async fn recv(&mut self) -> SignalKind {
        self.signal_recv
            .recv()
            .await
            .expect("failed to receive signal")
    }
}
