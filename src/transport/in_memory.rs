use tokio::sync::mpsc;

use crate::transport::Transport;

/// One end of an in-process line pipe. Dropping an end closes the stream
/// for the other.
pub struct InMemoryTransport {
    tx: Option<mpsc::UnboundedSender<String>>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        (
            Self {
                tx: Some(tx1),
                rx: rx2,
            },
            Self {
                tx: Some(tx2),
                rx: rx1,
            },
        )
    }

    /// Close the sending half, as a TCP write shutdown would. The peer reads
    /// end of stream once it has drained what was already sent.
    pub fn close(&mut self) {
        self.tx = None;
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        tx.send(line.to_string())
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.rx.recv().await)
    }
}
