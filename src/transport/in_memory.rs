use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::Frame;
use crate::transport::Transport;

/// Pair of connected in-process endpoints, used by tests and the simulator.
pub struct InMemoryTransport {
    tx: UnboundedSender<Frame>,
    rx: UnboundedReceiver<Frame>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (Self { tx: tx1, rx: rx2 }, Self { tx: tx2, rx: rx1 })
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        self.tx
            .send(frame)
            .map_err(|_| anyhow::anyhow!("Connection closed by peer"))
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Connection closed by peer"))
    }
}
