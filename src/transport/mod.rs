use crate::protocol::Frame;

/// Bidirectional carrier of fixed-size frames.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()>;
    /// Receive the next frame. Fails once the peer has gone away.
    async fn recv(&mut self) -> anyhow::Result<Frame>;
}

pub mod tcp;
pub mod in_memory;
