use std::io::ErrorKind;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::protocol::{Frame, FRAME_SIZE};
use crate::transport::Transport;

/// Frames over a TCP stream.
///
/// Partially read frames are kept in an internal buffer, so a `recv` future
/// may be dropped (e.g. inside `tokio::select!`) without losing bytes.
pub struct TcpTransport {
    stream: TcpStream,
    buf: [u8; FRAME_SIZE],
    filled: usize,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            buf: [0; FRAME_SIZE],
            filled: 0,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub fn peer_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::UnexpectedEof => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        self.stream.write_all(frame.as_bytes()).await.map_err(io_error)?;
        self.stream.flush().await.map_err(io_error)
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        while self.filled < FRAME_SIZE {
            let n = self
                .stream
                .read(&mut self.buf[self.filled..])
                .await
                .map_err(io_error)?;
            if n == 0 {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            self.filled += n;
        }
        self.filled = 0;
        Ok(Frame::from_bytes(self.buf))
    }
}
