use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::{
    game::SessionConfig,
    session_node::{SessionNode, SessionSummary},
    transport::tcp::TcpTransport,
};

/// Seed derived from the wall clock.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Accepts connections and hands each one to its own session task.
pub struct Server {
    listener: TcpListener,
    config: SessionConfig,
    seed: Option<u64>,
}

impl Server {
    pub async fn bind<A: ToSocketAddrs>(addr: A, config: SessionConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            config,
            seed: None,
        })
    }

    /// Fix the base seed; session `i` then uses `seed + i`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept forever. Only a failing `accept` ends the loop.
    pub async fn run(self) -> anyhow::Result<()> {
        log::info!("listening on {}", self.local_addr()?);
        let mut sessions: u64 = 0;
        loop {
            let (stream, addr) = self.listener.accept().await.map_err(|e| {
                log::error!("accept failed: {}", e);
                anyhow::anyhow!("accept failed: {}", e)
            })?;
            log::info!("connection from {}", addr);

            let seed = match self.seed {
                Some(base) => base.wrapping_add(sessions),
                None => clock_seed(),
            };
            sessions += 1;
            tokio::spawn(serve_connection(
                TcpTransport::new(stream),
                addr,
                self.config,
                seed,
            ));
        }
    }
}

async fn serve_connection(
    transport: TcpTransport,
    addr: SocketAddr,
    config: SessionConfig,
    seed: u64,
) -> Option<SessionSummary> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let node = SessionNode::new(config, Box::new(transport));
    match node.run(&mut rng).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::warn!("session with {} ended early: {}", addr, e);
            None
        }
    }
}
