use solo_battleship::{
    ClientExit, Frame, GameClient, Server, SessionConfig, TcpTransport, Transport, Verdict,
};
use tokio::time::{timeout, Duration};

/// Every cell of a `size` board, row by row, one per line.
fn sweep(size: usize) -> String {
    let mut lines = String::new();
    for y in 1..=size {
        for x in 0..size {
            lines.push_str(&format!("{}{}\n", (b'a' + x as u8) as char, y));
        }
    }
    lines
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_sweeps_board_and_wins() -> anyhow::Result<()> {
    let config = SessionConfig::new(6, 4, 36)?;
    let server = Server::bind("127.0.0.1:0", config).await?.with_seed(7);
    let addr = server.local_addr()?;
    tokio::spawn(server.run());

    let transport = TcpTransport::connect(addr).await?;
    let input = sweep(6);
    let mut out = Vec::new();
    let exit = timeout(
        Duration::from_secs(10),
        GameClient::new(transport, "sweeper").run(input.as_bytes(), &mut out),
    )
    .await??;

    assert_eq!(exit, ClientExit::Finished(Verdict::Win));
    let screen = String::from_utf8(out)?;
    assert!(screen.contains("| Ships left: 0"));
    assert!(screen.contains("You win!"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_runs_out_of_moves() -> anyhow::Result<()> {
    let config = SessionConfig::new(6, 4, 1)?;
    let server = Server::bind("127.0.0.1:0", config).await?.with_seed(1);
    let addr = server.local_addr()?;
    tokio::spawn(server.run());

    let transport = TcpTransport::connect(addr).await?;
    let mut out = Vec::new();
    let exit = timeout(
        Duration::from_secs(10),
        GameClient::new(transport, "unlucky").run(sweep(6).as_bytes(), &mut out),
    )
    .await??;

    // Four ships never fit in a single shot.
    assert_eq!(exit, ClientExit::Finished(Verdict::Lose));
    assert!(String::from_utf8(out)?.contains("You lose!"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sessions_are_independent() -> anyhow::Result<()> {
    let config = SessionConfig::new(5, 2, 25)?;
    let server = Server::bind("127.0.0.1:0", config).await?;
    let addr = server.local_addr()?;
    tokio::spawn(server.run());

    let mut first = TcpTransport::connect(addr).await?;
    let mut second = TcpTransport::connect(addr).await?;
    first.send(Frame::encode("one")).await?;
    second.send(Frame::encode("two")).await?;
    assert_eq!(first.recv().await?.text(), "f=5,n=2");
    assert_eq!(second.recv().await?.text(), "f=5,n=2");

    // A shot in one session never shows up in the other.
    first.send(Frame::encode("A1")).await?;
    let reply = first.recv().await?.text().into_owned();
    assert!(reply == "Hit" || reply == "Miss");
    second.send(Frame::encode("A1")).await?;
    let reply = second.recv().await?.text().into_owned();
    assert!(reply == "Hit" || reply == "Miss");
    Ok(())
}
