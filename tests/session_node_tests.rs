use rand::rngs::SmallRng;
use rand::SeedableRng;
use solo_battleship::{
    Board, Frame, InMemoryTransport, SessionConfig, SessionNode, SessionState, Transport,
};

async fn exchange(client: &mut InMemoryTransport, token: &str) -> String {
    client.send(Frame::encode(token)).await.unwrap();
    client.recv().await.unwrap().text().into_owned()
}

#[tokio::test]
async fn test_single_hit_wins() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(5, 1, 10)?;
    let mut board = Board::new(5);
    board.place(2, 2)?;
    let server = tokio::spawn(SessionNode::new(config, Box::new(server_side)).run_with_board(board));

    client.send(Frame::encode("alice")).await?;
    assert_eq!(client.recv().await?.text(), "f=5,n=1");
    assert_eq!(exchange(&mut client, "C3").await, "Hit");
    assert_eq!(client.recv().await?.text(), "You win");
    // The server hangs up after the verdict.
    assert!(client.recv().await.is_err());

    let summary = server.await??;
    assert_eq!(summary.player, "alice");
    assert_eq!(summary.state, SessionState::Won);
    assert_eq!(summary.moves, 1);
    assert_eq!(summary.ships_left, 0);
    Ok(())
}

#[tokio::test]
async fn test_budget_runs_out() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(5, 1, 1)?;
    let mut board = Board::new(5);
    board.place(0, 0)?;
    let server = tokio::spawn(SessionNode::new(config, Box::new(server_side)).run_with_board(board));

    client.send(Frame::encode("bob")).await?;
    assert_eq!(client.recv().await?.text(), "f=5,n=1");
    assert_eq!(exchange(&mut client, "99").await, "Invalid move");
    assert_eq!(exchange(&mut client, "F1").await, "Invalid move");
    assert_eq!(exchange(&mut client, "B5").await, "Miss");
    assert_eq!(client.recv().await?.text(), "You lose");

    let summary = server.await??;
    assert_eq!(summary.state, SessionState::Lost);
    assert_eq!(summary.moves, 1);
    assert_eq!(summary.ships_left, 1);
    Ok(())
}

#[tokio::test]
async fn test_every_move_gets_one_reply() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(4, 2, 3)?;
    let mut board = Board::new(4);
    board.place(0, 0)?;
    board.place(3, 3)?;
    let server = tokio::spawn(SessionNode::new(config, Box::new(server_side)).run_with_board(board));

    client.send(Frame::encode("carol")).await?;
    assert_eq!(client.recv().await?.text(), "f=4,n=2");
    assert_eq!(exchange(&mut client, "A1").await, "Hit");
    assert_eq!(exchange(&mut client, "A1").await, "Already hit");
    assert_eq!(exchange(&mut client, "B1").await, "Miss");
    assert_eq!(exchange(&mut client, "B1").await, "Already missed");
    assert_eq!(exchange(&mut client, "a1").await, "Invalid move");
    assert_eq!(exchange(&mut client, "D4").await, "Hit");
    assert_eq!(client.recv().await?.text(), "You win");

    let summary = server.await??;
    assert_eq!(summary.state, SessionState::Won);
    assert_eq!(summary.moves, 3);
    Ok(())
}

#[tokio::test]
async fn test_zero_budget_sends_verdict_after_metadata() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(6, 3, 0)?;
    let node = SessionNode::new(config, Box::new(server_side));
    let server = tokio::spawn(async move {
        let mut rng = SmallRng::seed_from_u64(11);
        node.run(&mut rng).await
    });

    client.send(Frame::encode("dave")).await?;
    assert_eq!(client.recv().await?.text(), "f=6,n=3");
    assert_eq!(client.recv().await?.text(), "You lose");

    let summary = server.await??;
    assert_eq!(summary.state, SessionState::Lost);
    assert_eq!(summary.moves, 0);
    assert_eq!(summary.ships_left, 3);
    Ok(())
}

#[tokio::test]
async fn test_random_layout_can_be_cleared() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(4, 2, 16)?;
    let node = SessionNode::new(config, Box::new(server_side));
    let server = tokio::spawn(async move {
        let mut rng = SmallRng::seed_from_u64(3);
        node.run(&mut rng).await
    });

    client.send(Frame::encode("erin")).await?;
    assert_eq!(client.recv().await?.text(), "f=4,n=2");
    let mut hits = 0;
    'outer: for y in 1..=4 {
        for x in ['A', 'B', 'C', 'D'] {
            let reply = exchange(&mut client, &format!("{}{}", x, y)).await;
            if reply == "Hit" {
                hits += 1;
                if hits == 2 {
                    break 'outer;
                }
            }
        }
    }
    assert_eq!(client.recv().await?.text(), "You win");
    let summary = server.await??;
    assert_eq!(summary.state, SessionState::Won);
    Ok(())
}

#[tokio::test]
async fn test_disconnect_mid_session_is_an_error() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(5, 1, 10)?;
    let mut board = Board::new(5);
    board.place(4, 4)?;
    let server = tokio::spawn(SessionNode::new(config, Box::new(server_side)).run_with_board(board));

    client.send(Frame::encode("frank")).await?;
    client.recv().await?;
    assert_eq!(exchange(&mut client, "A1").await, "Miss");
    drop(client);

    assert!(server.await?.is_err());
    Ok(())
}

#[tokio::test]
async fn test_disconnect_before_greeting_is_an_error() {
    let (server_side, client) = InMemoryTransport::pair();
    let config = SessionConfig::new(5, 1, 10).unwrap();
    drop(client);
    let mut rng = SmallRng::seed_from_u64(0);
    let result = SessionNode::new(config, Box::new(server_side)).run(&mut rng).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_densest_config_still_hosts_a_game() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(20, 100, 400)?;
    let mut rng = SmallRng::seed_from_u64(5);
    let server = tokio::spawn(async move {
        SessionNode::new(config, Box::new(server_side))
            .run(&mut rng)
            .await
    });

    client.send(Frame::encode("alice")).await?;
    assert_eq!(client.recv().await?.text(), "f=20,n=100");
    drop(client);
    // The session ends on the closed connection, not on placement.
    let err = server.await?.unwrap_err();
    assert!(err.to_string().contains("closed"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_metadata_describes_prepared_board() -> anyhow::Result<()> {
    let (server_side, mut client) = InMemoryTransport::pair();
    let config = SessionConfig::new(5, 1, 10)?;
    let mut board = Board::new(4);
    board.place(0, 0)?;
    board.place(3, 3)?;
    let server = tokio::spawn(SessionNode::new(config, Box::new(server_side)).run_with_board(board));

    client.send(Frame::encode("carol")).await?;
    assert_eq!(client.recv().await?.text(), "f=4,n=2");
    assert_eq!(exchange(&mut client, "E1").await, "Invalid move");
    assert_eq!(exchange(&mut client, "A1").await, "Hit");
    assert_eq!(exchange(&mut client, "D4").await, "Hit");
    assert_eq!(client.recv().await?.text(), "You win");

    let summary = server.await??;
    assert_eq!(summary.state, SessionState::Won);
    assert_eq!(summary.moves, 2);
    Ok(())
}
