use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use solo_battleship::{
    Frame, InMemoryTransport, Move, ServerMessage, SessionConfig, SessionNode, Transport, Verdict,
};

/// Scripted player: fires at every cell once, in random order, until the
/// server announces a result. Returns the verdict and the shots answered.
async fn random_player(
    mut transport: InMemoryTransport,
    rng: &mut SmallRng,
) -> anyhow::Result<(Verdict, usize)> {
    transport.send(Frame::encode("sim-bot")).await?;
    let field_size = match ServerMessage::parse(&transport.recv().await?)? {
        ServerMessage::Metadata { field_size, .. } => field_size,
        ServerMessage::Final(verdict) => return Ok((verdict, 0)),
        other => anyhow::bail!("unexpected {:?}", other),
    };

    let mut targets: Vec<Move> = (0..field_size)
        .flat_map(|y| (0..field_size).map(move |x| Move { x, y }))
        .collect();
    targets.shuffle(rng);

    let mut shots = 0;
    for mv in targets {
        // Once the session is over the server stops listening, but the
        // verdict is still waiting to be read.
        let sent = transport.send(Frame::encode(&mv.token())).await.is_ok();
        match ServerMessage::parse(&transport.recv().await?)? {
            ServerMessage::Outcome(_) if sent => shots += 1,
            ServerMessage::Final(verdict) => return Ok((verdict, shots)),
            other => anyhow::bail!("unexpected {:?}", other),
        }
    }
    match ServerMessage::parse(&transport.recv().await?)? {
        ServerMessage::Final(verdict) => Ok((verdict, shots)),
        other => anyhow::bail!("unexpected {:?}", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        eprintln!(
            "Usage: {} <field_size> <ships> <move_budget> <seed>",
            args.first().map(String::as_str).unwrap_or("sim")
        );
        std::process::exit(1);
    }
    let config = SessionConfig::new(args[1].parse()?, args[2].parse()?, args[3].parse()?)?;
    let seed: u64 = args[4].parse()?;

    let (server_side, player_side) = InMemoryTransport::pair();
    let mut server_rng = SmallRng::seed_from_u64(seed);
    let mut player_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let server = async move {
        SessionNode::new(config, Box::new(server_side))
            .run(&mut server_rng)
            .await
    };
    let player = async move { random_player(player_side, &mut player_rng).await };

    let (summary, (verdict, shots)) = tokio::try_join!(server, player)?;

    let result = json!({
        "session": summary,
        "verdict": verdict,
        "shots": shots,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
