#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::LevelFilter;
#[cfg(feature = "std")]
use solo_battleship::{
    config::DEFAULT_CONFIG_FILE, init_logging, ClientExit, GameClient, Server, ServerConfig,
    TcpTransport,
};
#[cfg(feature = "std")]
use tokio::io::BufReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Host games: every connecting player gets their own board.
    Server {
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Connect to a server and play.
    Client {
        #[arg(long, short = 'H', default_value = "127.0.0.1")]
        host: String,
        #[arg(long, short, default_value_t = 8080)]
        port: u16,
        #[arg(long, short, default_value = "player")]
        name: String,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Server { config, seed } => {
            init_logging(LevelFilter::Info);
            let config = ServerConfig::load(&config)?;
            let mut server = Server::bind(config.bind_addr(), config.session).await?;
            if let Some(s) = seed {
                println!("Using fixed seed: {} (layouts will be reproducible)", s);
                server = server.with_seed(s);
            }
            server.run().await?;
        }
        Commands::Client { host, port, name } => {
            init_logging(LevelFilter::Warn);
            let transport = TcpTransport::connect((host.as_str(), port)).await?;
            let client = GameClient::new(transport, name);
            let input = BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            match client.run(input, &mut out).await? {
                ClientExit::Finished(_) => {}
                ClientExit::Disconnected => eprintln!("Server closed the connection."),
                ClientExit::InputClosed => std::process::exit(1),
            }
        }
    }
    Ok(())
}
