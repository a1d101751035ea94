#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use tetroship::{
    init_logging, BotPlayer, ClientNode, PlayerId, Server, ServerConfig, TcpTransport,
    DEFAULT_MAX_LINE_LEN, DEFAULT_P1_PORT, DEFAULT_P2_PORT,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use log::info;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host matches: player 1 connects to one port, player 2 to the other.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        #[arg(long, default_value_t = DEFAULT_P1_PORT)]
        p1_port: u16,
        #[arg(long, default_value_t = DEFAULT_P2_PORT)]
        p2_port: u16,
        #[arg(long, help = "Disconnect a player after this many idle seconds")]
        idle_timeout: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
        max_line_len: usize,
    },
    /// Play one seat of a match with the built-in bot.
    Bot {
        #[arg(long, default_value = "127.0.0.1")]
        connect: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        seat: u8,
        #[arg(long, help = "Port to connect to; defaults to the seat's standard port")]
        port: Option<u16>,
        #[arg(long, default_value_t = 10)]
        width: usize,
        #[arg(long, default_value_t = 10)]
        height: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            p1_port,
            p2_port,
            idle_timeout,
            max_line_len,
        } => {
            let config = ServerConfig {
                bind_host: bind,
                p1_port,
                p2_port,
                idle_timeout: idle_timeout.map(Duration::from_secs),
                max_line_len,
            };
            let server = Server::bind(config).await?;
            server.run().await?;
        }
        Commands::Bot {
            connect,
            seat,
            port,
            width,
            height,
            seed,
        } => {
            let seat = PlayerId::from_number(seat)
                .ok_or_else(|| anyhow::anyhow!("Seat must be 1 or 2"))?;
            let port = port.unwrap_or(match seat {
                PlayerId::One => DEFAULT_P1_PORT,
                PlayerId::Two => DEFAULT_P2_PORT,
            });
            let mut rng = if let Some(s) = seed {
                info!("Using fixed seed: {}", s);
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let transport = TcpTransport::connect((connect.as_str(), port)).await?;
            info!("Connected to {}:{} as {}", connect, port, seat);
            let mut node = ClientNode::new(
                seat,
                Box::new(BotPlayer::new()),
                Box::new(transport),
                (width, height),
            );
            let report = node.run(&mut rng).await?;
            println!(
                "{} {} after {} shots",
                report.seat,
                if report.won { "won" } else { "lost" },
                report.shots
            );
        }
    }
    Ok(())
}
