use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use tetroship::{BotPlayer, ClientNode, PlayerId, Server, ServerConfig, TcpTransport};

/// Plays one bot-vs-bot match over loopback TCP and prints the result as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 5 {
        eprintln!("Usage: {} <seed1> <seed2> [<width> <height>]", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let dims: (usize, usize) = if args.len() == 5 {
        (args[3].parse()?, args[4].parse()?)
    } else {
        (10, 10)
    };

    let server = Server::bind(ServerConfig::ephemeral()).await?;
    let (p1_addr, p2_addr) = server.local_addrs()?;
    tokio::spawn(server.run());

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let f1 = async move {
        let transport = TcpTransport::connect(p1_addr).await?;
        let mut node = ClientNode::new(
            PlayerId::One,
            Box::new(BotPlayer::new()),
            Box::new(transport),
            dims,
        );
        node.run(&mut rng1).await
    };

    let f2 = async move {
        let transport = TcpTransport::connect(p2_addr).await?;
        let mut node = ClientNode::new(
            PlayerId::Two,
            Box::new(BotPlayer::new()),
            Box::new(transport),
            dims,
        );
        node.run(&mut rng2).await
    };

    let (res1, res2) = tokio::try_join!(f1, f2)?;

    let winner = match (res1.won, res2.won) {
        (true, false) => Some("player1"),
        (false, true) => Some("player2"),
        _ => None,
    };

    let result = json!({
        "board": {"width": dims.0, "height": dims.1},
        "player1": res1,
        "player2": res2,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
