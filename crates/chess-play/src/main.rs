mod config;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chess_core::PromotionPiece;
use chess_rules::Game;
use clap::Parser;
use config::{parse_promotion, PlayConfig};
use session::{Session, SessionOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal, two players at one keyboard")]
struct Args {
    /// Configuration file (defaults to ./chess-play.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Promote without asking (q, r, b, n or the full name)
    #[arg(long, value_parser = promotion_arg)]
    auto_promote: Option<PromotionPiece>,
}

fn promotion_arg(value: &str) -> Result<PromotionPiece, String> {
    parse_promotion(value).ok_or_else(|| format!("not a promotion piece: {value}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlayConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PlayConfig::load().context("loading chess-play.toml")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let auto_promote = match args.auto_promote {
        Some(piece) => Some(piece),
        None => config.auto_promote()?,
    };

    let game = match args.fen.as_deref().or(config.start_fen.as_deref()) {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid position: {fen}"))?,
        None => Game::new(),
    };
    tracing::info!(side_to_move = %game.side_to_move(), "starting session");

    let options = SessionOptions {
        auto_promote,
        show_moves: config.show_moves,
    };
    let mut session = Session::new(game, io::stdin().lock(), io::stdout().lock(), options);
    session.run()?;
    tracing::info!(status = %session.game().status(), "session ended");
    Ok(())
}
