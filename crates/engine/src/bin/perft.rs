use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use shaktris_core::{Board, PieceType};
use shaktris_engine::perft::{perft, perft_parallel};
use tracing::{error, info, Level};
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(about = "Count placement-tree leaves for a piece queue")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (default WARN, -v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[arg(long, default_value = "IOTLJSZ", help = "Pieces to place, in order")]
    queue: String,

    #[arg(long, default_value_t = 3, help = "Number of plies")]
    depth: u32,

    #[arg(long, help = "Split the first ply across threads")]
    parallel: bool,
}

fn level_for(verbose: u8) -> Level {
    match verbose.saturating_add(2).clamp(1, 5) {
        1 => Level::ERROR,
        2 => Level::WARN,
        3 => Level::INFO,
        4 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = level_for(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let queue = match PieceType::parse_queue(&cli.queue) {
        Ok(queue) => queue,
        Err(err) => {
            error!("invalid queue: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(queue = %cli.queue, depth = cli.depth, parallel = cli.parallel, "running perft");

    let board = Board::new();
    let start = Instant::now();
    let nodes = if cli.parallel {
        perft_parallel(&board, &queue, cli.depth)
    } else {
        perft(&board, &queue, cli.depth)
    };
    let elapsed = start.elapsed();
    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!("depth {}: {} nodes", cli.depth, nodes);
    println!("time: {:.3}s", elapsed.as_secs_f64());
    println!("nps: {:.0}", nps);
    ExitCode::SUCCESS
}
