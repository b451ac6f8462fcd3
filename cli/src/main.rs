mod command;
mod fetch;
mod render;
mod session;

use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::command::{HELP, parse_command};
use crate::fetch::{fetch_puzzle_set, puzzles_url};
use crate::session::{Reply, Session};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid difficulty window: min {min} is above max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("http client build failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("terminal io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chess-board", about = "Terminal chessboard and puzzle trainer")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Free play from the starting position.
    Play,
    /// Solve puzzles fetched from the relay.
    Puzzles(PuzzleArgs),
}

#[derive(Args, Debug)]
struct PuzzleArgs {
    #[arg(long, env = "CHESS_RELAY_URL", default_value = "http://127.0.0.1:3000")]
    relay_url: String,

    #[arg(long, env = "CHESS_PUZZLE_MIN", default_value_t = 1200)]
    min: i64,

    #[arg(long, env = "CHESS_PUZZLE_MAX", default_value_t = 1600)]
    max: i64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.mode {
        Mode::Play => run(Session::free_play(), None).await,
        Mode::Puzzles(args) => {
            if args.min > args.max {
                return Err(CliError::InvalidRange { min: args.min, max: args.max });
            }
            let url = puzzles_url(&args.relay_url, args.min, args.max);
            run(Session::puzzles(), Some(url)).await
        }
    }
}

/// Drive the prompt loop until `quit` or end of input.
///
/// Three things can wake the loop: a typed line, the puzzle download
/// finishing, and a pending reversal falling due.
async fn run(mut session: Session, puzzles_url: Option<String>) -> Result<(), CliError> {
    let client = reqwest::Client::builder().build()?;
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let loading = puzzles_url.is_some();
    let download = async {
        match &puzzles_url {
            Some(url) => Some(fetch_puzzle_set(&client, url).await),
            None => None,
        }
    };
    tokio::pin!(download);
    let mut downloading = loading;

    let banner = if loading { "Loading puzzles..." } else { "Type `help` for commands." };
    write_block(&mut stdout, &format!("{}\n\n{banner}", session.render())).await?;

    loop {
        let deadline = session.next_deadline();
        tokio::select! {
            fetched = &mut download, if downloading => {
                downloading = false;
                if let Some(fetched) = fetched {
                    let text = session.install(fetched);
                    write_block(&mut stdout, &text).await?;
                }
            }
            () = wait_until(deadline) => {
                if let Some(text) = session.poll_at(Instant::now()) {
                    write_block(&mut stdout, &text).await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let reply = match parse_command(&line) {
                    Ok(command) => session.execute_at(command, Instant::now()),
                    Err(e) => Reply::Print(format!("{e}\n\n{HELP}")),
                };
                match reply {
                    Reply::Print(text) => write_block(&mut stdout, &text).await?,
                    Reply::Quit => break,
                }
            }
        }
    }
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), CliError> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n> ").await?;
    stdout.flush().await?;
    Ok(())
}
