//! atlasresp CLI Client
//!
//! Command-line interface for talking to a RESP server.

use std::io::{self, BufRead, Write};

use atlasresp::{ClientConfig, Command, Connection, Reply, RespError};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// atlasresp CLI
#[derive(Parser, Debug)]
#[command(name = "atlasresp-cli")]
#[command(about = "CLI for RESP key-value servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "6379")]
    port: u16,

    /// Database index to select after connecting
    #[arg(short = 'n', long)]
    db: Option<u32>,

    /// Password for AUTH
    #[arg(short = 'a', long)]
    password: Option<String>,

    /// Read commands from stdin and send them as one pipeline
    #[arg(long)]
    pipe: bool,

    /// Command and arguments; read from stdin when omitted
    command: Vec<String>,
}

fn main() {
    // Initialize tracing/logging (stderr, so replies on stdout stay clean)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,atlasresp=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = ClientConfig::builder().host(&args.host).port(args.port);
    if let Some(db) = args.db {
        builder = builder.database(db);
    }
    if let Some(password) = &args.password {
        builder = builder.password(password);
    }
    let config = builder.build();

    let mut conn = match Connection::open(&config) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", config.addr(), e);
            std::process::exit(1);
        }
    };

    let outcome = if !args.command.is_empty() {
        run_one(&mut conn, &args.command)
    } else if args.pipe {
        run_pipe(&mut conn)
    } else {
        run_interactive(&mut conn)
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Build a command from whitespace-separated words
fn to_command<S: AsRef<str>>(words: &[S]) -> Option<Command> {
    let (name, rest) = words.split_first()?;
    Some(Command::new(name.as_ref()).args(rest.iter().map(|w| w.as_ref())))
}

fn run_one(conn: &mut Connection, words: &[String]) -> atlasresp::Result<()> {
    let Some(command) = to_command(words) else {
        return Ok(());
    };
    print_outcome(conn.send(&command))
}

/// One command per line, all written before any reply is read
fn run_pipe(conn: &mut Connection) -> atlasresp::Result<()> {
    let mut commands = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if let Some(command) = to_command(&words) {
            commands.push(command);
        }
    }

    conn.set_pipelining(true);
    for command in &commands {
        conn.queue(command)?;
    }
    conn.flush()?;

    let mut failed = 0;
    for _ in 0..commands.len() {
        // Error replies are printed, not fatal
        let reply = conn.read_reply()?;
        if reply.is_error() {
            failed += 1;
        }
        println!("{}", reply);
    }
    if failed > 0 {
        tracing::warn!("{} of {} piped commands failed", failed, commands.len());
    }
    Ok(())
}

fn run_interactive(conn: &mut Connection) -> atlasresp::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}> ", conn.peer_addr());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(command) = to_command(&words) else {
            continue;
        };

        let name = command.name_lossy();
        if name == "QUIT" || name == "SHUTDOWN" {
            conn.send_closing(&command)?;
            return Ok(());
        }

        print_outcome(conn.send(&command))?;
    }
}

/// Print a reply; server errors are shown, anything else is returned
fn print_outcome(outcome: atlasresp::Result<Reply>) -> atlasresp::Result<()> {
    match outcome {
        Ok(reply) => println!("{}", reply),
        Err(RespError::Server(message)) => println!("{}", Reply::Error(message)),
        Err(e) => return Err(e),
    }
    Ok(())
}
