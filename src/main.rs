use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use big_calc::{Base, Reply, Session};

/// Arbitrary-precision integer calculator
#[derive(Debug, Parser)]
#[command(name = "calc", version, about)]
struct Args {
    /// Read expressions from FILE instead of standard input
    file: Option<PathBuf>,

    /// Output base: bin, dec or hex
    #[arg(long, default_value_t = Base::Decimal)]
    base: Base,

    /// Reject expressions longer than N characters
    #[arg(long, value_name = "N")]
    max_len: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new(args.base);
    if let Some(max_len) = args.max_len {
        session = session.with_max_len(max_len);
    }

    match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Invalid input file {}", path.display()))?;
            info!(path = %path.display(), "reading expressions from file");
            run(BufReader::new(file), &mut session, true)
        }
        None => run(io::stdin().lock(), &mut session, false),
    }
}

/// Prompts, reads and answers one line at a time until `quit` or end of input.
/// With `echo`, each line read is printed after the prompt.
fn run(input: impl BufRead, session: &mut Session, echo: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line.context("failed to read input")?;
        if echo {
            writeln!(out, "{}", line)?;
        }
        match session.execute(&line) {
            Reply::Quit => return Ok(()),
            Reply::Nothing => {}
            Reply::Line(text) | Reply::Error(text) => writeln!(out, "{}", text)?,
        }
    }
}
