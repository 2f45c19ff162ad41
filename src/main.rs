mod demo;

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serialcmd::config::Config;
use serialcmd::logging::init_tracing;
use serialcmd::{CommandError, CommandReader, StdioStream};

/// Line-oriented command console over stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "serialcmd", version)]
struct Cli {
    /// Config file (default: ~/.config/serialcmd/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override buffer capacity in bytes
    #[arg(long)]
    capacity: Option<usize>,

    /// Line terminator; accepts \r \n \t \\ escapes
    /// (default: \n, or \r with --raw)
    #[arg(long)]
    terminator: Option<String>,

    /// Override token delimiter set
    #[arg(long)]
    delimiters: Option<String>,

    /// Put the terminal in raw mode; Ctrl-C or Ctrl-D quits
    #[arg(long)]
    raw: bool,

    /// Run LINE as a command and exit (repeatable)
    #[arg(long = "exec", value_name = "LINE")]
    exec: Vec<String>,
}

/// Ctrl-C and Ctrl-D arrive as plain bytes once raw mode turns off ISIG.
const QUIT_BYTES: [u8; 2] = [0x03, 0x04];

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;
    let raw = cli.raw || config.console.raw_mode;
    apply_overrides(&mut config, &cli, raw);
    config.validate()?;

    let mut reader = CommandReader::new(&config.scanner);
    demo::register(&mut reader)?;

    if !cli.exec.is_empty() {
        reader.attach(StdioStream::stdout());
        for line in &cli.exec {
            reader
                .process_line(line)
                .with_context(|| format!("running '{}'", line))?;
        }
        return Ok(());
    }

    if raw {
        enable_raw_mode()?;
    }
    scopeguard::defer! {
        let _ = disable_raw_mode();
    }

    let stream = if raw {
        StdioStream::spawn_until(io::stdin(), &QUIT_BYTES)
    } else {
        StdioStream::stdin()
    };
    reader.attach(stream.clone());
    let tick = Duration::from_millis(config.console.poll_interval_ms);

    loop {
        match reader.read_source() {
            Ok(()) => {}
            Err(err @ CommandError::BufferOverflow { .. }) => {
                tracing::warn!(error_type = err.error_type(), "{}", err);
                if let Some(out) = reader.stream_mut() {
                    let _ = out.write_all(format!("ERROR: {}\r\n", err).as_bytes());
                    let _ = out.flush();
                }
            }
            Err(err) => return Err(err.into()),
        }
        if stream.is_drained() {
            break;
        }
        thread::sleep(tick);
    }

    Ok(())
}

/// Fold command-line flags into `config`.
///
/// The console never uses `[scanner].terminator`: a terminal sends "\n" for
/// Enter in cooked mode and "\r" in raw mode, so a CRLF default would never
/// end a typed line. `--terminator` wins over `[console].terminator`.
fn apply_overrides(config: &mut Config, cli: &Cli, raw: bool) {
    if let Some(capacity) = cli.capacity {
        config.scanner.buffer_capacity = capacity;
    }
    config.scanner.terminator = match (&cli.terminator, &config.console.terminator) {
        (Some(terminator), _) => unescape(terminator),
        (None, Some(terminator)) => terminator.clone(),
        (None, None) if raw => "\r".to_string(),
        (None, None) => "\n".to_string(),
    };
    if let Some(delimiters) = &cli.delimiters {
        config.scanner.delimiters = unescape(delimiters);
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
