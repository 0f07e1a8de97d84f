//! fbtop - Interactive TUI for a Fluent Bit agent's monitoring endpoint.
//!
//! Usage:
//!   fbtop                                 # prompt, prefilled with localhost:2020 and 5s
//!   fbtop 2                               # prefill a 2 second interval
//!   fbtop --url http://10.0.0.7:2020 -y   # start polling without prompts
//!   fbtop --log-file /tmp/fbtop.log -v    # debug logging to a file

use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use tikv_jemallocator::Jemalloc;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use fbtop::tui::{App, DEFAULT_ADDRESS, DEFAULT_INTERVAL};

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Live dashboard for the Fluent Bit monitoring API.
#[derive(Parser)]
#[command(name = "fbtop", version, about = "Fluent Bit metrics viewer")]
struct Args {
    /// Poll interval in seconds, prefilled at the interval prompt.
    #[arg(value_name = "INTERVAL", default_value = DEFAULT_INTERVAL)]
    interval: String,

    /// Origin of the agent's HTTP server, prefilled at the address prompt.
    #[arg(long, env = "FLUENTBIT_URL", default_value = DEFAULT_ADDRESS)]
    url: String,

    /// Accept both prefilled values and start polling immediately.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes logging into `path`. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr.
fn init_logging(path: &str, verbose: u8, quiet: bool) -> std::io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("fbtop={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file
        && let Err(e) = init_logging(path, args.verbose, args.quiet)
    {
        eprintln!("Error opening log file '{}': {}", path, e);
        std::process::exit(1);
    }

    info!("fbtop {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: url={}, interval={}s, autostart={}",
        args.url, args.interval, args.yes
    );

    let app = App::new(args.url, args.interval, args.yes);
    if let Err(e) = app.run() {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
