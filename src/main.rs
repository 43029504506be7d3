use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;
use termcolor::ColorChoice;

mod batches;
mod config;
mod error;
mod general;
mod message;
mod remote;
mod sequencer;

use config::Config;
use general::clock::SystemClock;
use general::report::Reporter;
use remote::osc_sender::OscSender;
use sequencer::{Mode, Sequencer};

/// Send scripted OSC test traffic to a UDP server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Target host [default: 127.0.0.1]
    host: Option<String>,
    /// Target port [default: 8000]
    port: Option<u16>,
    /// Stream random messages for a fixed duration instead of the scripted tests
    #[arg(long)]
    continuous: bool,
    /// Continuous session length in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,
    /// Pause between continuous messages in seconds [default: 0.1]
    #[arg(long, value_name = "SECS")]
    interval: Option<f64>,
    /// Seed for the random payloads
    #[arg(long)]
    seed: Option<u64>,
    /// JSON config file; command line values take precedence
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log every datagram sent
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn into_config(self) -> error::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(duration) = self.duration {
            config.continuous.duration_secs = duration;
        }
        if let Some(interval) = self.interval {
            config.continuous.interval_secs = interval;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let reporter = Reporter::new(ColorChoice::Auto);
    if let Err(err) = run(args, reporter) {
        reporter.fatal(&err);
        process::exit(1);
    }
}

fn run(args: Args, reporter: Reporter) -> error::Result<()> {
    let continuous = args.continuous;
    let config = args.into_config()?;
    let destination = config.destination()?;
    // Validate before any socket is opened
    let mode = if continuous {
        Mode::Continuous(config.session()?)
    } else {
        Mode::Scripted
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let transport = OscSender::new(&destination)?;
    log::debug!("{} resolved to {}", destination, transport.target_addr());
    let mut sequencer = Sequencer::new(destination, transport, SystemClock, rng, reporter);
    let summary = sequencer.run(mode)?;
    for batch in &summary.batches {
        log::debug!("{}: {} messages in {:?}", batch.name, batch.sent, batch.elapsed);
    }
    log::info!("run finished: {} messages in {} batches", summary.sent, summary.batches.len());
    Ok(())
}
