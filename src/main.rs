//! CLI for dungeon generation

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dungeon_runners::{render, Dungeon, DungeonConfig, RoomDescriptor};
use log::{LevelFilter, Log, Metadata, Record};

/// Dungeon layouts traced by random-walking runners
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON configuration file. Use `-` for stdin.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed, -1 for a new dungeon every run
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// Steps taken by every runner
    #[arg(short, long, allow_hyphen_values = true)]
    iterations: Option<i64>,

    /// Turn probability of one runner; repeat for more runners
    #[arg(short, long = "runner", allow_hyphen_values = true)]
    runners: Vec<f64>,

    /// World-space edge length of one room
    #[arg(long, allow_hyphen_values = true)]
    room_size: Option<i32>,

    /// Generic room name; repeat to build the catalog
    #[arg(long = "room")]
    rooms: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Map)]
    format: Format,

    /// Animate the walk on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(long, default_value_t = 300)]
    frame_length: u64,

    /// Print debug messages to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Emoji map
    Map,
    /// One line per room
    List,
    /// JSON document
    Json,
}

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Configuration file, if given, with command line overrides on top
fn load_config(args: &Args) -> anyhow::Result<DungeonConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = if path.to_str() == Some("-") {
                let mut buf = String::new();
                io::stdin().lock().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(path)
                    .with_context(|| format!("Cannot read {}", path.display()))?
            };
            DungeonConfig::from_json(&json).context("Invalid configuration file")?
        }
        None => DungeonConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if !args.runners.is_empty() {
        config.runners = args.runners.clone();
    }
    if let Some(room_size) = args.room_size {
        config.room_size = room_size;
    }
    if !args.rooms.is_empty() {
        config.room_catalog = args.rooms.iter().map(RoomDescriptor::new).collect();
    }
    Ok(config)
}

/// Generate dungeon, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    log::set_logger(&LOGGER)?;
    log::set_max_level(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    let config = load_config(&args)?;
    let dungeon = if args.playback {
        Dungeon::generate_traced(&config)
    } else {
        Dungeon::generate(&config)
    }
    .context("Cannot generate dungeon")?;

    if args.playback {
        render::playback(&dungeon, args.frame_length);
        return Ok(());
    }
    match args.format {
        Format::Map => println!("{}", render::render_map(&dungeon)),
        Format::List => println!("{}", render::render_list(&dungeon)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&dungeon)?),
    }
    Ok(())
}
