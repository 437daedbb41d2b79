#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Lantern Crawl in the terminal.

mod render;
mod script;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use lantern_crawl_core::{Event, Intent, TurnPhase};
use lantern_crawl_system_bootstrap::{Bootstrap, GameConfig, DEFAULT_MAP};
use lantern_crawl_system_combat_log::CombatLog;
use lantern_crawl_system_lighting::Lighting;
use lantern_crawl_system_turns::TurnResolver;
use lantern_crawl_world::{query, World};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Number of combat log lines printed under each frame.
const LOG_TAIL: usize = 4;

/// Lantern Crawl - turn-based dungeon crawling by lantern light
#[derive(Debug, Parser)]
#[command(name = "lantern-crawl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// ASCII map to load instead of the built-in dungeon
    #[arg(long)]
    map: Option<PathBuf>,

    /// TOML file overriding archetype statistics
    #[arg(long)]
    config: Option<PathBuf>,

    /// Intents to play (n, s, e, w, .); reads stdin line by line when omitted
    #[arg(long)]
    script: Option<String>,

    /// Print the final actor snapshot as JSON
    #[arg(long)]
    snapshot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Lantern Crawl command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let source = match &cli.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read map at {}", path.display()))?,
        None => DEFAULT_MAP.to_owned(),
    };

    let mut session = Session::start(config, &source)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.print(&mut out)?;

    match &cli.script {
        Some(script) => {
            let intents = script::parse(script).context("invalid --script")?;
            session.play(&intents, &mut out)?;
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read intents from stdin")?;
                match script::parse(&line) {
                    Ok(intents) => session.play(&intents, &mut out)?,
                    Err(error) => writeln!(out, "{error}")?,
                }
                if session.phase.is_terminal() {
                    break;
                }
            }
        }
    }

    if cli.snapshot {
        let actors = query::actor_view(&session.world).into_vec();
        serde_json::to_writer_pretty(&mut out, &actors).context("failed to write snapshot")?;
        writeln!(out)?;
    }
    Ok(())
}

struct Session {
    world: World,
    resolver: TurnResolver,
    phase: TurnPhase,
    log: CombatLog,
    events: Vec<Event>,
}

impl Session {
    fn start(config: GameConfig, source: &str) -> Result<Self> {
        let bootstrap = Bootstrap::new(config);
        let mut world = bootstrap.build_world(source).context("failed to load map")?;
        let lighting = Lighting::with_annulus_thickness(bootstrap.config().lighting.annulus_thickness);
        let mut resolver = TurnResolver::new(lighting);
        let mut events = Vec::new();
        let phase = resolver
            .begin(&mut world, &mut events)
            .context("failed to light the opening frame")?;
        info!(?phase, "session started");

        Ok(Self {
            world,
            resolver,
            phase,
            log: CombatLog::new(),
            events,
        })
    }

    fn play(&mut self, intents: &[Intent], out: &mut impl Write) -> Result<()> {
        for intent in intents {
            if self.phase.is_terminal() {
                break;
            }
            self.events.clear();
            self.phase = self
                .resolver
                .submit(&mut self.world, self.phase, *intent, &mut self.events)
                .context("turn resolution failed")?;
            self.log.handle(&self.events);
            self.print(out)?;
        }
        Ok(())
    }

    fn print(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", render::frame(&self.world, self.phase))?;
        for line in self.log.recent(LOG_TAIL) {
            writeln!(out, "> {line}")?;
        }
        writeln!(out)?;
        Ok(())
    }
}
