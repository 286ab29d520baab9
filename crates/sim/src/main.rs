//! Headless battle simulator.
//!
//! Loads a roster (RON) and optional plugin parameters (TOML), then plays every
//! battler automatically: a full gauge queues the battler's skill and starts
//! casting, a finished cast executes and ends the turn.
//!
//! Run with: `tpb-sim --roster data/roster.ron --params data/params.toml`

mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tpb_content::{ConfigLoader, LoadedRoster, PluginParameters, RosterLoader};
use tpb_core::{BattleEvent, SpeedModelKind, TimingMode};
use tpb_runtime::{BattleRuntime, LogCueSink};
use tracing::{debug, info};

use report::SimulationReport;

/// Simulate a time-progress battle and report action counts
#[derive(Parser)]
#[command(name = "tpb-sim")]
#[command(about = "Headless time-progress battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Roster file (RON)
    #[arg(short, long, value_name = "FILE")]
    roster: PathBuf,

    /// Plugin parameter file (TOML with a [parameters] table)
    #[arg(short, long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// Progression mode
    #[arg(short, long, value_enum, default_value = "active")]
    mode: ModeArg,

    /// Gauge speed model
    #[arg(long, value_enum, default_value = "spread-normalized")]
    speed: SpeedArg,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    /// Gauges keep filling while commands are chosen
    Active,
    /// Gauges pause while commands are chosen
    Wait,
}

impl From<ModeArg> for TimingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Active => TimingMode::Active,
            ModeArg::Wait => TimingMode::Wait,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SpeedArg {
    /// Normalized by the roster's agility spread
    SpreadNormalized,
    /// Square root of agility plus one
    Classic,
}

impl From<SpeedArg> for SpeedModelKind {
    fn from(speed: SpeedArg) -> Self {
        match speed {
            SpeedArg::SpreadNormalized => SpeedModelKind::SpreadNormalized,
            SpeedArg::Classic => SpeedModelKind::Classic,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => ConfigLoader::load_parameters(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => PluginParameters::new(),
    };
    let LoadedRoster { roster, skills } = RosterLoader::load(&cli.roster)
        .with_context(|| format!("loading roster from {}", cli.roster.display()))?;

    let mut report = SimulationReport::start(&roster);
    let mut runtime = BattleRuntime::builder()
        .parameters(&params)
        .speed_model(cli.speed.into())
        .mode(cli.mode.into())
        .cue_sink(Arc::new(LogCueSink))
        .roster(roster)
        .build()?;

    for _ in 0..cli.frames {
        let tick = runtime.step()?;
        for event in &tick.events {
            // Slip can defeat a battler in the frame its gauge fills.
            if runtime.battler(event.battler()).is_none() {
                continue;
            }
            match *event {
                BattleEvent::GaugeFull { battler, .. } => {
                    if let Some(skill) = skills.get(&battler) {
                        runtime.queue_action(battler, skill.clone())?;
                    }
                    runtime.begin_casting(battler)?;
                }
                BattleEvent::CastComplete { battler } => {
                    runtime.start_action(battler)?;
                    debug!(battler = %battler, frame = tick.frame.0, "Action executed");
                    runtime.finish_action(battler)?;
                    report.record_action(battler);
                }
                BattleEvent::SlipApplied { .. } | BattleEvent::Defeated { .. } => {}
            }
        }
        for id in &tick.removed {
            report.record_defeat(*id, tick.frame);
        }
        if runtime.state().roster.is_empty() {
            info!(frame = tick.frame.0, "Roster empty, stopping early");
            break;
        }
    }

    report.finish(runtime.state());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}
