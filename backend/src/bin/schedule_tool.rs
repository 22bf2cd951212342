//! Schedule inspection and editing tool.
//!
//! Works on JSON row files, arrays of `{"day": 1, "start": 450, "end": 990}`
//! objects with weekday indices (0 = Sunday) and minutes since midnight.
//!
//! # Usage
//!
//! ```bash
//! schedule-tool presets
//! schedule-tool show rows.json --camera 3
//! schedule-tool apply-preset rows.json "Night Shift" --force --write
//! schedule-tool active rows.json --at 2024-06-08T06:30
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)
//! - `SCHEDULE_DEFAULT_DURATION_MINUTES`, `SCHEDULE_SLOT_MINUTES`: config overrides

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use detection_schedule::api::{
    is_active_at, CameraId, ConflictPolicy, MutationOutcome, ScheduleConfig, ScheduleSummary,
    Session, StorageRow,
};
use detection_schedule::db::{self, LocalRepository, ScheduleRepository};

#[derive(Parser)]
#[clap(name = "schedule-tool", about = "Inspect and edit weekly detection schedules")]
struct Args {
    /// Configuration file (defaults to the first schedule.toml found)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the preset catalog
    Presets,
    /// Group a row file into windows and report conflicts
    Show {
        rows: PathBuf,
        #[clap(long, default_value_t = 1)]
        camera: i64,
        /// Print the schedule as JSON
        #[clap(long)]
        json: bool,
    },
    /// Add a preset to the schedule in a row file
    ApplyPreset {
        rows: PathBuf,
        name: String,
        #[clap(long, default_value_t = 1)]
        camera: i64,
        /// Apply even if the preset overlaps existing windows
        #[clap(long)]
        force: bool,
        /// Write the committed rows back to the file
        #[clap(long)]
        write: bool,
    },
    /// Report whether detection is active at a local timestamp
    Active {
        rows: PathBuf,
        /// YYYY-MM-DDTHH:MM[:SS]
        #[clap(long)]
        at: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.cmd {
        Command::Presets => {
            for preset in config.preset_catalog()?.iter() {
                println!("{:<20} {}", preset.name, preset.window);
            }
        }
        Command::Show { rows, camera, json } => {
            let (_, session) = open_session(&rows, CameraId::new(camera), &config).await?;
            let summary = ScheduleSummary::from(&session);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_session(&session, config.schedule.slot_minutes);
            }
        }
        Command::ApplyPreset {
            rows,
            name,
            camera,
            force,
            write,
        } => {
            let catalog = config.preset_catalog()?;
            let preset = catalog.get(&name)?;
            let (repo, mut session) = open_session(&rows, CameraId::new(camera), &config).await?;

            let policy = if force {
                ConflictPolicy::Force
            } else {
                ConflictPolicy::Warn
            };
            match session.apply_preset(preset, policy) {
                MutationOutcome::Conflict(warning) => {
                    println!("Not applied: {}", warning);
                    println!("Re-run with --force to apply anyway.");
                    return Ok(());
                }
                MutationOutcome::Applied => {
                    info!("Applied preset '{}'", preset.name);
                }
            }
            print_session(&session, config.schedule.slot_minutes);

            if write {
                db::save_session(&repo, &session).await?;
                let saved = repo.load_rows(session.camera_id()).await?;
                write_rows(&rows, &saved)?;
                info!("Wrote {} rows to {}", saved.len(), rows.display());
            }
        }
        Command::Active { rows, at } => {
            let at = parse_timestamp(&at)?;
            let rows = read_rows(&rows)?;
            let active = is_active_at(&rows, at);
            println!(
                "{} at {}",
                if active { "active" } else { "inactive" },
                at.format("%a %Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScheduleConfig> {
    let mut config = match path {
        Some(path) => ScheduleConfig::from_file(path)?,
        None => ScheduleConfig::from_default_location()?.unwrap_or_default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

/// Load a row file into a fresh local repository and open a session on it.
async fn open_session(
    path: &Path,
    camera_id: CameraId,
    config: &ScheduleConfig,
) -> Result<(LocalRepository, Session)> {
    let rows = read_rows(path)?;
    let repo = LocalRepository::new();
    repo.save_rows(camera_id, &rows)
        .await
        .with_context(|| format!("Invalid rows in {}", path.display()))?;

    let session =
        db::load_session(&repo, camera_id, config.schedule.default_duration_minutes).await?;
    Ok((repo, session))
}

fn read_rows(path: &Path) -> Result<Vec<StorageRow>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_rows(path: &Path, rows: &[StorageRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(at);
        }
    }
    bail!("Invalid timestamp '{}', expected YYYY-MM-DDTHH:MM[:SS]", text)
}

fn print_session(session: &Session, slot_minutes: u16) {
    println!("Camera {}", session.camera_id());
    if session.is_empty() {
        println!("  (no windows)");
    }
    for (i, window) in session.windows().iter().enumerate() {
        let off_grid =
            !window.start().is_aligned(slot_minutes) || !window.end().is_aligned(slot_minutes);
        println!(
            "  #{} {}{}",
            i,
            window,
            if off_grid { " (off-grid)" } else { "" }
        );
    }
    for (i, j) in session.conflicts() {
        println!("  conflict: #{} overlaps #{}", i, j);
    }
}
