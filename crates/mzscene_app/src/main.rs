// SPDX-License-Identifier: MIT OR Apache-2.0
//! MZ Scene Studio CLI.
//!
//! Headless shell over the timeline core: creates and inspects `.mzscene`
//! files, converts them to engine commands, and splices those commands
//! into an RPG Maker MZ map event page.

mod map;
mod scene_io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mzscene_export::convert_to_mz_format;
use mzscene_timeline::{pack_events, EventType, Lane, SceneData, TimelineModel};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mzscene")]
#[command(about = "MZ Scene Studio - timeline scenes for RPG Maker MZ maps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty scene file
    New {
        /// Scene file to create
        scene: PathBuf,
    },

    /// Summarize a scene file
    Info {
        /// Scene file to inspect
        scene: PathBuf,
    },

    /// Convert a scene to engine commands as JSON
    Convert {
        /// Scene file to convert
        scene: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Splice a scene's commands into a map event page
    Export {
        /// Scene file to export
        scene: PathBuf,

        /// RPG Maker MZ project directory
        #[arg(long)]
        project: PathBuf,

        /// Map id (resolves to data/MapNNN.json)
        #[arg(long)]
        map: u32,

        /// Event id within the map
        #[arg(long)]
        event: u32,

        /// Event page, 0-based
        #[arg(long, default_value = "0")]
        page: usize,
    },
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::New { scene } => cmd_new(scene),
        Commands::Info { scene } => cmd_info(scene),
        Commands::Convert { scene, output } => cmd_convert(scene, output),
        Commands::Export {
            scene,
            project,
            map,
            event,
            page,
        } => cmd_export(scene, project, map, event, page),
    }
}

fn cmd_new(path: PathBuf) -> Result<()> {
    scene_io::write_scene(&path, &SceneData::default())
}

fn cmd_info(path: PathBuf) -> Result<()> {
    let scene = scene_io::read_scene(&path)?;
    let mut model = TimelineModel::new();
    model.load_scene(scene);

    let layout = pack_events(model.events());
    println!("scene: {}", path.display());
    println!("timeline length: {} frames", model.timeline_length());
    println!("content ends at: frame {}", model.content_end_frame());
    println!("events: {}", model.events().len());
    for &lane in Lane::all() {
        let count = model.events().iter().filter(|e| e.lane() == lane).count();
        let rows = layout.max_sub_rows[lane.index()];
        println!("  {:<8} {count:>4} events, {rows} sub-row(s)", lane.label());
    }
    for &event_type in EventType::all() {
        let count = model
            .events()
            .iter()
            .filter(|e| e.kind.event_type() == Some(event_type))
            .count();
        if count > 0 {
            println!("  {:<14} {count:>4}", event_type.name());
        }
    }
    Ok(())
}

fn cmd_convert(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let scene = scene_io::read_scene(&path)?;
    let commands = convert_to_mz_format(&scene.events);
    let text = serde_json::to_string_pretty(&commands)?;
    match output {
        Some(out) => fs::write(&out, text)
            .with_context(|| format!("writing {}", out.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_export(
    path: PathBuf,
    project: PathBuf,
    map_id: u32,
    event_id: u32,
    page: usize,
) -> Result<()> {
    let scene = scene_io::read_scene(&path)?;
    if scene.events.is_empty() {
        bail!("no events to export");
    }
    let commands = convert_to_mz_format(&scene.events);
    let count = map::export_to_map(&project, map_id, event_id, page, &commands)?;
    println!(
        "{count} commands written to {}",
        map::map_file_name(map_id)
    );
    Ok(())
}
