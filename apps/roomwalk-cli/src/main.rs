use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use glam::Vec3;
use roomwalk_collision::{RoomConfig, RoomLayout};
use roomwalk_common::Orientation;
use roomwalk_input::{HeldKeys, LookControl};
use roomwalk_kernel::{FrameOutcome, InputFrame, PlayerState, RunSummary, Session};
use roomwalk_render::{DebugTextRenderer, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomwalk-cli", about = "Headless driver for the room walk core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Room config file (.yaml, .yml or .json). Defaults to the 20x20 box room.
    #[arg(long, global = true)]
    room: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and room summary
    Info,
    /// Print the room layout as YAML
    Layout,
    /// Check whether a point is blocked by a wall
    Probe {
        #[arg(allow_hyphen_values = true)]
        x: f32,
        #[arg(allow_hyphen_values = true)]
        y: f32,
        #[arg(allow_hyphen_values = true)]
        z: f32,
    },
    /// Hold a set of movement keys for a number of frames
    Walk {
        /// WASD letters to hold, e.g. "wd"
        #[arg(short, long, default_value = "w")]
        keys: String,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: usize,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Initial yaw in degrees (0 faces -Z, positive turns left)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        yaw: f32,
        /// Walking speed in units per second
        #[arg(long, default_value = "5")]
        speed: f32,
        /// Draw a top-down minimap after the walk
        #[arg(long)]
        map: bool,
        /// Write the generated input script as JSON
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Replay a recorded JSON input script
    Replay {
        script: PathBuf,
        /// Draw a top-down minimap after the replay
        #[arg(long)]
        map: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let layout = load_layout(cli.room.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("roomwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            let margins = layout.margins();
            println!(
                "room: {} walls, height {:.1}, half-width {:.2}, half-depth {:.2}",
                layout.walls().len(),
                layout.height(),
                margins.half_width(),
                margins.half_depth()
            );
        }
        Commands::Layout => {
            print!("{}", RoomConfig::from(&layout).to_yaml_string()?);
        }
        Commands::Probe { x, y, z } => {
            let point = Vec3::new(x, y, z);
            match layout.first_collision(point) {
                Some(i) => {
                    let wall = layout.walls()[i];
                    println!(
                        "({x}, {y}, {z}): blocked by wall[{i}] at ({}, {}, {}) {:?}",
                        wall.center.x, wall.center.y, wall.center.z, wall.axis
                    );
                }
                None => println!("({x}, {y}, {z}): clear"),
            }
        }
        Commands::Walk {
            keys,
            frames,
            dt,
            yaw,
            speed,
            map,
            record,
        } => {
            let held: HeldKeys = keys.parse()?;
            let script = InputFrame::hold(held, frames, dt);
            if let Some(path) = &record {
                std::fs::write(path, InputFrame::to_script_json(&script)?)?;
                tracing::info!("recorded {} frames to {}", script.len(), path.display());
            }
            let look = LookControl::new(Orientation::new(yaw.to_radians(), 0.0), 0.002);
            let player = PlayerState {
                speed,
                ..PlayerState::default()
            };
            println!("Walk: keys={held} frames={frames} dt={dt} yaw={yaw}°");
            let mut session = Session::with_look(layout, player, look)?;
            run_and_report(&mut session, &script, map)?;
        }
        Commands::Replay { script, map } => {
            let frames = InputFrame::load_script(&script)?;
            println!("Replay: {} ({} frames)", script.display(), frames.len());
            let mut session = Session::new(layout, PlayerState::default())?;
            run_and_report(&mut session, &frames, map)?;
        }
    }

    Ok(())
}

fn load_layout(path: Option<&Path>) -> anyhow::Result<RoomLayout> {
    let Some(path) = path else {
        return Ok(RoomLayout::default_box());
    };
    let layout = RoomConfig::load(path)?.to_layout()?;
    tracing::info!(
        "room loaded from {} ({} walls)",
        path.display(),
        layout.walls().len()
    );
    Ok(layout)
}

fn run_and_report(session: &mut Session, script: &[InputFrame], map: bool) -> anyhow::Result<()> {
    let start = session.player().position;
    let summary: RunSummary = session.run(script)?;
    let end = session.player().position;

    println!(
        "Frames: {} moved={} blocked={} idle={}",
        summary.frames, summary.moved, summary.blocked, summary.idle
    );
    println!(
        "Position: ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2}), travelled {:.2}",
        start.x,
        start.y,
        start.z,
        end.x,
        end.y,
        end.z,
        start.distance(end)
    );
    let first_block = session.motion().events().iter().find_map(|e| match e.outcome {
        FrameOutcome::Blocked { wall, .. } => Some((e.frame, wall)),
        _ => None,
    });
    if let Some((frame, wall)) = first_block {
        println!("First blocked at frame {frame} by wall[{wall}]");
    }
    println!("State hash: {:#018x}", session.state_hash());

    if map {
        let renderer = DebugTextRenderer::new().with_minimap(21);
        print!(
            "{}",
            renderer.render(session.layout(), session.player(), session.look())
        );
    }
    Ok(())
}
