use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tilewalk_common::TextureHandle;
use tilewalk_input::{Direction, HeldDirections, apply};
use tilewalk_kernel::{FrameClock, FrameTimer, SimConfig, World, WorldEvent};
use tilewalk_render::{DebugTextRenderer, DrawList, Renderer, SceneRenderer};
use tilewalk_tilemap::TileMap;
use tilewalk_tools::WorldInspector;

const TILE_SHEET: TextureHandle = TextureHandle(0);
const PLAYER: TextureHandle = TextureHandle(1);

#[derive(Parser)]
#[command(name = "tilewalk-cli", about = "CLI tool for tilewalk levels")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config overriding the defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default configuration
    Info,
    /// Load a map file and report its layout
    Validate {
        /// Map file: whitespace-separated two-digit tile codes
        map: PathBuf,
    },
    /// Run a headless simulation with directions held down
    Simulate {
        map: PathBuf,
        /// Number of frames to step
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Direction held for the whole run (repeatable)
        #[arg(long, value_enum)]
        hold: Vec<HoldArg>,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Step an idle level and dump the last frame
    Render {
        map: PathBuf,
        /// Number of frames to step before rendering
        #[arg(short, long, default_value = "1")]
        frames: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HoldArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<HoldArg> for Direction {
    fn from(arg: HoldArg) -> Self {
        match arg {
            HoldArg::Up => Direction::Up,
            HoldArg::Down => Direction::Down,
            HoldArg::Left => Direction::Left,
            HoldArg::Right => Direction::Right,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("tilewalk-cli v{}", env!("CARGO_PKG_VERSION"));
            print!("{}", config.to_yaml()?);
        }
        Commands::Validate { map } => {
            let map = load_map(&map, &config)?;
            println!(
                "OK: {}x{} tiles ({}x{} px), {} structural",
                map.columns(),
                map.rows(),
                map.width(),
                map.height(),
                map.structural_count()
            );
        }
        Commands::Simulate {
            map,
            frames,
            hold,
            json,
        } => {
            let (mut world, player) = World::from_config(load_map(&map, &config)?, &config, PLAYER);
            let mut clock = FrameClock::fixed(config.fixed_delta);
            let mut timer = FrameTimer::new(60);
            let mut keys = HeldDirections::new();

            if let Some(entity) = world.entity_mut(player) {
                for action in hold.into_iter().filter_map(|d| keys.press(d.into())) {
                    apply(action, entity, config.entity_speed, config.fixed_delta);
                }
            }
            let tally = run_frames(&mut world, &mut clock, &mut timer, frames);

            let summary = WorldInspector::summary(&world);
            let entities = WorldInspector::entities(&world);
            if json {
                let out = serde_json::json!({ "summary": summary, "entities": entities });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{summary}");
                for info in &entities {
                    println!("  {info}");
                }
            }
            tracing::info!(
                wall_hits = tally.wall_hits,
                entity_hits = tally.entity_hits,
                bound_hits = tally.bound_hits,
                camera_clamps = tally.camera_clamps,
                avg_fps = timer.average_fps(),
                max_step_us = timer.max().as_micros() as u64,
                "simulation finished"
            );
        }
        Commands::Render { map, frames } => {
            let (mut world, _) = World::from_config(load_map(&map, &config)?, &config, PLAYER);
            let mut clock = FrameClock::fixed(config.fixed_delta);
            let mut timer = FrameTimer::new(60);
            run_frames(&mut world, &mut clock, &mut timer, frames);

            print!("{}", DebugTextRenderer::new().render(&world));
            let mut list = DrawList::new();
            let stats = SceneRenderer::new(TILE_SHEET).render_into(&world, &mut list);
            println!(
                "Frame: {} draw calls ({} tiles, {} culled, {} entities)",
                list.len(),
                stats.tiles_drawn,
                stats.tiles_culled,
                stats.entities_drawn
            );
        }
    }

    Ok(())
}

fn load_map(path: &Path, config: &SimConfig) -> anyhow::Result<TileMap> {
    TileMap::load(path, &config.map).with_context(|| format!("loading map {}", path.display()))
}

/// Event counts over a run; the world log is drained every frame.
#[derive(Debug, Default)]
struct EventTally {
    wall_hits: u64,
    entity_hits: u64,
    bound_hits: u64,
    camera_clamps: u64,
}

impl EventTally {
    fn add(&mut self, events: Vec<WorldEvent>) {
        for event in events {
            match event {
                WorldEvent::WallHit { .. } => self.wall_hits += 1,
                WorldEvent::EntityHit { .. } => self.entity_hits += 1,
                WorldEvent::BoundHit { .. } => self.bound_hits += 1,
                WorldEvent::CameraClamped { .. } => self.camera_clamps += 1,
                WorldEvent::Spawned { .. } | WorldEvent::Stepped { .. } => {}
            }
        }
    }
}

fn run_frames(
    world: &mut World,
    clock: &mut FrameClock,
    timer: &mut FrameTimer,
    frames: u64,
) -> EventTally {
    let mut tally = EventTally::default();
    world.drain_events();
    for _ in 0..frames {
        let started = Instant::now();
        world.step(clock.tick());
        timer.record(started.elapsed());
        tally.add(world.drain_events());
    }
    tracing::debug!(?tally, "events over run");
    tally
}
