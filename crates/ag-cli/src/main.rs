//! Area generator driver
//!
//! Builds a world grid, generates one Area and prints its layout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ag_core::dungeon::RoomGenerator;
use ag_core::world::{AreaGroup, Biome, DefaultThemes, GridMap, MemoryScene, Prototype, SpawnCommand, WorldMap};
use ag_core::{GenRng, GeneratorConfig, Point};

/// Procedural dungeon-area generator
#[derive(Parser, Debug)]
#[command(name = "areagen")]
#[command(author, version, about = "Generate and inspect dungeon areas", long_about = None)]
struct Args {
    /// Map seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Area column in the world grid
    #[arg(short = 'x', long = "x", default_value_t = 0)]
    x: i32,

    /// Area row in the world grid
    #[arg(short = 'y', long = "y", default_value_t = 0)]
    y: i32,

    /// World grid width in areas
    #[arg(long = "map-width", default_value_t = 3)]
    map_width: usize,

    /// World grid height in areas
    #[arg(long = "map-height", default_value_t = 3)]
    map_height: usize,

    /// Generator config file (JSON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Tile grid width, overrides the config
    #[arg(long = "width")]
    width: Option<usize>,

    /// Tile grid height, overrides the config
    #[arg(long = "height")]
    height: Option<usize>,

    /// Minimum room count, overrides the config
    #[arg(long = "min-rooms")]
    min_rooms: Option<usize>,

    /// Target room count, overrides the config
    #[arg(long = "target-rooms")]
    target_rooms: Option<usize>,

    /// Biome of the world's single area group (c, html, python)
    #[arg(short = 'b', long = "biome", default_value = "python")]
    biome: Biome,

    /// Print the generated layout as JSON instead of ASCII
    #[arg(long = "json")]
    json: bool,

    /// Run show/hide/release against an in-memory scene and report counts
    #[arg(long = "lifecycle")]
    lifecycle: bool,

    /// Pin the area with this many quest objects before the lifecycle run
    #[arg(long = "quest")]
    quest: Option<u32>,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<GeneratorConfig, String> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_from_file(path)
            .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
        None => GeneratorConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(min_rooms) = args.min_rooms {
        config.min_rooms = min_rooms;
    }
    if let Some(target_rooms) = args.target_rooms {
        config.target_rooms = target_rooms;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), String> {
    let config = build_config(args)?;
    let generator = RoomGenerator::new(config).map_err(|e| e.to_string())?;

    let seed = args.seed.unwrap_or_else(|| GenRng::from_entropy().next_seed());
    let mut map = GridMap::new(args.map_width, args.map_height, seed);
    let group = Arc::new(AreaGroup::new(0, args.biome));
    map.assign_group(&group);

    let position = Point::new(args.x, args.y);
    if !map.within_bounds(position) {
        return Err(format!(
            "area {} is outside the {}x{} map",
            position, args.map_width, args.map_height
        ));
    }
    let map_seed = map.seed();
    let neighbors = {
        let area = map.area(position).ok_or_else(|| format!("no area at {}", position))?;
        area.neighbors(&map).len()
    };
    let area = map
        .area_mut(position)
        .ok_or_else(|| format!("no area at {}", position))?;

    area.generate_area(&generator).map_err(|e| e.to_string())?;
    tracing::info!("generated area {} (map seed {})", position, map_seed);

    if args.json {
        let layout = serde_json::json!({
            "map_seed": map_seed,
            "position": area.position(),
            "seed": area.seed(),
            "rooms": area.rooms(),
            "corridors": area.corridors(),
            "portals": area.portals(),
            "tiles": area.tiles(),
        });
        let json = serde_json::to_string_pretty(&layout).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else if let Some(tiles) = area.tiles() {
        println!("{}", tiles.render_ascii());
        println!(
            "map seed {} | area {} seed {} | {} rooms | {} corridor cells | {} portals | {} neighbors",
            map_seed,
            area.position(),
            area.seed(),
            area.room_count(),
            area.corridors().len(),
            area.portals().len(),
            neighbors
        );
        if let Some(spawn) = area.default_spawn() {
            println!("default spawn {}", spawn);
        }
    }

    if args.lifecycle {
        let themes = DefaultThemes::new();
        let mut scene = MemoryScene::new();

        if let Some(quantity) = args.quest {
            let command = SpawnCommand::new(Prototype::new("quest_item", 1.0), quantity);
            let room = area
                .execute_spawn_command(&command, &generator)
                .map_err(|e| e.to_string())?;
            println!("quest placed in room {}", room);
        }

        area.show_area(&generator, &themes, &mut scene)
            .map_err(|e| e.to_string())?;
        println!("shown: {} objects ({} active)", scene.live_count(), scene.active_count());

        area.hide_area(&mut scene);
        println!("hidden: {} objects ({} active)", scene.live_count(), scene.active_count());

        let outcome = area.release_data(&mut scene);
        println!(
            "released ({:?}): {} objects, state {:?}",
            outcome,
            scene.live_count(),
            area.state()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
