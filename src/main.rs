use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tessera_world::{TerrainError, TerrainGenerator, WorldGenConfig, load_config_from_path};

mod render;
mod watch;

#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(about = "Sample a seeded infinite 2D terrain")]
struct Cli {
    /// World seed; overrides the seed in the config file
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Worldgen TOML config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one tile as JSON
    Tile {
        #[arg(long, allow_negative_numbers = true)]
        x: i32,
        #[arg(long, allow_negative_numbers = true)]
        y: i32,
    },
    /// Print an ASCII biome map of a region
    Map {
        #[command(flatten)]
        region: Region,
        /// Re-render whenever the config file changes
        #[arg(long)]
        watch: bool,
    },
    /// Print biome and rarity counts for a region
    Stats {
        #[command(flatten)]
        region: Region,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct Region {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    x: i32,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    y: i32,
    #[arg(short = 'W', long, default_value_t = 80)]
    width: u32,
    #[arg(short = 'H', long, default_value_t = 40)]
    height: u32,
}

fn load_config(cli: &Cli) -> Result<WorldGenConfig, TerrainError> {
    let mut cfg = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => WorldGenConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }
    Ok(cfg)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let generator = TerrainGenerator::from_config(&cfg)?;
    log::info!(
        "terrain generator ready (seed {}, chunk size {})",
        generator.seed(),
        generator.chunk_size()
    );

    match cli.command {
        Command::Tile { x, y } => {
            let tile = generator.get_terrain_data(x, y);
            println!("{}", serde_json::to_string_pretty(&*tile)?);
        }
        Command::Map { region, watch } => {
            generator.update_cache_size(region.width, region.height, None);
            let map =
                render::ascii_map(&generator, region.x, region.y, region.width, region.height);
            print!("{}", map);
            if watch {
                let Some(path) = cli.config.clone() else {
                    return Err("--watch needs --config <path>".into());
                };
                watch::rerender_on_change(&generator, &path, |g| {
                    let map = render::ascii_map(g, region.x, region.y, region.width, region.height);
                    print!("{}", map);
                })?;
            }
        }
        Command::Stats { region } => {
            generator.update_cache_size(region.width, region.height, None);
            let report =
                render::region_stats(&generator, region.x, region.y, region.width, region.height);
            print!("{}", report);
        }
    }
    Ok(())
}
