#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line explorer for the rent map.
//!
//! Loads the boundary and rent data once, then either lists the registered
//! cities, prints the scene for a given selection as JSON, or walks the
//! hierarchy interactively.

mod config;
mod interactive;
mod surface;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rent_map_navigation::{MapController, RenderingSurface, ViewportController};
use rent_map_region::RegionDataset;
use rent_map_region::registry::all_cities;
use rent_map_rent::RentLookup;
use serde::Serialize;

use crate::config::{DATA_DIR_ENV, MapConfig};
use crate::surface::{CapturingSurface, TerminalSurface};

#[derive(Parser)]
#[command(name = "rent_map", about = "Rent price map of German cities")]
struct Cli {
    /// Config file (defaults to the built-in configuration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the boundary and rent files (overrides
    /// `RENT_MAP_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered cities
    Cities,
    /// Print the scene and camera for a selection as JSON
    Show {
        /// City to select instead of the default city
        #[arg(long)]
        city: Option<String>,
        /// District to drill into
        #[arg(long)]
        district: Option<String>,
        /// Neighborhood to focus (requires `--district`)
        #[arg(long, requires = "district")]
        neighborhood: Option<String>,
    },
    /// Explore the map interactively
    Explore,
}

/// Output of the `show` command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput<'a> {
    state: &'a rent_map_navigation::NavigationState,
    #[serde(flatten)]
    view: &'a CapturingSurface,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = MapConfig::load(cli.config.as_deref())?
        .with_data_dir(std::env::var(DATA_DIR_ENV).ok(), cli.data_dir);

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Cities => list_cities(),
        Commands::Show {
            city,
            district,
            neighborhood,
        } => {
            let mut controller = build_controller(&config, CapturingSurface::default())?;
            controller.start();

            if let Some(city) = city {
                controller.reset_to_root();
                controller.select_region(&city);
            }
            for name in [district, neighborhood].into_iter().flatten() {
                if !controller.click_feature(&name) {
                    return Err(format!(
                        "{name:?} is not shown at the {} level",
                        controller.state().current_level()
                    )
                    .into());
                }
            }

            let output = ShowOutput {
                state: controller.state(),
                view: controller.surface(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Explore => {
            let mut controller = build_controller(&config, TerminalSurface::new(std::io::stdout()))?;
            interactive::run(&mut controller)?;
        }
    }

    Ok(())
}

fn list_cities() {
    println!(
        "{:<14} {:<12} {:>9} {:>9}  {:<9} NEIGHBORHOODS",
        "ID", "NAME", "LAT", "LON", "DISTRICTS"
    );
    println!("{}", "-".repeat(72));
    for city in all_cities() {
        println!(
            "{:<14} {:<12} {:>9.4} {:>9.4}  {:<9} {}",
            city.id,
            city.name,
            city.center.lat,
            city.center.lon,
            if city.districts.is_some() { "yes" } else { "no" },
            if city.neighborhoods.is_some() { "yes" } else { "no" },
        );
    }
}

/// Loads the data named by `config` and wires it to `surface`.
fn build_controller<S: RenderingSurface>(
    config: &MapConfig,
    surface: S,
) -> Result<MapController<S>, Box<dyn std::error::Error>> {
    let cities = all_cities();
    let dataset = RegionDataset::load(&config.data_dir, &cities, config.regions.as_ref())?;

    let rent_path = config.rent_path();
    let rents = if rent_path.exists() {
        rent_map_rent::load::load_file(&rent_path)?
    } else {
        log::warn!("Rent table {} not found, showing no rents", rent_path.display());
        RentLookup::default()
    };

    Ok(MapController::new(
        dataset,
        rents,
        cities,
        &config.default_city,
        ViewportController::new(config.viewport.clone()),
        surface,
    ))
}
