//! Trailmark - map-based workout log
//!
//! Command-line front end. Drives the workout tracker with a console view,
//! a logging map and the home position from the configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Stdout;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trailmark::storage::{self, config, SnapshotStore};
use trailmark::tracker::{ConsoleView, FixedPosition, FormFields, LoggingMap, WorkoutTracker};
use trailmark::workouts::{Coordinates, WorkoutKind};
use uuid::Uuid;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

type CliTracker =
    WorkoutTracker<Box<dyn SnapshotStore>, LoggingMap, FixedPosition, ConsoleView<Stdout>>;

#[derive(Parser, Debug)]
#[command(name = "trailmark", version, about = "Map-based workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved workouts (the default)
    List,
    /// Add a run or a ride at a position
    Add {
        /// running or cycling
        kind: WorkoutKind,
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lng: f64,
        /// Distance in km
        distance: String,
        /// Duration in minutes
        duration: String,
        /// Cadence in steps/min for runs, elevation gain in m for rides
        #[arg(allow_negative_numbers = true)]
        extra: String,
    },
    /// Center the map on a workout
    Focus {
        /// Workout id
        id: Uuid,
    },
    /// Delete every saved workout
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Trailmark v{}", env!("CARGO_PKG_VERSION"));

    let config = config::init_config().context("Failed to load configuration")?;
    let store = storage::open_store(&config).context("Failed to open workout storage")?;
    let has_home = config.map.home.is_some();

    let mut tracker: CliTracker = WorkoutTracker::new(
        store,
        LoggingMap::new(),
        FixedPosition::new(config.map.home),
        ConsoleView::new(std::io::stdout()),
        &config.map,
    );

    match cli.command.unwrap_or(Command::List) {
        Command::List => {
            if tracker.load_from_persistence().is_empty() {
                println!("No workouts yet.");
            }
        }
        Command::Add {
            kind,
            lat,
            lng,
            distance,
            duration,
            extra,
        } => {
            let fields = FormFields {
                kind,
                distance,
                duration,
                cadence: extra.clone(),
                elevation: extra,
            };
            add(&mut tracker, has_home, Coordinates::new(lat, lng), &fields)?;
        }
        Command::Focus { id } => {
            tracker.start()?;
            tracker.list_item_clicked(id)?;
            if let Some((coords, zoom)) = tracker.map().view() {
                println!("Map centered on {} at zoom {}", coords, zoom);
            }
        }
        Command::Reset => tracker.reset_all()?,
    }

    Ok(())
}

/// Add a workout through the map form when a home position gives us a map,
/// or straight into the collection otherwise.
fn add(
    tracker: &mut CliTracker,
    has_home: bool,
    coords: Coordinates,
    fields: &FormFields,
) -> Result<()> {
    if has_home {
        tracker.start()?;
    } else {
        tracker.load_from_persistence();
    }

    let workout = if tracker.is_map_ready() {
        tracker.map_clicked(coords)?;
        tracker.kind_changed(fields.kind);
        tracker.submit_form(fields)?
    } else {
        tracker.add_entry(coords, fields.to_input())?
    };

    println!("Added {} ({})", workout.description(), workout.id());
    Ok(())
}
