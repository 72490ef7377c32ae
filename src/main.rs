//! Plots a grid exported by the variable-resolution grid generator.
//!
//! # Usage
//!
//! ```bash
//! gridplot                              # plots ./grid_output_2d.csv in a window
//! gridplot grid_output_3d.csv --save grid.png
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use gridplot::{Axes, Camera, ColorScale, GridTable, Plot, Result, grid_plot};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridplot")]
#[command(about = "Plot a variable-resolution grid exported as CSV")]
struct Args {
  /// CSV file with dim* columns, a resolution column and a value column
  #[arg(default_value = "grid_output_2d.csv")]
  path: PathBuf,

  /// Write the plot to this PNG file instead of opening a window
  #[arg(long)]
  save: Option<PathBuf>,

  /// Camera azimuth for 3D grids, in degrees
  #[arg(long, default_value_t = -60.0, allow_negative_numbers = true)]
  azimuth: f64,

  /// Camera elevation for 3D grids, in degrees
  #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
  elevation: f64,
}

fn main() -> ExitCode {
  init_logging();

  let args = Args::parse();
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      // Printed directly so that no log filter can hide it.
      eprintln!("Error: {e}");
      ExitCode::FAILURE
    }
  }
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn run(args: &Args) -> Result<()> {
  let table = GridTable::open(&args.path)?;
  let dimensionality = table.dimensionality()?;

  let scale = ColorScale::new(table.value_range()?);
  let rows = table.rows()?;

  let mut plot = grid_plot(dimensionality, &rows, scale);
  point_camera(&mut plot, args);

  match &args.save {
    Some(path) => plot.save(path),
    None => {
      info!("showing plot, close the window or press q to exit");
      plot.show()
    }
  }
}

fn point_camera(plot: &mut Plot, args: &Args) {
  let camera =
    Camera { azimuth: args.azimuth.to_radians(), elevation: args.elevation.to_radians() };

  for axes in plot.axes_mut() {
    if let Axes::Scatter3d(sa) = axes {
      sa.camera(camera);
    }
  }
}
