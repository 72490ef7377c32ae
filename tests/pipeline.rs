use std::{fs, path::PathBuf};

use gridplot::{
  Axes, Camera, ColorScale, Dimensionality, Error, GridRow, GridTable, Plot, Range, VIRIDIS,
  grid_plot,
};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
  let path = dir.path().join(name);
  fs::write(&path, contents).unwrap();
  path
}

fn plot_for(table: &GridTable) -> (Dimensionality, Vec<GridRow>, ColorScale) {
  let dimensionality = table.dimensionality().unwrap();
  let scale = ColorScale::new(table.value_range().unwrap());
  (dimensionality, table.rows().unwrap(), scale)
}

#[test]
fn one_dimensional_grid() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_csv(
    &dir,
    "grid_output_1d.csv",
    "dim0,resolution,value\n0.0,0.1,1.0\n0.5,0.2,4.0\n1.0,0.4,9.0\n",
  );

  let table = GridTable::open(&path).unwrap();
  let (dimensionality, rows, scale) = plot_for(&table);
  assert_eq!(dimensionality, Dimensionality::One);

  let plot = grid_plot(dimensionality, &rows, scale);
  let [Axes::Points(points)] = plot.axes() else { panic!("expected a point plot") };
  let marks = points.marks();

  assert_eq!(marks.len(), 3);
  assert_eq!(marks[1].position.x, 0.5);
  assert_eq!(marks[1].position.y, 4.0);
  assert!((marks[2].size - 8.0).abs() < 1e-9);
  assert_eq!(marks.iter().map(|m| m.label.as_str()).collect::<Vec<_>>(), ["1.0", "4.0", "9.0"]);
}

#[test]
fn two_dimensional_grid() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_csv(
    &dir,
    "grid_output_2d.csv",
    "dim0,dim1,resolution,value\n0,0,0.2,10.0\n10,10,0.5,0.0\n4,7,0.5,5.3\n",
  );

  let table = GridTable::open(&path).unwrap();
  let (dimensionality, rows, scale) = plot_for(&table);
  assert_eq!(dimensionality, Dimensionality::Two);

  let plot = grid_plot(dimensionality, &rows, scale);
  let [Axes::Discs(discs)] = plot.axes() else { panic!("expected a disc map") };
  let marks = discs.marks();

  assert_eq!(marks[0].size, 0.1);
  assert_eq!(marks[1].size, 0.25);
  assert_eq!(marks[2].label, "5.3");

  // Highest value maps to the bright end of the palette, lowest to the dark end.
  assert_eq!(marks[0].color.to_rgba8(), scale.color(10.0).to_rgba8());
  assert_eq!(marks[1].color.to_rgba8(), VIRIDIS.color(0.0).to_rgba8());

  let bounds = plot.data_bounds();
  assert_eq!(bounds.x, Range::new(-1.0, 11.0));
  assert_eq!(bounds.y, Range::new(-1.0, 11.0));
}

#[test]
fn three_dimensional_grid() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_csv(
    &dir,
    "grid_output_3d.csv",
    "dim0,dim1,dim2,resolution,value\n0,0,0,0.3,1.5\n8,8,8,0.7,2.5\n",
  );

  let table = GridTable::open(&path).unwrap();
  let (dimensionality, rows, scale) = plot_for(&table);
  assert_eq!(dimensionality, Dimensionality::Three);

  let plot = grid_plot(dimensionality, &rows, scale);
  let [Axes::Scatter3d(scatter)] = plot.axes() else { panic!("expected a 3D scatter") };
  let marks = scatter.marks();

  assert!((marks[0].size - 60.0).abs() < 1e-9);
  assert!((marks[1].size - 140.0).abs() < 1e-9);
  assert_eq!(marks[0].position.z, 0.0);
  assert_eq!(marks[1].label, "2.5");
  assert_eq!(scatter.draw_order(&marks).len(), 2);
}

#[test]
fn dimension_columns_anywhere_in_header() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_csv(&dir, "grid.csv", "value,dim1,resolution,dim0\n3.0,1.0,0.5,2.0\n");

  let table = GridTable::open(&path).unwrap();
  assert_eq!(table.dimension_columns(), ["dim1", "dim0"]);

  let rows = table.rows().unwrap();
  assert_eq!(rows[0].position, [1.0, 2.0]);
}

#[test]
fn four_dimensions_are_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let path =
    write_csv(&dir, "grid.csv", "dim0,dim1,dim2,dim3,resolution,value\n0,0,0,0,1.0,1.0\n");

  let table = GridTable::open(&path).unwrap();
  let err = table.dimensionality().unwrap_err();

  assert!(matches!(err, Error::TooManyDimensions { count: 4 }));
  assert!(err.to_string().starts_with("Cannot visualize more than 3 dimensions (found 4)"));
}

#[test]
fn no_dimensions_are_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let path = write_csv(&dir, "grid.csv", "x,resolution,value\n0,1.0,1.0\n");

  let table = GridTable::open(&path).unwrap();
  assert!(matches!(table.dimensionality(), Err(Error::NoDimensions)));
}

#[test]
fn missing_file_is_reported() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("grid_output_2d.csv");

  let Err(err) = GridTable::open(&path) else { panic!("expected an error") };
  assert!(matches!(err, Error::FileNotFound { .. }));
  assert!(err.to_string().contains("not found"));
}

#[test]
fn camera_can_be_repointed() {
  let rows = [GridRow { position: vec![0.0, 0.0, 0.0], resolution: 1.0, value: 0.0 }];
  let mut plot = Plot::new();
  plot.scatter3d(&rows, ColorScale::new(Range::new(0.0, 1.0)));

  let before = plot.data_bounds();
  for axes in plot.axes_mut() {
    if let Axes::Scatter3d(scatter) = axes {
      scatter.camera(Camera { azimuth: 0.0, elevation: 0.0 });
    }
  }
  let after = plot.data_bounds();

  // Looking straight down the x axis, only the y extent spans the screen.
  assert!((after.width() - before.width()).abs() > 1e-6);
}
