//! Plots of variable-resolution grids exported as CSV.
//!
//! A grid table has one to three dimension columns (`dim0`, `dim1`, `dim2`),
//! a `resolution` column and a `value` column. [`grid_plot`] picks a plot
//! style from the number of dimension columns: value against position for 1D
//! grids, discs on a map for 2D grids, and a projected scatter for 3D grids.

use kurbo::{Affine, Line, Point, Rect, Stroke};
use parley::FontWeight;
use tracing::debug;

mod axes;
mod bounds;
mod dimension;
mod error;
mod legend;
mod render;
mod scale;
mod table;
mod theme;

pub use axes::{Axes, Camera, DiscAxes, Mark, Point3, PointAxes, Scatter3dAxes, value_label};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use dimension::{DIMENSION_PREFIX, Dimensionality, dimension_columns};
pub use error::{Error, Result};
pub use legend::Colorbar;
pub use scale::ColorScale;
pub use table::{GridRow, GridTable, RESOLUTION_COLUMN, VALUE_COLUMN};
pub use theme::{Palette, VIRIDIS};

use crate::render::{Align, CANVAS, DrawText, Render};

#[derive(Default)]
pub struct Plot<'a> {
  title: Option<String>,

  pub x: Axis,
  pub y: Axis,
  pub z: Axis,

  grid:         bool,
  equal_aspect: bool,
  axes:         Vec<Axes<'a>>,
  colorbar:     Option<Colorbar>,
}

#[derive(Default)]
pub struct Axis {
  title: Option<String>,
  min:   Option<f64>,
  max:   Option<f64>,
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }

  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  pub fn limits(&mut self, range: Range) -> &mut Self { self.min(range.min).max(range.max) }

  fn apply(&self, range: Range) -> Range {
    Range::new(self.min.unwrap_or(range.min), self.max.unwrap_or(range.max))
  }
}

/// Builds the plot for a grid: the style follows `dimensionality`, colors
/// follow `scale`, and a colorbar keyed to the same scale is attached.
pub fn grid_plot<'a>(
  dimensionality: Dimensionality,
  rows: &'a [GridRow],
  scale: ColorScale,
) -> Plot<'a> {
  let mut plot = Plot::new();

  match dimensionality {
    Dimensionality::One => {
      plot.title("1D Grid Visualization");
      plot.x.title("Position");
      plot.y.title("Value");
      plot.points(rows, scale);
    }
    Dimensionality::Two => {
      plot.title("2D Grid Visualization");
      plot.x.title("X");
      plot.y.title("Y");
      let limits = plot.discs(rows, scale).limits();
      if let Some(limits) = limits {
        plot.x.limits(limits.x);
        plot.y.limits(limits.y);
      }
      plot.equal_aspect(true).grid(true);
    }
    Dimensionality::Three => {
      plot.title("3D Grid Visualization");
      plot.x.title("X");
      plot.y.title("Y");
      plot.z.title("Z");
      plot.scatter3d(rows, scale);
    }
  }

  plot.colorbar(scale).title("Cell Value").shrink(0.75);
  debug!(?dimensionality, rows = rows.len(), "built plot");
  plot
}

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn grid(&mut self, grid: bool) -> &mut Self {
    self.grid = grid;
    self
  }

  /// Forces one data unit to span the same distance on both axes.
  pub fn equal_aspect(&mut self, equal: bool) -> &mut Self {
    self.equal_aspect = equal;
    self
  }

  pub fn colorbar(&mut self, scale: ColorScale) -> &mut Colorbar {
    self.colorbar.insert(Colorbar::new(scale))
  }

  pub fn axes(&self) -> &[Axes<'a>] { &self.axes }

  pub fn axes_mut(&mut self) -> &mut [Axes<'a>] { &mut self.axes }

  /// The data area shown, after axis limits are applied.
  pub fn data_bounds(&self) -> Bounds {
    let bounds = self
      .axes
      .iter()
      .filter_map(Axes::data_bounds)
      .reduce(|a, b| a.union(b))
      .unwrap_or_else(|| Bounds::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)));

    if self.projection_3d().is_some() {
      return bounds;
    }
    Bounds::new(self.x.apply(bounds.x), self.y.apply(bounds.y))
  }

  /// The canvas area the data is drawn in.
  pub(crate) fn viewport(&self) -> Bounds {
    let viewport = Bounds::new(
      Range::new(110.0, CANVAS.width - 210.0),
      Range::new(CANVAS.height - 100.0, 80.0),
    );

    if self.equal_aspect || self.projection_3d().is_some() {
      viewport.fit_aspect(self.data_bounds())
    } else {
      viewport
    }
  }

  fn projection_3d(&self) -> Option<&Scatter3dAxes<'a>> {
    self.axes.iter().find_map(|axes| match axes {
      Axes::Scatter3d(sa) => Some(sa),
      _ => None,
    })
  }
}

impl Plot<'_> {
  pub(crate) fn draw(&self, render: &mut Render) {
    let viewport = self.viewport();
    let data_bounds = self.data_bounds();
    let transform = data_bounds.transform_to(viewport);

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 28.0,
        weight: FontWeight::BOLD,
        position: Point::new(viewport.x.center(), viewport.y.max - 20.0),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    match self.projection_3d() {
      Some(sa) => self.draw_titles_3d(render, sa, transform),
      None => self.draw_frame(render, viewport, data_bounds, transform),
    }

    for axes in &self.axes {
      axes.draw(render, transform);
    }

    if let Some(colorbar) = &self.colorbar {
      colorbar.draw(render, viewport);
    }
  }

  fn draw_frame(&self, render: &mut Render, viewport: Bounds, data: Bounds, transform: Affine) {
    const TICKS: u32 = 8;

    let border_stroke = Stroke::new(1.5);
    let grid_stroke = Stroke::new(1.0);
    let frame = Rect::new(viewport.x.min, viewport.y.max, viewport.x.max, viewport.y.min);

    let iter = data.y.nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      if self.grid {
        let line = Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.max, vy));
        render.stroke(&line, Affine::IDENTITY, theme::GRID_COLOR, &grid_stroke);
      }
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 8.0, vy)),
        Affine::IDENTITY,
        theme::LINE_COLOR,
        &border_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: 12.0,
        position: Point::new(viewport.x.min - 12.0, vy),
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = data.x.nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      if self.grid {
        let line = Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.max));
        render.stroke(&line, Affine::IDENTITY, theme::GRID_COLOR, &grid_stroke);
      }
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 8.0)),
        Affine::IDENTITY,
        theme::LINE_COLOR,
        &border_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        size: 12.0,
        position: Point::new(vx, viewport.y.min + 12.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    render.stroke(&frame, Affine::IDENTITY, theme::LINE_COLOR, &border_stroke);

    if let Some(x_title) = &self.x.title {
      render.draw_text(DrawText {
        text: x_title,
        size: 18.0,
        position: Point::new(viewport.x.center(), viewport.y.min + 36.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_title) = &self.y.title {
      render.draw_text(DrawText {
        text: y_title,
        size: 18.0,
        position: Point::new(viewport.x.min - 60.0, viewport.y.center()),
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }
  }

  fn draw_titles_3d(&self, render: &mut Render, axes: &Scatter3dAxes, transform: Affine) {
    for (i, axis) in [&self.x, &self.y, &self.z].into_iter().enumerate() {
      let Some(title) = &axis.title else { continue };
      render.draw_text(DrawText {
        text: title,
        size: 18.0,
        position: axes.title_anchor(i, transform),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rows_2d() -> Vec<GridRow> {
    vec![
      GridRow { position: vec![0.0, 0.0], resolution: 0.2, value: 10.0 },
      GridRow { position: vec![10.0, 10.0], resolution: 0.5, value: 0.0 },
    ]
  }

  #[test]
  fn two_dimensions_pad_limits() {
    let rows = rows_2d();
    let plot = grid_plot(Dimensionality::Two, &rows, ColorScale::new(Range::new(0.0, 10.0)));
    let bounds = plot.data_bounds();

    assert_eq!(bounds.x, Range::new(-1.0, 11.0));
    assert_eq!(bounds.y, Range::new(-1.0, 11.0));
    assert!(matches!(plot.axes(), [Axes::Discs(_)]));
  }

  #[test]
  fn two_dimensions_use_equal_aspect() {
    let rows = vec![
      GridRow { position: vec![0.0, 0.0], resolution: 0.2, value: 1.0 },
      GridRow { position: vec![10.0, 2.0], resolution: 0.5, value: 2.0 },
    ];
    let plot = grid_plot(Dimensionality::Two, &rows, ColorScale::new(Range::new(1.0, 2.0)));

    let [sx, _, _, sy, _, _] = plot.data_bounds().transform_to(plot.viewport()).as_coeffs();
    assert!((sx + sy).abs() < 1e-9);
  }

  #[test]
  fn dimensionality_selects_style() {
    let scale = ColorScale::new(Range::new(0.0, 1.0));
    let one = [GridRow { position: vec![0.0], resolution: 1.0, value: 0.0 }];
    let three = [GridRow { position: vec![0.0, 1.0, 2.0], resolution: 1.0, value: 1.0 }];

    assert!(matches!(grid_plot(Dimensionality::One, &one, scale).axes(), [Axes::Points(_)]));
    assert!(matches!(
      grid_plot(Dimensionality::Three, &three, scale).axes(),
      [Axes::Scatter3d(_)]
    ));
  }

  #[test]
  fn axis_limits_override_data() {
    let rows = [GridRow { position: vec![0.0], resolution: 1.0, value: 4.0 }];
    let mut plot = Plot::new();
    plot.points(&rows, ColorScale::new(Range::new(4.0, 4.0)));
    plot.y.min(0.0);

    let bounds = plot.data_bounds();
    assert_eq!(bounds.y, Range::new(0.0, 4.5));
    assert_eq!(bounds.x, Range::new(-0.5, 0.5));
  }

  #[test]
  fn every_plot_has_a_colorbar() {
    let rows = rows_2d();
    let scale = ColorScale::new(Range::new(0.0, 10.0));
    let plot = grid_plot(Dimensionality::Two, &rows, scale);

    let colorbar = plot.colorbar.as_ref().unwrap();
    assert_eq!(colorbar.scale().range(), Range::new(0.0, 10.0));
  }
}
