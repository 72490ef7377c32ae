mod discs;
mod points;
mod scatter3d;

pub use discs::DiscAxes;
pub use points::PointAxes;
pub use scatter3d::{Camera, Point3, Scatter3dAxes};

use kurbo::Affine;
use peniko::Color;

use crate::{Bounds, Plot, render::Render, scale::ColorScale, table::GridRow};

pub enum Axes<'a> {
  Points(PointAxes<'a>),
  Discs(DiscAxes<'a>),
  Scatter3d(Scatter3dAxes<'a>),
}

/// One drawn grid cell: where it goes, how big it is, its color and label.
#[derive(Debug, Clone)]
pub struct Mark<P> {
  pub position: P,
  pub size:     f64,
  pub color:    Color,
  pub label:    String,
}

/// The text printed next to every cell.
pub fn value_label(value: f64) -> String { format!("{value:.1}") }

impl<'a> Plot<'a> {
  pub fn points(&mut self, rows: &'a [GridRow], scale: ColorScale) -> &mut PointAxes<'a> {
    self.axes.push(Axes::Points(PointAxes::new(rows, scale)));
    match self.axes.last_mut() {
      Some(Axes::Points(pa)) => pa,
      _ => unreachable!(),
    }
  }

  pub fn discs(&mut self, rows: &'a [GridRow], scale: ColorScale) -> &mut DiscAxes<'a> {
    self.axes.push(Axes::Discs(DiscAxes::new(rows, scale)));
    match self.axes.last_mut() {
      Some(Axes::Discs(da)) => da,
      _ => unreachable!(),
    }
  }

  pub fn scatter3d(&mut self, rows: &'a [GridRow], scale: ColorScale) -> &mut Scatter3dAxes<'a> {
    self.axes.push(Axes::Scatter3d(Scatter3dAxes::new(rows, scale)));
    match self.axes.last_mut() {
      Some(Axes::Scatter3d(sa)) => sa,
      _ => unreachable!(),
    }
  }
}

impl Axes<'_> {
  /// Bounds in the 2D space the axes draw in. For 3D axes, this is the
  /// projected bounding box.
  pub(crate) fn data_bounds(&self) -> Option<Bounds> {
    match self {
      Axes::Points(pa) => pa.data_bounds(),
      Axes::Discs(da) => da.limits(),
      Axes::Scatter3d(sa) => Some(sa.projected_bounds()),
    }
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    match self {
      Axes::Points(pa) => pa.draw(render, transform),
      Axes::Discs(da) => da.draw(render, transform),
      Axes::Scatter3d(sa) => sa.draw(render, transform),
    }
  }
}
