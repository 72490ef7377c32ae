use kurbo::{Affine, Circle, Point};

use crate::{
  Bounds,
  axes::{Mark, value_label},
  render::{Align, DrawText, Render},
  scale::ColorScale,
  table::GridRow,
};

/// Marker diameter, in canvas points, per unit of resolution.
pub const MARKER_SIZE_PER_RESOLUTION: f64 = 20.0;

/// Cells of a 1D grid, plotted as position against value.
pub struct PointAxes<'a> {
  rows:  &'a [GridRow],
  scale: ColorScale,
}

impl<'a> PointAxes<'a> {
  pub(crate) fn new(rows: &'a [GridRow], scale: ColorScale) -> Self { PointAxes { rows, scale } }

  pub fn marks(&self) -> Vec<Mark<Point>> {
    self
      .rows
      .iter()
      .map(|row| Mark {
        position: Point::new(row.position[0], row.value),
        size:     row.resolution * MARKER_SIZE_PER_RESOLUTION,
        color:    self.scale.color(row.value),
        label:    value_label(row.value),
      })
      .collect()
  }

  pub fn data_bounds(&self) -> Option<Bounds> {
    Bounds::from_points(self.marks().iter().map(|m| m.position)).map(|b| b.margin(0.1))
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    let marks = self.marks();

    for mark in &marks {
      let marker = Circle::new(transform * mark.position, mark.size / 2.0);
      render.fill(&marker, Affine::IDENTITY, mark.color);
    }

    for mark in &marks {
      render.draw_text(DrawText {
        text: &mark.label,
        size: 9.0,
        position: transform * mark.position,
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }
  }
}
