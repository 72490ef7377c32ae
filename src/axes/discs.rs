use kurbo::{Affine, Circle, Ellipse, Point, Stroke};
use peniko::{Brush, Color};

use crate::{
  Bounds,
  axes::{Mark, value_label},
  render::{Align, DrawText, Render},
  scale::ColorScale,
  table::GridRow,
};

/// Disc radius, in data units, per unit of resolution.
pub const RADIUS_PER_RESOLUTION: f64 = 0.5;

/// Space added around the cell centers' bounding box, in data units.
pub const PADDING: f64 = 1.0;

const EDGE_WIDTH: f64 = 0.4;

/// Cells of a 2D grid, drawn as discs sized by resolution.
pub struct DiscAxes<'a> {
  rows:  &'a [GridRow],
  scale: ColorScale,
}

impl<'a> DiscAxes<'a> {
  pub(crate) fn new(rows: &'a [GridRow], scale: ColorScale) -> Self { DiscAxes { rows, scale } }

  /// Marks sized by radius.
  pub fn marks(&self) -> Vec<Mark<Point>> {
    self
      .rows
      .iter()
      .map(|row| Mark {
        position: Point::new(row.position[0], row.position[1]),
        size:     row.resolution * RADIUS_PER_RESOLUTION,
        color:    self.scale.color(row.value),
        label:    value_label(row.value),
      })
      .collect()
  }

  /// The axis limits: the cell centers' bounding box, padded on every side.
  pub fn limits(&self) -> Option<Bounds> {
    Bounds::from_points(self.rows.iter().map(|row| Point::new(row.position[0], row.position[1])))
      .map(|b| b.expand(PADDING))
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    let marks = self.marks();
    let edge = Stroke::new(EDGE_WIDTH);

    for mark in &marks {
      let disc = transform * Ellipse::from(Circle::new(mark.position, mark.size));
      render.fill(&disc, Affine::IDENTITY, mark.color);
      render.stroke(&disc, Affine::IDENTITY, Color::BLACK, &edge);
    }

    for mark in &marks {
      render.draw_text(DrawText {
        text: &mark.label,
        size: 9.0,
        brush: Brush::Solid(Color::WHITE),
        position: transform * mark.position,
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }
  }
}
