use kurbo::{Affine, Line, Point, Rect, Stroke};
use peniko::Brush;

use crate::{
  Bounds, Range,
  render::{Align, DrawText, Render},
  scale::ColorScale,
  theme,
};

/// A vertical color ramp keyed to a plot's color scale.
pub struct Colorbar {
  scale:  ColorScale,
  title:  Option<String>,
  shrink: f64,
}

impl Colorbar {
  pub(crate) fn new(scale: ColorScale) -> Self { Colorbar { scale, title: None, shrink: 1.0 } }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  /// Fraction of the axes height the bar spans.
  pub fn shrink(&mut self, fract: f64) -> &mut Self {
    self.shrink = fract;
    self
  }

  pub fn scale(&self) -> &ColorScale { &self.scale }

  /// The value range shown along the bar.
  pub fn display_range(&self) -> Range { self.scale.range().margin(0.0) }

  /// Places the bar to the right of `viewport` (the axes area).
  pub(crate) fn rect(&self, viewport: Bounds) -> Rect {
    const GAP: f64 = 40.0;
    const WIDTH: f64 = 24.0;

    let height = viewport.height().abs() * self.shrink;
    let center = viewport.y.center();
    let left = viewport.x.min.max(viewport.x.max) + GAP;

    Rect::new(left, center - height / 2.0, left + WIDTH, center + height / 2.0)
  }

  pub(crate) fn draw(&self, render: &mut Render, viewport: Bounds) {
    const STEPS: usize = 128;
    const TICKS: u32 = 6;

    let rect = self.rect(viewport);
    let range = self.display_range();
    let bar = Bounds::new(Range::new(rect.x0, rect.x1), Range::new(rect.y1, rect.y0));
    let to_bar = |value: f64| bar.y.min + range.normalize(value) * bar.height();

    for step in 0..STEPS {
      let lo = range.min + range.size() * step as f64 / STEPS as f64;
      let hi = range.min + range.size() * (step + 1) as f64 / STEPS as f64;
      let color = self.scale.color((lo + hi) / 2.0);

      // Overlap slightly, so slices don't leave seams.
      let slice = Rect::new(rect.x0, to_bar(hi) - 0.5, rect.x1, to_bar(lo) + 0.5)
        .intersect(rect);
      render.fill(&slice, Affine::IDENTITY, color);
    }

    render.stroke(&rect, Affine::IDENTITY, theme::LINE_COLOR, &Stroke::new(1.0));

    let ticks = range.nice_ticks(TICKS);
    let decimals = ticks.decimals();
    for value in ticks.filter(|v| range.contains(v)) {
      let y = to_bar(value);
      render.stroke(
        &Line::new(Point::new(rect.x1, y), Point::new(rect.x1 + 6.0, y)),
        Affine::IDENTITY,
        theme::LINE_COLOR,
        &Stroke::new(1.0),
      );
      render.draw_text(DrawText {
        text: &format!("{value:.decimals$}"),
        size: 12.0,
        position: Point::new(rect.x1 + 10.0, y),
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 18.0,
        brush: Brush::Solid(theme::TEXT_COLOR),
        position: Point::new(rect.x1 + 70.0, rect.center().y),
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
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

  #[test]
  fn bar_is_centered_beside_axes() {
    let mut colorbar = Colorbar::new(ColorScale::new(Range::new(0.0, 1.0)));
    colorbar.shrink(0.75);

    let viewport = Bounds::new(Range::new(100.0, 900.0), Range::new(900.0, 100.0));
    let rect = colorbar.rect(viewport);

    assert_eq!(rect.x0, 940.0);
    assert_eq!(rect.height(), 600.0);
    assert_eq!(rect.center().y, 500.0);
  }

  #[test]
  fn single_value_still_spans() {
    let colorbar = Colorbar::new(ColorScale::new(Range::new(4.0, 4.0)));
    assert_eq!(colorbar.display_range(), Range::new(3.5, 4.5));
  }
}
