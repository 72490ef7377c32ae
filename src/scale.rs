use peniko::Color;

use crate::{
  Range,
  theme::{Palette, VIRIDIS},
};

/// Maps values to colors, normalized against a fixed value range.
///
/// The same scale is shared between every mark of a plot and its colorbar.
#[derive(Clone, Copy)]
pub struct ColorScale {
  range:   Range,
  palette: &'static Palette,
}

impl ColorScale {
  pub fn new(range: Range) -> Self { ColorScale { range, palette: &VIRIDIS } }

  pub fn range(&self) -> Range { self.range }

  /// Linear position of `value` within the range, unclamped.
  pub fn normalize(&self, value: f64) -> f64 { self.range.normalize(value) }

  pub fn color(&self, value: f64) -> Color { self.palette.color(self.normalize(value) as f32) }
}

#[cfg(test)]
mod tests {
  use color::Oklab;

  use super::*;

  #[test]
  fn equal_values_share_a_color() {
    let scale = ColorScale::new(Range::new(5.0, 10.0));
    assert_eq!(scale.color(7.0).to_rgba8(), scale.color(7.0).to_rgba8());
  }

  #[test]
  fn colors_follow_values() {
    let scale = ColorScale::new(Range::new(-3.0, 12.0));
    let lightness = |v: f64| scale.color(v).convert::<Oklab>().components[0];

    let values = [-3.0, -1.0, 0.0, 2.5, 5.0, 9.0, 12.0];
    for pair in values.windows(2) {
      assert!(lightness(pair[0]) <= lightness(pair[1]) + 1e-4);
    }
  }

  #[test]
  fn extremes_hit_palette_ends() {
    let scale = ColorScale::new(Range::new(5.0, 10.0));
    assert_eq!(scale.color(5.0).to_rgba8(), VIRIDIS.color(0.0).to_rgba8());
    assert_eq!(scale.color(10.0).to_rgba8(), VIRIDIS.color(1.0).to_rgba8());
  }

  #[test]
  fn degenerate_range_uses_palette_start() {
    let scale = ColorScale::new(Range::new(4.0, 4.0));
    assert_eq!(scale.normalize(4.0), 0.0);
    assert_eq!(scale.color(4.0).to_rgba8(), VIRIDIS.color(0.0).to_rgba8());
  }
}
