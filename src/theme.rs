use color::{HueDirection, OpaqueColor, Oklab, Srgb};
use peniko::Color;

pub const TEXT_COLOR: Color = Color::from_rgb8(32, 32, 32);
pub const LINE_COLOR: Color = Color::from_rgb8(128, 128, 128);
pub const GRID_COLOR: Color = Color::from_rgb8(220, 220, 220);
pub const PANE_COLOR: Color = Color::from_rgb8(242, 242, 242);
pub const BACKGROUND: Color = Color::WHITE;

/// A palette interpolated (in Oklab) between evenly spaced stops.
pub struct Palette {
  stops: &'static [OpaqueColor<Srgb>],
}

/// Matplotlib's viridis, sampled at eleven evenly spaced points.
pub const VIRIDIS: Palette = Palette::new(&[
  OpaqueColor::new([0.267004, 0.004874, 0.329415]),
  OpaqueColor::new([0.282623, 0.140926, 0.457517]),
  OpaqueColor::new([0.253935, 0.265254, 0.529983]),
  OpaqueColor::new([0.206756, 0.371758, 0.553117]),
  OpaqueColor::new([0.163625, 0.471133, 0.558148]),
  OpaqueColor::new([0.127568, 0.566949, 0.550556]),
  OpaqueColor::new([0.134692, 0.658636, 0.517649]),
  OpaqueColor::new([0.266941, 0.748751, 0.440573]),
  OpaqueColor::new([0.477504, 0.821444, 0.318195]),
  OpaqueColor::new([0.741388, 0.873449, 0.149561]),
  OpaqueColor::new([0.993248, 0.906157, 0.143936]),
]);

impl Palette {
  pub const fn new(stops: &'static [OpaqueColor<Srgb>]) -> Self {
    assert!(stops.len() >= 2);
    Palette { stops }
  }

  pub fn sample(&self, t: f32) -> OpaqueColor<Srgb> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = self.stops.len() - 1;
    let scaled = t * segments as f32;
    let index = (scaled.floor() as usize).min(segments - 1);

    let start = self.stops[index].convert::<Oklab>();
    let end = self.stops[index + 1].convert::<Oklab>();
    start.lerp(end, scaled - index as f32, HueDirection::Shorter).convert()
  }

  pub fn color(&self, t: f32) -> Color { self.sample(t).with_alpha(1.0) }
}
