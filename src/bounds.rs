use kurbo::{Affine, Point};
use polars::{error::PolarsResult, prelude::Column};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn empty() -> Self { Bounds { x: Range::empty(), y: Range::empty() } }
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  /// The smallest bounds containing all of `points`.
  pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let init = Bounds::new(Range::new(first.x, first.x), Range::new(first.y, first.y));
    Some(iter.fold(init, |b, p| Bounds::new(b.x.include(p.x), b.y.include(p.y))))
  }

  pub fn width(&self) -> f64 { self.x.size() }
  pub fn height(&self) -> f64 { self.y.size() }

  pub const fn expand(self, amount: f64) -> Self {
    Bounds { x: self.x.expand(amount), y: self.y.expand(amount) }
  }

  pub fn margin(self, fract: f64) -> Self {
    Bounds { x: self.x.margin(fract), y: self.y.margin(fract) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  /// Shrinks these (viewport) bounds around their center, so that `data`
  /// maps into them with the same scale on both axes.
  pub fn fit_aspect(self, data: Bounds) -> Bounds {
    let scale =
      (self.width().abs() / data.width().abs()).min(self.height().abs() / data.height().abs());

    Bounds {
      x: self.x.with_size(data.width().abs() * scale),
      y: self.y.with_size(data.height().abs() * scale),
    }
  }

  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Default for Range {
  fn default() -> Self { Range::empty() }
}

impl Range {
  pub const fn empty() -> Self { Range { min: 0.0, max: 0.0 } }
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }
  pub const fn center(&self) -> f64 { (self.min + self.max) / 2.0 }

  pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
    let mut iter = values.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Range::new(first, first), |r, v| r.include(v)))
  }

  pub fn from_column(column: &Column) -> PolarsResult<Self> {
    Ok(Range::new(
      column.min_reduce()?.into_value().try_extract::<f64>()?,
      column.max_reduce()?.into_value().try_extract::<f64>()?,
    ))
  }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size() * fract) }

  /// Like `expand_by`, but a single-valued range still gets a unit span.
  pub fn margin(self, fract: f64) -> Self {
    if self.size() == 0.0 { self.expand(0.5) } else { self.expand_by(fract) }
  }

  /// A range of the given size around the same center, keeping direction.
  pub fn with_size(self, size: f64) -> Self {
    let half = size / 2.0 * self.size().signum();
    Range { min: self.center() - half, max: self.center() + half }
  }

  /// Maps `value` to `[0, 1]`. A single-valued range maps everything to 0.
  pub fn normalize(&self, value: f64) -> f64 {
    if self.size() == 0.0 { 0.0 } else { (value - self.min) / self.size() }
  }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  fn include(self, value: f64) -> Self {
    Range { min: self.min.min(value), max: self.max.max(value) }
  }

  pub fn union(&self, other: Range) -> Range {
    if self.size() == 0.0 {
      other
    } else if other.size() == 0.0 {
      *self
    } else {
      Range { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let (lo, hi) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
    let step = (hi - lo) / f64::from(count);
    if !(step > 0.0 && step.is_finite()) {
      return NiceTicksIter::new(lo, lo, 1.0, 4, 1);
    }

    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (lo / step).floor() * step;
    let hi = (hi / step).ceil() * step;

    let precision = (-k as i32 + 4).max(0) as usize;

    // 2.5-steps need one more digit than the step's magnitude.
    let magnitude = step.log10().floor();
    let quarter = ((step / 10f64.powf(magnitude)) - 2.5).abs() < 1e-6;
    let decimals = (-magnitude as i32 + i32::from(quarter)).max(0) as usize;

    NiceTicksIter::new(lo, hi, step, precision, decimals)
  }
}

pub struct NiceTicksIter {
  current:   f64,
  step:      f64,
  hi:        f64,
  precision: usize,
  decimals:  usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, precision: usize, decimals: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, precision, decimals }
  }

  /// Number of decimals needed to print every tick.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.precision as i32);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}
