use kurbo::{Affine, BezPath, Circle, Line, Point, Stroke, Vec2};

use crate::{
  Bounds, Range,
  axes::{Mark, value_label},
  render::{Align, DrawText, Render},
  scale::ColorScale,
  table::GridRow,
  theme,
};

/// Marker area, in square canvas points, per unit of resolution.
pub const AREA_PER_RESOLUTION: f64 = 200.0;

/// Half extents of the box the data is fit into (a 4:4:3 box).
const BOX_HALF: [f64; 3] = [0.5, 0.5, 0.375];

const TICKS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// An orthographic camera looking at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
  /// Rotation about the z axis, in radians.
  pub azimuth:   f64,
  /// Angle above the xy plane, in radians.
  pub elevation: f64,
}

/// Cells of a 3D grid, drawn as a projected scatter plot.
pub struct Scatter3dAxes<'a> {
  rows:   &'a [GridRow],
  scale:  ColorScale,
  camera: Camera,
  ranges: [Range; 3],
}

impl Point3 {
  pub const fn new(x: f64, y: f64, z: f64) -> Self { Point3 { x, y, z } }

  fn axis(self, axis: usize) -> f64 { [self.x, self.y, self.z][axis] }

  fn with_axis(self, axis: usize, value: f64) -> Self {
    let mut coords = [self.x, self.y, self.z];
    coords[axis] = value;
    Point3::new(coords[0], coords[1], coords[2])
  }
}

impl Default for Camera {
  fn default() -> Self {
    Camera { azimuth: (-60.0_f64).to_radians(), elevation: 30.0_f64.to_radians() }
  }
}

impl Camera {
  /// Screen coordinates of `p`, with y pointing up.
  pub fn project(&self, p: Point3) -> Point {
    let (sa, ca) = self.azimuth.sin_cos();
    let (se, ce) = self.elevation.sin_cos();

    Point::new(-p.x * sa + p.y * ca, -p.x * ca * se - p.y * sa * se + p.z * ce)
  }

  /// Distance along the view direction. Larger is further from the viewer.
  pub fn depth(&self, p: Point3) -> f64 {
    let [vx, vy, vz] = self.toward_viewer();
    -(p.x * vx + p.y * vy + p.z * vz)
  }

  fn toward_viewer(&self) -> [f64; 3] {
    let (sa, ca) = self.azimuth.sin_cos();
    let (se, ce) = self.elevation.sin_cos();
    [ce * ca, ce * sa, se]
  }
}

impl<'a> Scatter3dAxes<'a> {
  pub(crate) fn new(rows: &'a [GridRow], scale: ColorScale) -> Self {
    let ranges = [0, 1, 2].map(|axis| {
      Range::from_values(rows.iter().map(|row| row.position[axis]))
        .unwrap_or_default()
        .margin(0.1)
    });

    Scatter3dAxes { rows, scale, camera: Camera::default(), ranges }
  }

  pub fn camera(&mut self, camera: Camera) -> &mut Self {
    self.camera = camera;
    self
  }

  /// Marks sized by area.
  pub fn marks(&self) -> Vec<Mark<Point3>> {
    self
      .rows
      .iter()
      .map(|row| Mark {
        position: Point3::new(row.position[0], row.position[1], row.position[2]),
        size:     row.resolution * AREA_PER_RESOLUTION,
        color:    self.scale.color(row.value),
        label:    value_label(row.value),
      })
      .collect()
  }

  /// Indices into `marks()`, furthest from the viewer first.
  pub fn draw_order(&self, marks: &[Mark<Point3>]) -> Vec<usize> {
    let depths: Vec<f64> =
      marks.iter().map(|m| self.camera.depth(self.to_box(m.position))).collect();

    let mut order: Vec<usize> = (0..marks.len()).collect();
    order.sort_by(|&a, &b| depths[b].total_cmp(&depths[a]));
    order
  }

  /// Maps a data point into the box centered on the origin.
  pub fn to_box(&self, p: Point3) -> Point3 {
    let coord =
      |axis: usize| (self.ranges[axis].normalize(p.axis(axis)) - 0.5) * 2.0 * BOX_HALF[axis];
    Point3::new(coord(0), coord(1), coord(2))
  }

  /// Screen-space bounds of the projected box, with room for tick labels.
  pub fn projected_bounds(&self) -> Bounds {
    let corners = (0..8).map(|i| {
      let sign = |bit: usize| if i & (1 << bit) == 0 { -1.0 } else { 1.0 };
      Point3::new(sign(0) * BOX_HALF[0], sign(1) * BOX_HALF[1], sign(2) * BOX_HALF[2])
    });

    Bounds::from_points(corners.map(|c| self.camera.project(c)))
      .unwrap_or_else(Bounds::empty)
      .margin(0.12)
  }

  /// Where the title of `axis` goes, in viewport space.
  pub(crate) fn title_anchor(&self, axis: usize, transform: Affine) -> Point {
    let edge = self.label_edge(axis).with_axis(axis, 0.0);
    let mid = transform * self.camera.project(edge);
    mid + self.outward(axis, transform) * 60.0
  }

  /// The box coordinate of the back pane perpendicular to each axis.
  fn back(&self) -> [f64; 3] {
    let view = self.camera.toward_viewer();
    [0, 1, 2].map(|i| if view[i] >= 0.0 { -BOX_HALF[i] } else { BOX_HALF[i] })
  }

  /// A point on the front edge that `axis`'s tick labels run along.
  fn label_edge(&self, axis: usize) -> Point3 {
    let back = self.back();
    match axis {
      0 => Point3::new(0.0, -back[1], -BOX_HALF[2]),
      1 => Point3::new(-back[0], 0.0, -BOX_HALF[2]),
      _ => Point3::new(-back[0], back[1], 0.0),
    }
  }

  /// Unit direction pointing away from the box, across `axis`'s label edge.
  fn outward(&self, axis: usize, transform: Affine) -> Vec2 {
    let center = transform * self.camera.project(Point3::new(0.0, 0.0, 0.0));
    let mid = transform * self.camera.project(self.label_edge(axis).with_axis(axis, 0.0));
    let dir = mid - center;

    if dir.hypot() < 1e-9 { Vec2::new(0.0, 1.0) } else { dir.normalize() }
  }

  fn draw_panes(&self, render: &mut Render, transform: Affine) {
    let back = self.back();
    let grid = Stroke::new(1.0);

    for axis in 0..3 {
      let (j, k) = ((axis + 1) % 3, (axis + 2) % 3);
      let corner = |sj: f64, sk: f64| {
        let p = Point3::new(0.0, 0.0, 0.0)
          .with_axis(axis, back[axis])
          .with_axis(j, sj * BOX_HALF[j])
          .with_axis(k, sk * BOX_HALF[k]);
        transform * self.camera.project(p)
      };

      let mut pane = BezPath::new();
      pane.move_to(corner(-1.0, -1.0));
      pane.line_to(corner(1.0, -1.0));
      pane.line_to(corner(1.0, 1.0));
      pane.line_to(corner(-1.0, 1.0));
      pane.close_path();

      render.fill(&pane, Affine::IDENTITY, theme::PANE_COLOR);
      render.stroke(&pane, Affine::IDENTITY, theme::LINE_COLOR, &grid);
    }

    for axis in 0..3 {
      let ticks = self.ranges[axis].nice_ticks(TICKS);
      let decimals = ticks.decimals();
      let outward = self.outward(axis, transform);

      for value in ticks.filter(|v| self.ranges[axis].contains(v)) {
        let c = self.to_box(Point3::new(value, value, value)).axis(axis);

        for pane in (0..3).filter(|&pane| pane != axis) {
          let k = 3 - axis - pane;
          let at = |sk: f64| {
            let p = Point3::new(0.0, 0.0, 0.0)
              .with_axis(axis, c)
              .with_axis(pane, back[pane])
              .with_axis(k, sk * BOX_HALF[k]);
            transform * self.camera.project(p)
          };
          let line = Line::new(at(-1.0), at(1.0));
          render.stroke(&line, Affine::IDENTITY, theme::GRID_COLOR, &grid);
        }

        let tick = transform * self.camera.project(self.label_edge(axis).with_axis(axis, c));
        render.draw_text(DrawText {
          text: &format!("{value:.decimals$}"),
          size: 11.0,
          position: tick + outward * 22.0,
          horizontal_align: Align::Center,
          vertical_align: Align::Center,
          ..Default::default()
        });
      }
    }
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    self.draw_panes(render, transform);

    let marks = self.marks();
    let order = self.draw_order(&marks);
    let screen = |m: &Mark<Point3>| transform * self.camera.project(self.to_box(m.position));

    for &i in &order {
      let marker = Circle::new(screen(&marks[i]), marks[i].size.sqrt() / 2.0);
      render.fill(&marker, Affine::IDENTITY, marks[i].color);
    }

    for &i in &order {
      render.draw_text(DrawText {
        text: &marks[i].label,
        size: 9.0,
        position: screen(&marks[i]),
        vertical_align: Align::End,
        ..Default::default()
      });
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(x: f64, y: f64, z: f64, resolution: f64, value: f64) -> GridRow {
    GridRow { position: vec![x, y, z], resolution, value }
  }

  fn close(a: Point, b: Point) -> bool { (a - b).hypot() < 1e-9 }

  #[test]
  fn projection_keeps_z_vertical() {
    let camera = Camera::default();
    let up = camera.project(Point3::new(0.0, 0.0, 1.0));

    assert!(close(up, Point::new(0.0, 30.0_f64.to_radians().cos())));
    assert!(close(camera.project(Point3::new(0.0, 0.0, 0.0)), Point::ZERO));
  }

  #[test]
  fn nearer_points_are_drawn_last() {
    // The default camera looks from +x, -y, +z.
    let rows = [
      row(8.0, 8.0, 0.0, 0.3, 1.0),
      row(0.0, 0.0, 0.0, 0.3, 2.0),
      row(8.0, 0.0, 8.0, 0.3, 3.0),
    ];
    let axes = Scatter3dAxes::new(&rows, ColorScale::new(Range::new(1.0, 3.0)));
    let marks = axes.marks();

    assert_eq!(axes.draw_order(&marks), [0, 1, 2]);
  }

  #[test]
  fn area_follows_resolution() {
    let rows = [row(0.0, 0.0, 0.0, 0.3, 9.5), row(1.0, 1.0, 1.0, 0.7, 0.0)];
    let axes = Scatter3dAxes::new(&rows, ColorScale::new(Range::new(0.0, 9.5)));
    let marks = axes.marks();

    assert!((marks[0].size - 60.0).abs() < 1e-9);
    assert!((marks[1].size - 140.0).abs() < 1e-9);
    assert_eq!(marks[0].label, "9.5");
    assert_eq!(marks[1].label, "0.0");
  }

  #[test]
  fn box_contains_every_point() {
    let rows = [row(-4.0, 2.0, 0.5, 0.3, 1.0), row(3.0, 8.0, 7.5, 0.7, 2.0)];
    let axes = Scatter3dAxes::new(&rows, ColorScale::new(Range::new(1.0, 2.0)));
    let bounds = axes.projected_bounds();

    for mark in axes.marks() {
      let p = axes.to_box(mark.position);
      assert!(p.x.abs() <= BOX_HALF[0] && p.y.abs() <= BOX_HALF[1] && p.z.abs() <= BOX_HALF[2]);

      let s = axes.camera.project(p);
      assert!(bounds.x.contains(&s.x) && bounds.y.contains(&s.y));
    }
  }

  #[test]
  fn back_panes_face_away_from_camera() {
    let rows = [row(0.0, 0.0, 0.0, 1.0, 1.0)];
    let axes = Scatter3dAxes::new(&rows, ColorScale::new(Range::new(1.0, 1.0)));

    assert_eq!(axes.back(), [-0.5, 0.5, -0.375]);
  }
}
