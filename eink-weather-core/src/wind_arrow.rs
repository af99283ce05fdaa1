//! Two-triangle wind direction arrow.

use crate::render::{Canvas, Pixel};

/// Degree-to-radian factor, the short literal rather than `PI / 180`.
pub const DEG_TO_RAD: f64 = 0.01745;

/// Pixel scale used for the arrow on the main screen.
pub const ARROW_SCALE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Arrow outline around the origin at heading 0: two triangles sharing
/// the edge between the notch and the tip.
pub const BASE_VERTICES: [Point; 4] = [
    Point::new(-2.0, -3.0), // tail, left
    Point::new(0.0, -1.0),  // notch
    Point::new(0.0, 3.0),   // tip
    Point::new(2.0, -3.0),  // tail, right
];

/// Rotates every vertex about the origin by `heading_deg`.
pub fn rotated_vertices(base: &[Point; 4], heading_deg: f64) -> [Point; 4] {
    let rad = heading_deg * DEG_TO_RAD;
    let (sin, cos) = rad.sin_cos();
    base.map(|p| Point::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y))
}

/// An arrow turned to one heading. Build a new one for every heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindArrow {
    vertices: [Point; 4],
}

impl WindArrow {
    pub fn pointing(heading_deg: i32) -> Self {
        tracing::debug!("Wind arrow heading {} deg", heading_deg);
        Self { vertices: rotated_vertices(&BASE_VERTICES, f64::from(heading_deg)) }
    }

    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }

    /// Both triangles in screen pixels, scaled and moved to `(x, y)`.
    pub fn triangles(&self, x: i32, y: i32, scale: i32) -> [[Pixel; 3]; 2] {
        let px = self.vertices.map(|p| {
            (
                (f64::from(x) + p.x * f64::from(scale)) as i32,
                (f64::from(y) + p.y * f64::from(scale)) as i32,
            )
        });
        [[px[0], px[1], px[2]], [px[1], px[2], px[3]]]
    }

    pub fn draw(&self, x: i32, y: i32, scale: i32, canvas: &mut dyn Canvas) {
        for [a, b, c] in self.triangles(x, y, scale) {
            canvas.fill_triangle(a, b, c);
        }
    }
}
