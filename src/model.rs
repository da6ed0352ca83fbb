use serde::{Deserialize, Serialize};

/// Canvas background. The eraser paints this color at full opacity.
pub const BACKGROUND: Rgb = Rgb::rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Highlighter,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(color: [u8; 3]) -> Self {
        Self::rgb(color[0], color[1], color[2])
    }

    /// Channels scaled to `0.0..=1.0` for compositing.
    pub fn to_normalized(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// A position in device pixels. Pure value, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn rounded(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// One committed gesture. Never edited in place; history truncation or clear
/// is the only way a stroke goes away.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Insertion order is drawing order, at least one point.
    pub points: Vec<Point>,
    pub color: Rgb,
    pub tool: Tool,
    /// Stamp diameter in device pixels, captured when the stroke began.
    pub line_width: f32,
    /// `0..=100`, interpreted per tool.
    pub opacity: u8,
}
