use crate::composite::{self, BlendMode, DrawState};
use crate::history::History;
use crate::model::BACKGROUND;

/// Owned RGBA8 canvas plus the draw state bound for the next stamp.
///
/// Coordinates are device pixels. The alpha channel stays opaque; tools that
/// "remove" ink paint the background color instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    pixels: Vec<u8>,
    state: DrawState,
}

impl Surface {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        let mut surface = Self {
            width,
            height,
            pixel_ratio: sanitize_ratio(pixel_ratio),
            pixels: vec![0; pixel_len(width, height)],
            state: DrawState::default(),
        };
        surface.clear();
        surface
    }

    /// Recomputes the device-pixel size from a logical viewport and pixel
    /// ratio. Returns whether the canvas was reallocated; when it was, the
    /// contents are reset to the background and the caller should replay.
    pub fn resize(&mut self, logical_width: f32, logical_height: f32, pixel_ratio: f32) -> bool {
        let ratio = sanitize_ratio(pixel_ratio);
        let width = (logical_width * ratio).round().max(0.0) as u32;
        let height = (logical_height * ratio).round().max(0.0) as u32;
        self.pixel_ratio = ratio;
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; pixel_len(width, height)];
        self.clear();
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn clear(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255]);
        }
    }

    pub fn bind(&mut self, state: DrawState) {
        self.state = state;
    }

    pub fn draw_state(&self) -> DrawState {
        self.state
    }

    /// Composites the bound draw state onto one pixel. Out-of-bounds
    /// coordinates are silently skipped.
    pub fn blend_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let alpha = self.state.alpha;
        for channel in 0..3 {
            let src = self.state.color[channel];
            let dst = f32::from(self.pixels[idx + channel]) / 255.0;
            let out = match self.state.blend {
                BlendMode::AlphaOver => src * alpha + dst * (1.0 - alpha),
                // Source channels arrive premultiplied for this mode.
                BlendMode::AdditiveUnder => src + dst * (1.0 - alpha),
            };
            self.pixels[idx + channel] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        self.pixels[idx + 3] = 255;
    }

    /// Full repaint: clear to background, then paint every active stroke in
    /// order, each configured from its own stored tool, color, and opacity.
    pub fn replay(&mut self, history: &History) {
        self.clear();
        for stroke in history.active_strokes() {
            composite::configure(self, stroke.tool, stroke.color, stroke.opacity);
            composite::paint_stroke(self, stroke);
        }
    }
}

fn sanitize_ratio(pixel_ratio: f32) -> f32 {
    if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    }
}

fn pixel_len(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize).saturating_mul(4)
}
