use crate::model::{Point, Rgb, Stroke, Tool, BACKGROUND};
use crate::raster::plot_line;
use crate::stamp::draw_stamp;
use crate::surface::Surface;

/// Highlighter strokes never exceed this visual density, whatever the
/// opacity slider says.
pub const HIGHLIGHTER_DENSITY_CAP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// `out = src * alpha + dst * (1 - alpha)`
    AlphaOver,
    /// `out = src + dst * (1 - alpha)`, with source channels premultiplied.
    /// Repeated passes saturate toward the source color instead of stacking
    /// toward full brightness.
    AdditiveUnder,
}

/// The color, alpha, and blend mode bound to a surface for stamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    /// Normalized channels; premultiplied when the blend mode calls for it.
    pub color: [f32; 3],
    pub alpha: f32,
    pub blend: BlendMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            alpha: 1.0,
            blend: BlendMode::AlphaOver,
        }
    }
}

/// Derives the effective draw state for one tool selection.
///
/// Pen keeps the color as picked and maps opacity straight to alpha. The
/// highlighter caps its alpha at [`HIGHLIGHTER_DENSITY_CAP`] and submits
/// premultiplied channels. The eraser paints the background at full opacity,
/// ignoring the picked color.
pub fn draw_state_for(tool: Tool, color: Rgb, opacity: u8) -> DrawState {
    let opacity = f32::from(opacity.min(100)) / 100.0;
    match tool {
        Tool::Pen => DrawState {
            color: color.to_normalized(),
            alpha: opacity,
            blend: BlendMode::AlphaOver,
        },
        Tool::Highlighter => {
            let alpha = (opacity * HIGHLIGHTER_DENSITY_CAP).min(HIGHLIGHTER_DENSITY_CAP);
            let [r, g, b] = color.to_normalized();
            DrawState {
                color: [r * alpha, g * alpha, b * alpha],
                alpha,
                blend: BlendMode::AdditiveUnder,
            }
        }
        Tool::Eraser => DrawState {
            color: BACKGROUND.to_normalized(),
            alpha: 1.0,
            blend: BlendMode::AlphaOver,
        },
    }
}

pub fn configure(surface: &mut Surface, tool: Tool, color: Rgb, opacity: u8) {
    surface.bind(draw_state_for(tool, color, opacity));
}

/// Rasterizes `from -> to` and stamps a circle of half the line width at
/// every plotted point. Non-finite endpoints are a no-op.
pub fn paint_segment(surface: &mut Surface, from: Point, to: Point, line_width: f32) {
    if !from.is_finite() || !to.is_finite() {
        return;
    }
    let radius = line_width / 2.0;
    let (x0, y0) = from.rounded();
    let (x1, y1) = to.rounded();
    for point in plot_line(x0, y0, x1, y1) {
        draw_stamp(surface, point, radius);
    }
}

/// Paints a whole committed stroke: each consecutive point pair as one
/// segment, or a single stamp for a one-point stroke.
pub fn paint_stroke(surface: &mut Surface, stroke: &Stroke) {
    match stroke.points.as_slice() {
        [] => {}
        [point] => {
            if point.is_finite() {
                draw_stamp(surface, point.rounded(), stroke.line_width / 2.0);
            }
        }
        points => {
            for pair in points.windows(2) {
                paint_segment(surface, pair[0], pair[1], stroke.line_width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_maps_opacity_straight_to_alpha() {
        let state = draw_state_for(Tool::Pen, Rgb::rgb(255, 0, 0), 50);
        assert_eq!(state.blend, BlendMode::AlphaOver);
        assert_eq!(state.color, [1.0, 0.0, 0.0]);
        assert!((state.alpha - 0.5).abs() < 1e-6);

        let full = draw_state_for(Tool::Pen, Rgb::rgb(0, 0, 0), 100);
        assert_eq!(full.alpha, 1.0);
    }

    #[test]
    fn highlighter_alpha_never_exceeds_the_density_cap() {
        for opacity in 0..=100u8 {
            let state = draw_state_for(Tool::Highlighter, Rgb::rgb(255, 230, 64), opacity);
            assert!(
                state.alpha <= HIGHLIGHTER_DENSITY_CAP + f32::EPSILON,
                "opacity {opacity} escaped the cap: {}",
                state.alpha
            );
        }
        let max = draw_state_for(Tool::Highlighter, Rgb::rgb(255, 230, 64), 100);
        assert_eq!(max.alpha, HIGHLIGHTER_DENSITY_CAP);
        let min = draw_state_for(Tool::Highlighter, Rgb::rgb(255, 230, 64), 0);
        assert_eq!(min.alpha, 0.0);
    }

    #[test]
    fn highlighter_channels_are_premultiplied() {
        let state = draw_state_for(Tool::Highlighter, Rgb::rgb(255, 0, 255), 100);
        assert_eq!(state.blend, BlendMode::AdditiveUnder);
        assert!((state.color[0] - HIGHLIGHTER_DENSITY_CAP).abs() < 1e-6);
        assert_eq!(state.color[1], 0.0);
        assert!((state.color[2] - HIGHLIGHTER_DENSITY_CAP).abs() < 1e-6);
    }

    #[test]
    fn eraser_paints_background_regardless_of_selection() {
        let state = draw_state_for(Tool::Eraser, Rgb::rgb(12, 34, 56), 25);
        assert_eq!(state.blend, BlendMode::AlphaOver);
        assert_eq!(state.color, [1.0, 1.0, 1.0]);
        assert_eq!(state.alpha, 1.0);
    }

    #[test]
    fn out_of_range_opacity_is_clamped() {
        let state = draw_state_for(Tool::Pen, Rgb::rgb(0, 0, 0), 255);
        assert_eq!(state.alpha, 1.0);
    }

    #[test]
    fn hairline_segment_paints_exactly_the_plotted_pixels() {
        let mut surface = Surface::new(16, 16, 1.0);
        configure(&mut surface, Tool::Pen, Rgb::rgb(0, 0, 0), 100);
        paint_segment(
            &mut surface,
            Point::new(2.0, 3.0),
            Point::new(11.0, 7.0),
            1.0,
        );

        let expected: std::collections::HashSet<_> =
            plot_line(2, 3, 11, 7).into_iter().collect();
        for y in 0..16i32 {
            for x in 0..16i32 {
                let want = expected.contains(&(x, y));
                let got = surface.pixel(x as u32, y as u32) == [0, 0, 0, 255];
                assert_eq!(want, got, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn non_finite_endpoints_paint_nothing() {
        let mut surface = Surface::new(8, 8, 1.0);
        configure(&mut surface, Tool::Pen, Rgb::rgb(0, 0, 0), 100);
        let before = surface.pixels().to_vec();
        paint_segment(
            &mut surface,
            Point::new(f32::NAN, 1.0),
            Point::new(4.0, 4.0),
            4.0,
        );
        paint_segment(
            &mut surface,
            Point::new(1.0, 1.0),
            Point::new(f32::INFINITY, 4.0),
            4.0,
        );
        assert_eq!(surface.pixels(), before.as_slice());
    }

    #[test]
    fn one_point_stroke_paints_a_single_stamp() {
        let mut surface = Surface::new(24, 24, 1.0);
        let stroke = Stroke {
            points: vec![Point::new(10.0, 10.0)],
            color: Rgb::rgb(0, 0, 0),
            tool: Tool::Pen,
            line_width: 5.0,
            opacity: 100,
        };
        configure(&mut surface, stroke.tool, stroke.color, stroke.opacity);
        paint_stroke(&mut surface, &stroke);

        // Radius 2.5 around pixel (10, 10).
        assert_eq!(surface.pixel(10, 10), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(10, 8), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(10, 13), [255, 255, 255, 255]);
        assert_eq!(surface.pixel(14, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn empty_stroke_is_a_no_op() {
        let mut surface = Surface::new(8, 8, 1.0);
        let stroke = Stroke {
            points: Vec::new(),
            color: Rgb::rgb(0, 0, 0),
            tool: Tool::Pen,
            line_width: 4.0,
            opacity: 100,
        };
        configure(&mut surface, stroke.tool, stroke.color, stroke.opacity);
        let before = surface.pixels().to_vec();
        paint_stroke(&mut surface, &stroke);
        assert_eq!(surface.pixels(), before.as_slice());
    }

    #[test]
    fn multi_point_stroke_covers_every_vertex() {
        let mut surface = Surface::new(32, 32, 1.0);
        let stroke = Stroke {
            points: vec![
                Point::new(4.0, 4.0),
                Point::new(20.0, 4.0),
                Point::new(20.0, 20.0),
            ],
            color: Rgb::rgb(0, 0, 0),
            tool: Tool::Pen,
            line_width: 3.0,
            opacity: 100,
        };
        configure(&mut surface, stroke.tool, stroke.color, stroke.opacity);
        paint_stroke(&mut surface, &stroke);

        assert_eq!(surface.pixel(4, 4), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(12, 4), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(20, 4), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(20, 12), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(20, 20), [0, 0, 0, 255]);
        assert_eq!(surface.pixel(4, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn eraser_stroke_restores_background_over_ink() {
        let mut surface = Surface::new(16, 16, 1.0);
        configure(&mut surface, Tool::Pen, Rgb::rgb(200, 30, 30), 100);
        paint_segment(
            &mut surface,
            Point::new(2.0, 8.0),
            Point::new(13.0, 8.0),
            3.0,
        );
        assert_eq!(surface.pixel(8, 8), [200, 30, 30, 255]);

        configure(&mut surface, Tool::Eraser, Rgb::rgb(200, 30, 30), 100);
        paint_segment(
            &mut surface,
            Point::new(2.0, 8.0),
            Point::new(13.0, 8.0),
            7.0,
        );
        assert_eq!(surface.pixel(8, 8), [255, 255, 255, 255]);
        assert_eq!(surface.pixel(8, 7), [255, 255, 255, 255]);
    }

    #[test]
    fn highlighter_overlap_saturates_instead_of_darkening_to_ink() {
        let mut surface = Surface::new(16, 16, 1.0);
        configure(&mut surface, Tool::Highlighter, Rgb::rgb(255, 230, 64), 100);
        for _ in 0..60 {
            paint_segment(
                &mut surface,
                Point::new(8.0, 8.0),
                Point::new(8.0, 8.0),
                2.0,
            );
        }
        let [r, g, b, _] = surface.pixel(8, 8);
        // Converges toward the highlighter color, never past it.
        assert!(r >= 250, "red converged to {r}");
        assert!((225..=235).contains(&g), "green converged to {g}");
        assert!((60..=70).contains(&b), "blue converged to {b}");
    }
}
