use crate::surface::Surface;

/// Rim segment count for a stamp of the given radius: coarse for small
/// stamps, finer for large ones, never below eight.
pub fn stamp_segments(radius: f32) -> usize {
    ((radius / 2.0).floor() as usize).max(8)
}

/// Triangle-fan vertices approximating a filled circle: the center followed
/// by `stamp_segments(radius) + 1` rim vertices, the last duplicating the
/// first so the loop closes exactly. Vertices sit on pixel centers, so a
/// stamp at `(x, y)` is centered on that pixel rather than its corner.
pub fn stamp_fan(center: (i32, i32), radius: f32) -> Vec<(f32, f32)> {
    let segments = stamp_segments(radius);
    let cx = center.0 as f32 + 0.5;
    let cy = center.1 as f32 + 0.5;

    let mut fan = Vec::with_capacity(segments + 2);
    fan.push((cx, cy));
    for i in 0..=segments {
        let step = (i % segments) as f32 / segments as f32;
        let theta = std::f32::consts::TAU * step;
        fan.push((cx + radius * theta.cos(), cy + radius * theta.sin()));
    }
    fan
}

/// Composites one filled circular stamp onto the surface using its bound
/// draw state. A radius of zero or below is a no-op.
pub fn draw_stamp(surface: &mut Surface, center: (i32, i32), radius: f32) {
    if !radius.is_finite() || radius <= 0.0 {
        return;
    }
    let fan = stamp_fan(center, radius);
    fill_convex_rim(surface, &fan[1..]);
}

/// Scanline fill of the closed rim ring. The rim is convex, so each row has
/// one span; every covered pixel is composited exactly once per stamp.
/// Coverage rule: a pixel is inside when its center falls within the span.
fn fill_convex_rim(surface: &mut Surface, rim: &[(f32, f32)]) {
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for &(_, y) in rim {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let row_start = min_y.floor() as i32;
    let row_end = max_y.ceil() as i32;
    for row in row_start..row_end {
        let sample_y = row as f32 + 0.5;
        let mut span_min = f32::INFINITY;
        let mut span_max = f32::NEG_INFINITY;
        for edge in rim.windows(2) {
            let (ax, ay) = edge[0];
            let (bx, by) = edge[1];
            let crosses = (ay <= sample_y && by > sample_y) || (by <= sample_y && ay > sample_y);
            if !crosses {
                continue;
            }
            let t = (sample_y - ay) / (by - ay);
            let x = ax + t * (bx - ax);
            span_min = span_min.min(x);
            span_max = span_max.max(x);
        }
        if span_min > span_max {
            continue;
        }
        let col_start = (span_min - 0.5).ceil() as i32;
        let col_end = (span_max - 0.5).floor() as i32;
        for col in col_start..=col_end {
            surface.blend_pixel(col, row);
        }
    }
}
