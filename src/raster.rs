/// Integer Bresenham line plot.
///
/// Returns an 8-connected path covering both endpoints with no gaps along
/// the major axis. The path always runs low to high along the major axis,
/// so callers that care about input order must not rely on the returned
/// order, only on coverage.
pub fn plot_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    if (y1 - y0).abs() < (x1 - x0).abs() {
        if x0 > x1 {
            plot_line_low(x1, y1, x0, y0)
        } else {
            plot_line_low(x0, y0, x1, y1)
        }
    } else if y0 > y1 {
        plot_line_high(x1, y1, x0, y0)
    } else {
        plot_line_high(x0, y0, x1, y1)
    }
}

/// Shallow slopes, `x0 <= x1` and `|dy| <= dx`.
fn plot_line_low(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = x1 - x0;
    let mut dy = y1 - y0;
    let mut yi = 1;
    if dy < 0 {
        yi = -1;
        dy = -dy;
    }
    let mut d = 2 * dy - dx;
    let mut y = y0;

    let mut points = Vec::with_capacity((dx + 1) as usize);
    for x in x0..=x1 {
        points.push((x, y));
        if d > 0 {
            y += yi;
            d += 2 * (dy - dx);
        } else {
            d += 2 * dy;
        }
    }
    points
}

/// Steep slopes, `y0 <= y1` and `dx <= |dy|`. Degenerate single-point input
/// lands here and yields exactly one point.
fn plot_line_high(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dy = y1 - y0;
    let mut dx = x1 - x0;
    let mut xi = 1;
    if dx < 0 {
        xi = -1;
        dx = -dx;
    }
    let mut d = 2 * dx - dy;
    let mut x = x0;

    let mut points = Vec::with_capacity((dy + 1) as usize);
    for y in y0..=y1 {
        points.push((x, y));
        if d > 0 {
            x += xi;
            d += 2 * (dx - dy);
        } else {
            d += 2 * dx;
        }
    }
    points
}
