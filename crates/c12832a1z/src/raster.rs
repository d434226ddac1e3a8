//! Geometric primitives rasterized straight into a [`FrameBuffer`].
//!
//! Nothing here talks to the controller; the display engine decides when a
//! finished shape is pushed.
//!
//! Coordinates and radii are clamped to `±COORD_LIMIT` before stepping, which
//! keeps the integer recurrences free of overflow and the loops short. Shapes
//! are pixel exact for every input inside that range.

use crate::{
    framebuffer::FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};

/// Largest coordinate or radius magnitude the rasterizer steps through.
pub const COORD_LIMIT: i32 = 1 << 14;

#[inline]
fn bounded(v: i32) -> i32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Integer midpoint-circle stepper shared by arcs, circles and rounded caps.
///
/// Yields `(x, y)` with `x` running from `-radius` up to (excluding) `0`; each
/// step describes one point of the second quadrant that callers mirror into
/// the other three. Radius 0 yields the centre once, a negative radius nothing.
/// Radii above [`COORD_LIMIT`] are stepped as [`COORD_LIMIT`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct ArcSteps {
    x: i32,
    y: i32,
    err: i32,
    done: bool,
}

impl ArcSteps {
    pub(crate) const fn new(radius: i32) -> Self {
        let radius = if radius > COORD_LIMIT {
            COORD_LIMIT
        } else if radius < 0 {
            -1
        } else {
            radius
        };
        Self {
            x: -radius,
            y: 0,
            err: 2 - 2 * radius,
            done: radius < 0,
        }
    }
}

impl Iterator for ArcSteps {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let step = (self.x, self.y);
        let r = self.err;
        if r <= self.y {
            self.y += 1;
            self.err += self.y * 2 + 1;
        }
        if r > self.x || self.err > self.y {
            self.x += 1;
            self.err += self.x * 2 + 1;
        }
        self.done = self.x >= 0;

        Some(step)
    }
}

#[inline]
fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a > b { (b, a) } else { (a, b) }
}

impl FrameBuffer {
    /// Draws a 1 px line with Bresenham's algorithm, endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let (x0, y0, x1, y1) = (bounded(x0), bounded(y0), bounded(x1), bounded(y1));
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, on);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > dy {
                err += dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws the outline of the rectangle spanned by two corners.
    pub fn rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.line(x0, y0, x1, y0, on);
        self.line(x0, y1, x1, y1, on);
        self.line(x0, y0, x0, y1, on);
        self.line(x1, y0, x1, y1, on);
    }

    /// Fills the closed rectangle spanned by two corners.
    ///
    /// A one-row rectangle sets the same pixels as a horizontal [`line`], so
    /// the filled shapes use it for their scanlines.
    ///
    /// [`line`]: FrameBuffer::line
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let (x0, x1) = ordered(x0, x1);
        let (y0, y1) = ordered(y0, y1);

        // Only the on-panel part can change anything.
        let (x0, x1) = (x0.max(0), x1.min(WIDTH as i32 - 1));
        let (y0, y1) = (y0.max(0), y1.min(HEIGHT as i32 - 1));

        for x in x0..=x1 {
            for y in y0..=y1 {
                self.set_pixel(x, y, on);
            }
        }
    }

    /// Draws a rectangle outline with corners rounded by `radius`.
    ///
    /// A negative radius is treated as 0, which gives square corners.
    pub fn round_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32, on: bool) {
        let (x0, x1) = ordered(bounded(x0), bounded(x1));
        let (y0, y1) = ordered(bounded(y0), bounded(y1));
        let r = bounded(radius).max(0);

        self.line(x0 + r, y0, x1 - r, y0, on);
        self.line(x0 + r, y1, x1 - r, y1, on);
        self.line(x0, y0 + r, x0, y1 - r, on);
        self.line(x1, y0 + r, x1, y1 - r, on);

        for (x, y) in ArcSteps::new(r) {
            self.set_pixel(x1 - r + y, y0 + r + x, on);
            self.set_pixel(x1 - r - x, y1 - r + y, on);
            self.set_pixel(x0 + r - y, y1 - r - x, on);
            self.set_pixel(x0 + r + x, y0 + r - y, on);
        }
    }

    /// Fills a rectangle with corners rounded by `radius`.
    ///
    /// The middle band is filled row by row, the rounded caps with horizontal
    /// scanlines taken from the arc stepper.
    pub fn fill_round_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32, on: bool) {
        let (x0, x1) = ordered(bounded(x0), bounded(x1));
        let (y0, y1) = ordered(bounded(y0), bounded(y1));
        let r = bounded(radius).max(0);

        // An empty band stays empty; `fill_rect` would swap its rows.
        if y0 + r <= y1 - r {
            self.fill_rect(x0, y0 + r, x1, y1 - r, on);
        }

        for (x, y) in ArcSteps::new(r) {
            let top = y0 + r + x;
            let bottom = y1 - r + y;
            self.fill_rect(x0 + r - y, top, x1 - r + y, top, on);
            self.fill_rect(x0 + r + x, bottom, x1 - r - x, bottom, on);
        }
    }

    /// Draws a circle outline.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, on: bool) {
        let (cx, cy) = (bounded(cx), bounded(cy));
        for (x, y) in ArcSteps::new(radius) {
            self.set_pixel(cx + y, cy + x, on);
            self.set_pixel(cx - x, cy + y, on);
            self.set_pixel(cx - y, cy - x, on);
            self.set_pixel(cx + x, cy - y, on);
        }
    }

    /// Fills a circle with two horizontal chords per arc step.
    ///
    /// The chords follow the arc stepper exactly, so the result is not always
    /// a symmetric disk: radius 1 leaves the pixel below the centre unset.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, on: bool) {
        let (cx, cy) = (bounded(cx), bounded(cy));
        for (x, y) in ArcSteps::new(radius) {
            self.fill_rect(cx - y, cy + x, cx + y, cy + x, on);
            self.fill_rect(cx + x, cy + y, cx - x, cy + y, on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                if fb.pixel(x, y) == Some(true) {
                    points.push((x, y));
                }
            }
        }
        points
    }

    /// Renders the top-left `width`x`height` corner, `#` for lit pixels.
    fn art(fb: &FrameBuffer, width: i32, height: i32) -> Vec<String> {
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| if fb.pixel(x, y) == Some(true) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn horizontal_line_sets_exactly_its_span() {
        let mut fb = FrameBuffer::new();
        fb.line(0, 0, 4, 0, true);

        assert_eq!(lit(&fb), [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn shallow_line_steps_x_before_y() {
        let mut fb = FrameBuffer::new();
        fb.line(0, 0, 4, 2, true);

        assert_eq!(lit(&fb), [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn line_can_erase() {
        let mut fb = FrameBuffer::new();
        fb.fill(true);
        fb.line(0, 5, 0, 9, false);

        assert_eq!(fb.lit_pixels(), 128 * 32 - 5);
        assert_eq!(fb.pixel(0, 7), Some(false));
    }

    #[test]
    fn line_overscanning_the_edge_keeps_in_range_part() {
        let mut fb = FrameBuffer::new();
        fb.line(-10, 3, 140, 3, true);

        assert_eq!(fb.lit_pixels(), 128);
    }

    #[test]
    fn fill_rect_sets_closed_block_only() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(2, 2, 4, 4, true);

        let expected: Vec<(i32, i32)> = (2..=4)
            .flat_map(|y| (2..=4).map(move |x| (x, y)))
            .collect();
        assert_eq!(lit(&fb), expected);
    }

    #[test]
    fn fill_rect_normalizes_corners() {
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();
        a.fill_rect(10, 20, 3, 5, true);
        b.fill_rect(3, 5, 10, 20, true);

        assert_eq!(a.bytes(), b.bytes());
        assert_eq!(a.lit_pixels(), 8 * 16);
    }

    #[test]
    fn rectangle_draws_border_without_interior() {
        let mut fb = FrameBuffer::new();
        fb.rectangle(0, 0, 127, 31, true);

        assert_eq!(fb.lit_pixels(), 2 * 128 + 2 * 30);
        assert_eq!(fb.pixel(127, 31), Some(true));
        assert_eq!(fb.pixel(1, 1), Some(false));
    }

    #[test]
    fn arc_steps_for_radius_three() {
        let steps: Vec<_> = ArcSteps::new(3).collect();
        assert_eq!(steps, [(-3, 0), (-3, 1), (-2, 2), (-1, 3)]);
    }

    #[test]
    fn degenerate_radii_are_bounded() {
        assert_eq!(ArcSteps::new(0).count(), 1);
        assert_eq!(ArcSteps::new(-5).count(), 0);

        let mut fb = FrameBuffer::new();
        fb.circle(10, 10, 0, true);
        assert_eq!(lit(&fb), [(10, 10)]);

        fb.clear();
        fb.circle(10, 10, -3, true);
        fb.fill_circle(10, 10, -3, true);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn circle_is_symmetric_under_quarter_turn() {
        let mut fb = FrameBuffer::new();
        fb.circle(10, 10, 5, true);

        let points = lit(&fb);
        assert!(points.contains(&(15, 10)));
        assert!(points.contains(&(10, 5)));
        assert!(points.contains(&(5, 10)));
        assert!(points.contains(&(10, 15)));
        for (x, y) in &points {
            let (dx, dy) = (x - 10, y - 10);
            assert_eq!(fb.pixel(10 - dy, 10 + dx), Some(true), "({dx},{dy})");
        }
    }

    #[test]
    fn fill_circle_stays_inside_radius() {
        let mut fb = FrameBuffer::new();
        fb.fill_circle(16, 16, 6, true);

        assert_eq!(fb.pixel(16, 16), Some(true));
        assert_eq!(fb.pixel(22, 16), Some(true));
        assert_eq!(fb.pixel(16, 10), Some(true));
        for (x, y) in lit(&fb) {
            let (dx, dy) = (x - 16, y - 16);
            assert!(dx * dx + dy * dy <= 7 * 7);
        }
    }

    #[test]
    fn round_rect_cuts_the_corners() {
        let mut fb = FrameBuffer::new();
        fb.round_rect(0, 0, 20, 10, 3, true);

        assert_eq!(fb.pixel(0, 0), Some(false));
        assert_eq!(fb.pixel(20, 10), Some(false));
        assert_eq!(fb.pixel(10, 0), Some(true));
        assert_eq!(fb.pixel(0, 5), Some(true));
        assert_eq!(fb.pixel(1, 1), Some(true));
        assert_eq!(fb.pixel(10, 5), Some(false));
    }

    #[test]
    fn round_rect_with_zero_radius_is_a_rectangle() {
        let mut rounded = FrameBuffer::new();
        let mut square = FrameBuffer::new();
        rounded.round_rect(4, 4, 30, 20, 0, true);
        square.rectangle(4, 4, 30, 20, true);

        assert_eq!(rounded.bytes(), square.bytes());
    }

    #[test]
    fn fill_round_rect_fills_body_and_caps() {
        let mut fb = FrameBuffer::new();
        fb.fill_round_rect(0, 0, 20, 10, 3, true);

        assert_eq!(fb.pixel(0, 0), Some(false));
        assert_eq!(fb.pixel(1, 0), Some(false));
        assert_eq!(fb.pixel(2, 0), Some(true));
        assert_eq!(fb.pixel(10, 0), Some(true));
        assert_eq!(fb.pixel(10, 5), Some(true));
        assert_eq!(fb.pixel(0, 5), Some(true));
        assert_eq!(fb.pixel(20, 10), Some(false));
        assert_eq!(fb.pixel(21, 5), Some(false));
    }

    #[test]
    fn circle_radius_five_matches_reference_pixels() {
        let mut fb = FrameBuffer::new();
        fb.circle(5, 5, 5, true);

        assert_eq!(
            art(&fb, 11, 11),
            [
                "...#####...",
                "..#.....#..",
                ".#.......#.",
                "#.........#",
                "#.........#",
                "#.........#",
                "#.........#",
                "#.........#",
                ".#.......#.",
                "..#.....#..",
                "...#####...",
            ]
        );
        assert_eq!(fb.lit_pixels(), 28);
    }

    #[test]
    fn fill_circle_radius_one_leaves_the_pixel_below_centre() {
        let mut fb = FrameBuffer::new();
        fb.fill_circle(1, 1, 1, true);

        assert_eq!(art(&fb, 3, 3), [".#.", "###", "..."]);

        let mut outline = FrameBuffer::new();
        outline.circle(1, 1, 1, true);
        assert_eq!(outline.pixel(1, 2), Some(true));
    }

    #[test]
    fn fill_circle_radius_three_matches_reference_pixels() {
        let mut fb = FrameBuffer::new();
        fb.fill_circle(3, 3, 3, true);

        assert_eq!(
            art(&fb, 7, 7),
            [
                "..###..",
                ".#####.",
                "#######",
                "#######",
                "#######",
                ".#####.",
                "..###..",
            ]
        );
        assert_eq!(fb.lit_pixels(), 37);
    }

    #[test]
    fn fill_circle_radius_six_matches_reference_pixels() {
        let mut fb = FrameBuffer::new();
        fb.fill_circle(6, 6, 6, true);

        assert_eq!(
            art(&fb, 13, 13),
            [
                "....#####....",
                "...#######...",
                "..#########..",
                ".###########.",
                "#############",
                "#############",
                "#############",
                "#############",
                "#############",
                ".###########.",
                "..#########..",
                "...#######...",
                "....#####....",
            ]
        );
        assert_eq!(fb.lit_pixels(), 129);
    }

    #[test]
    fn round_rect_radius_three_matches_reference_pixels() {
        let mut fb = FrameBuffer::new();
        fb.round_rect(0, 0, 12, 8, 3, true);

        assert_eq!(
            art(&fb, 13, 9),
            [
                "..#########..",
                ".#.........#.",
                "#...........#",
                "#...........#",
                "#...........#",
                "#...........#",
                "#...........#",
                ".#.........#.",
                "..#########..",
            ]
        );
        assert_eq!(fb.lit_pixels(), 32);
    }

    #[test]
    fn fill_round_rect_radius_three_matches_reference_pixels() {
        let mut fb = FrameBuffer::new();
        fb.fill_round_rect(0, 0, 12, 8, 3, true);

        assert_eq!(
            art(&fb, 13, 9),
            [
                "..#########..",
                ".###########.",
                "#############",
                "#############",
                "#############",
                "#############",
                "#############",
                ".###########.",
                "..#########..",
            ]
        );
        assert_eq!(fb.lit_pixels(), 105);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let mut fb = FrameBuffer::new();

        fb.circle(0, 0, i32::MAX, true);
        fb.circle(i32::MIN, i32::MAX, i32::MIN, true);
        fb.fill_circle(i32::MAX, i32::MIN, i32::MAX, true);
        fb.line(i32::MIN, 0, 0, 0, true);
        fb.line(i32::MAX, i32::MIN, i32::MIN, i32::MAX, true);
        fb.rectangle(i32::MIN, i32::MIN, i32::MAX, i32::MAX, true);
        fb.fill_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, false);
        fb.round_rect(i32::MIN, 0, i32::MAX, 31, i32::MAX, true);
        fb.fill_round_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, i32::MIN, true);

        assert_eq!(fb.lit_pixels(), 128 * 32);
    }

    #[test]
    fn overscanning_line_keeps_its_on_panel_pixels() {
        let mut fb = FrameBuffer::new();
        fb.line(i32::MIN, 4, 0, 4, true);

        assert_eq!(lit(&fb), [(0, 4)]);
    }
}
