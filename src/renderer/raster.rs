//! Integer 2-D primitives on a [`Framebuffer`].
//!
//! All routines clip against the buffer; callers may pass coordinates that
//! are partially or completely off-screen.

use glam::Vec2;

use super::{Framebuffer, Rgba};

/// Integer Bresenham line-drawing algorithm (both endpoints inclusive).
pub fn line(fb: &mut Framebuffer, mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        fb.put(x0, y0, colour);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}

/// Float endpoints, rounded to the nearest pixel.
#[inline]
pub fn line_f(fb: &mut Framebuffer, a: Vec2, b: Vec2, colour: Rgba) {
    line(
        fb,
        a.x.round() as i32,
        a.y.round() as i32,
        b.x.round() as i32,
        b.y.round() as i32,
        colour,
    );
}

/// Solid `w × h` rectangle with top-left corner `(x, y)`.
pub fn fill_rect(fb: &mut Framebuffer, x: i32, y: i32, w: i32, h: i32, colour: Rgba) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(fb.width() as i32);
    let y1 = (y + h).min(fb.height() as i32);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let width = fb.width();
    let pixels = fb.pixels_mut();
    for row in y0..y1 {
        let base = row as usize * width;
        pixels[base + x0 as usize..base + x1 as usize].fill(colour);
    }
}

/// One-pixel outline of a `w × h` rectangle.
pub fn stroke_rect(fb: &mut Framebuffer, x: i32, y: i32, w: i32, h: i32, colour: Rgba) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (r, b) = (x + w - 1, y + h - 1);
    line(fb, x, y, r, y, colour);
    line(fb, x, b, r, b, colour);
    line(fb, x, y, x, b, colour);
    line(fb, r, y, r, b, colour);
}

/// Filled disc: every pixel whose centre lies within `radius` of `c`.
pub fn fill_circle(fb: &mut Framebuffer, c: Vec2, radius: f32, colour: Rgba) {
    let r2 = radius * radius;
    let x0 = (c.x - radius).floor() as i32;
    let x1 = (c.x + radius).ceil() as i32;
    let y0 = (c.y - radius).floor() as i32;
    let y1 = (c.y + radius).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - c;
            if d.length_squared() <= r2 {
                fb.put(x, y, colour);
            }
        }
    }
}

/// Visit every pixel of a `width × height` grid whose centre lies inside
/// triangle `abc` (either winding, edges inclusive).
pub fn rasterize_triangle(
    a: Vec2,
    b: Vec2,
    c: Vec2,
    width: usize,
    height: usize,
    mut plot: impl FnMut(usize, usize),
) {
    let area = edge(a, b, c);
    if area == 0.0 {
        return;
    }
    let min = a.min(b).min(c);
    let max = a.max(b).max(c);
    let x0 = (min.x.floor() as i32).max(0);
    let y0 = (min.y.floor() as i32).max(0);
    let x1 = (max.x.ceil() as i32).min(width as i32 - 1);
    let y1 = (max.y.ceil() as i32).min(height as i32 - 1);

    // Normalise so that inside == all edge functions non-negative.
    let sign = area.signum();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(b, c, p) * sign;
            let w1 = edge(c, a, p) * sign;
            let w2 = edge(a, b, p) * sign;
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                plot(x as usize, y as usize);
            }
        }
    }
}

/// Solid triangle straight into the frame-buffer.
pub fn fill_triangle(fb: &mut Framebuffer, a: Vec2, b: Vec2, c: Vec2, colour: Rgba) {
    let (w, h) = (fb.width(), fb.height());
    let pixels = fb.pixels_mut();
    rasterize_triangle(a, b, c, w, h, |x, y| pixels[y * w + x] = colour);
}

/// Twice the signed area of `abc`.
#[inline(always)]
fn edge(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{BLACK, WHITE};

    fn count(fb: &Framebuffer, colour: Rgba) -> usize {
        fb.pixels().iter().filter(|&&p| p == colour).count()
    }

    #[test]
    fn horizontal_line_is_inclusive() {
        let mut fb = Framebuffer::new(8, 2);
        line(&mut fb, 1, 0, 5, 0, WHITE);
        assert_eq!(count(&fb, WHITE), 5);
        assert_eq!(fb.get(0, 0), Some(BLACK));
        assert_eq!(fb.get(6, 0), Some(BLACK));
    }

    #[test]
    fn diagonal_line_touches_both_ends() {
        let mut fb = Framebuffer::new(8, 8);
        line(&mut fb, 7, 7, 0, 0, WHITE);
        assert_eq!(fb.get(0, 0), Some(WHITE));
        assert_eq!(fb.get(7, 7), Some(WHITE));
        assert_eq!(count(&fb, WHITE), 8);
    }

    #[test]
    fn rect_fill_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fill_rect(&mut fb, -2, 2, 4, 10, WHITE);
        assert_eq!(count(&fb, WHITE), 4);
    }

    #[test]
    fn stroke_rect_leaves_centre() {
        let mut fb = Framebuffer::new(5, 5);
        stroke_rect(&mut fb, 0, 0, 5, 5, WHITE);
        assert_eq!(count(&fb, WHITE), 16);
        assert_eq!(fb.get(2, 2), Some(BLACK));
    }

    #[test]
    fn triangle_winding_does_not_matter() {
        let (a, b, c) = (Vec2::ZERO, Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0));
        let mut cw = Framebuffer::new(8, 8);
        let mut ccw = Framebuffer::new(8, 8);
        fill_triangle(&mut cw, a, b, c, WHITE);
        fill_triangle(&mut ccw, a, c, b, WHITE);
        assert_eq!(cw, ccw);
        // pixel centres with x + y <= 7 : 1 + 2 + … + 8 = 36
        assert_eq!(count(&cw, WHITE), 36);
    }

    #[test]
    fn degenerate_triangle_is_empty() {
        let mut fb = Framebuffer::new(4, 4);
        fill_triangle(&mut fb, Vec2::ZERO, Vec2::ONE, Vec2::splat(2.0), WHITE);
        assert_eq!(count(&fb, WHITE), 0);
    }

    #[test]
    fn disc_is_symmetric() {
        let mut fb = Framebuffer::new(10, 10);
        fill_circle(&mut fb, Vec2::splat(5.0), 2.0, WHITE);
        assert_eq!(fb.get(4, 4), Some(WHITE));
        assert_eq!(fb.get(5, 5), Some(WHITE));
        assert_eq!(fb.get(2, 5), Some(BLACK));
        assert_eq!(count(&fb, WHITE) % 4, 0);
    }
}
