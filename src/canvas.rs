// ============================================================================
// INDEXED BITMAPS
// ============================================================================

/// Palette index treated as "nothing here" by blits and tile grids
pub const SKIP_INDEX: u8 = 0;

/// Grid of palette indices, row major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, SKIP_INDEX)
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Writes outside the bitmap are clipped
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = value;
        }
    }

    /// Number of pixels holding `value`
    pub fn count(&self, value: u8) -> usize {
        self.pixels.iter().filter(|&&v| v == value).count()
    }
}

// ============================================================================
// CANVAS OPERATIONS
// ============================================================================

/// Drawing operations the dial needs from its bitmap layer
pub trait Canvas {
    /// Draw a circle outline centred on `(cx, cy)`, `stroke_width` pixels thick
    /// measured inwards from `radius`.
    fn draw_circle(
        &mut self,
        bitmap: &mut Bitmap,
        cx: i32,
        cy: i32,
        radius: i32,
        stroke_width: i32,
        value: u8,
    );

    /// Copy `src` into `dest` so that the source pixel `(pivot_x, pivot_y)` lands on
    /// `(dest_x, dest_y)`, rotated by `angle` radians about that pivot. Source pixels
    /// holding [`SKIP_INDEX`] are not copied.
    #[allow(clippy::too_many_arguments)]
    fn blit_rotated(
        &mut self,
        dest: &mut Bitmap,
        dest_x: i32,
        dest_y: i32,
        src: &Bitmap,
        pivot_x: i32,
        pivot_y: i32,
        angle: f64,
    );
}

/// Plain CPU implementation of [`Canvas`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareCanvas;

impl Canvas for SoftwareCanvas {
    fn draw_circle(
        &mut self,
        bitmap: &mut Bitmap,
        cx: i32,
        cy: i32,
        radius: i32,
        stroke_width: i32,
        value: u8,
    ) {
        let inner = radius - stroke_width;
        for y in -radius - 1..=radius + 1 {
            for x in -radius - 1..=radius + 1 {
                let dist = ((x * x + y * y) as f64).sqrt().round() as i32;
                if dist <= radius && dist > inner {
                    bitmap.set(cx + x, cy + y, value);
                }
            }
        }
    }

    fn blit_rotated(
        &mut self,
        dest: &mut Bitmap,
        dest_x: i32,
        dest_y: i32,
        src: &Bitmap,
        pivot_x: i32,
        pivot_y: i32,
        angle: f64,
    ) {
        if angle == 0.0 {
            for sy in 0..src.height() as i32 {
                for sx in 0..src.width() as i32 {
                    match src.get(sx, sy) {
                        Some(value) if value != SKIP_INDEX => {
                            dest.set(dest_x + sx - pivot_x, dest_y + sy - pivot_y, value)
                        }
                        _ => {}
                    }
                }
            }
            return;
        }

        let (sin, cos) = angle.sin_cos();
        // Bounding box of the rotated source around the destination pivot
        let corners = [
            (-pivot_x, -pivot_y),
            (src.width() as i32 - pivot_x, -pivot_y),
            (-pivot_x, src.height() as i32 - pivot_y),
            (src.width() as i32 - pivot_x, src.height() as i32 - pivot_y),
        ];
        let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
        let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
        for (x, y) in corners {
            let (x, y) = (x as f64, y as f64);
            let rx = x * cos - y * sin;
            let ry = x * sin + y * cos;
            min_x = min_x.min(rx);
            max_x = max_x.max(rx);
            min_y = min_y.min(ry);
            max_y = max_y.max(ry);
        }

        for y in min_y.floor() as i32..=max_y.ceil() as i32 {
            for x in min_x.floor() as i32..=max_x.ceil() as i32 {
                // Inverse rotation, sampled at the pixel centre
                let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
                let sx = fx * cos + fy * sin + pivot_x as f64;
                let sy = -fx * sin + fy * cos + pivot_y as f64;
                match src.get(sx.floor() as i32, sy.floor() as i32) {
                    Some(value) if value != SKIP_INDEX => dest.set(dest_x + x, dest_y + y, value),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_bitmap_are_clipped() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.set(-1, 0, 1);
        bitmap.set(4, 0, 1);
        bitmap.set(0, 7, 1);
        assert_eq!(bitmap.count(1), 0);
        assert_eq!(bitmap.get(4, 0), None);
    }

    #[test]
    fn circle_outline_has_requested_stroke() {
        let mut bitmap = Bitmap::new(101, 101);
        SoftwareCanvas.draw_circle(&mut bitmap, 50, 50, 50, 2, 2);
        assert_eq!(bitmap.get(50, 0), Some(2));
        assert_eq!(bitmap.get(50, 1), Some(2));
        assert_eq!(bitmap.get(50, 2), Some(SKIP_INDEX));
        assert_eq!(bitmap.get(100, 50), Some(2));
        assert_eq!(bitmap.get(50, 50), Some(SKIP_INDEX));
    }

    #[test]
    fn unrotated_blit_places_pivot_on_destination() {
        let mut dest = Bitmap::new(20, 20);
        let stroke = Bitmap::filled(1, 6, 2);
        SoftwareCanvas.blit_rotated(&mut dest, 10, 10, &stroke, 0, 3, 0.0);
        assert_eq!(dest.count(2), 6);
        assert_eq!(dest.get(10, 7), Some(2));
        assert_eq!(dest.get(10, 12), Some(2));
        assert_eq!(dest.get(10, 13), Some(SKIP_INDEX));
    }

    #[test]
    fn blit_skips_transparent_source_pixels() {
        let mut dest = Bitmap::filled(4, 4, 3);
        let mut src = Bitmap::new(2, 1);
        src.set(1, 0, 1);
        SoftwareCanvas.blit_rotated(&mut dest, 0, 0, &src, 0, 0, 0.0);
        assert_eq!(dest.get(0, 0), Some(3));
        assert_eq!(dest.get(1, 0), Some(1));
    }

    #[test]
    fn quarter_turn_blit_turns_horizontal_stroke_vertical() {
        let mut dest = Bitmap::new(20, 20);
        let stroke = Bitmap::filled(6, 1, 1);
        let quarter = std::f64::consts::FRAC_PI_2;
        SoftwareCanvas.blit_rotated(&mut dest, 10, 10, &stroke, 0, 0, quarter);
        assert_eq!(dest.count(1), 6);
        for y in 10..16 {
            assert_eq!(dest.get(9, y), Some(1));
        }
    }
}
