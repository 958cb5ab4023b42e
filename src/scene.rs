use crate::canvas::Bitmap;
use crate::error::GyroError;
use crate::geometry::Point;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Indexed colors with per-entry transparency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    transparent: Vec<bool>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        let transparent = vec![false; colors.len()];
        Self {
            colors,
            transparent,
        }
    }

    pub fn make_transparent(&mut self, index: u8) {
        if let Some(flag) = self.transparent.get_mut(index as usize) {
            *flag = true;
        }
    }

    /// `None` for transparent or missing entries
    pub fn get(&self, index: u8) -> Option<Color> {
        let index = index as usize;
        match self.transparent.get(index) {
            Some(false) => self.colors.get(index).copied(),
            _ => None,
        }
    }
}

// ============================================================================
// SHAPES
// ============================================================================

/// Filled polygon whose points are relative to `location`.
///
/// The points it was built with are kept untouched so that every transform
/// starts from the same reference set.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    original_points: Vec<Point>,
    points: Vec<Point>,
    location: Point,
    palette: Palette,
    color_index: u8,
}

impl Polygon {
    pub fn new(points: Vec<Point>, location: Point, palette: Palette, color_index: u8) -> Self {
        Self {
            original_points: points.clone(),
            points,
            location,
            palette,
            color_index,
        }
    }

    pub fn original_points(&self) -> &[Point] {
        &self.original_points
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn color(&self) -> Option<Color> {
        self.palette.get(self.color_index)
    }

    /// Replace the whole point list
    pub fn set_points(&mut self, points: Vec<Point>) {
        debug_assert_eq!(points.len(), self.original_points.len());
        self.points = points;
    }

    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    /// Replace points and location together
    pub fn set_shape(&mut self, points: Vec<Point>, location: Point) {
        self.set_points(points);
        self.location = location;
    }

    /// Points translated by the location
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .map(move |p| {
                Point::new(
                    p.x.saturating_add(self.location.x),
                    p.y.saturating_add(self.location.y),
                )
            })
    }
}

/// Bitmap shown through a palette at a fixed location
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    pub bitmap: Bitmap,
    pub palette: Palette,
    pub location: Point,
}

impl TileGrid {
    pub fn new(bitmap: Bitmap, palette: Palette, location: Point) -> Self {
        Self {
            bitmap,
            palette,
            location,
        }
    }
}

// ============================================================================
// RETAINED MODE SCENE
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Layer<'a> {
    Polygon(&'a Polygon),
    TileGrid(&'a TileGrid),
}

/// Ordered layers; the first appended is drawn first and ends up behind the rest
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    background: Color,
    layers: Vec<Layer<'a>>,
}

impl<'a> Scene<'a> {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            layers: Vec::new(),
        }
    }

    pub fn append(&mut self, layer: Layer<'a>) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer<'a>] {
        &self.layers
    }

    /// Rasterise into an RGBA8 frame of `width * height` pixels
    pub fn render(&self, frame: &mut [u8], width: usize, height: usize) {
        let mut target = Frame::new(frame, width, height);
        target.clear(self.background);
        for layer in &self.layers {
            match layer {
                Layer::Polygon(polygon) => fill_polygon(&mut target, polygon),
                Layer::TileGrid(grid) => draw_tile_grid(&mut target, grid),
            }
        }
    }
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Something that can present a composed scene
pub trait Display {
    fn show(&mut self, scene: &Scene<'_>) -> Result<(), GyroError>;
}

/// Headless RGBA8 display
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    frame: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frame: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }
}

impl Display for FrameBuffer {
    fn show(&mut self, scene: &Scene<'_>) -> Result<(), GyroError> {
        scene.render(&mut self.frame, self.width, self.height);
        Ok(())
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

struct Frame<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        if let Some(px) = self.frame.get_mut(idx..idx + 4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }
}

/// Even-odd scanline fill sampled at pixel centres
fn fill_polygon(target: &mut Frame, polygon: &Polygon) {
    let Some(color) = polygon.color() else {
        return;
    };
    let points: Vec<Point> = polygon.absolute_points().collect();
    if points.len() < 3 {
        return;
    }
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.y)
        .max()
        .unwrap_or(0)
        .min(target.height as i32);

    let mut crossings = Vec::with_capacity(points.len());
    for y in min_y..max_y {
        let yc = y as f64 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            if (ay <= yc && yc < by) || (by <= yc && yc < ay) {
                let t = (yc - ay) / (by - ay);
                crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i32;
            let end = (span[1] - 0.5).ceil() as i32;
            for x in start.max(0)..end.min(target.width as i32) {
                target.set_pixel(x, y, color);
            }
        }
    }
}

fn draw_tile_grid(target: &mut Frame, grid: &TileGrid) {
    for y in 0..grid.bitmap.height() as i32 {
        for x in 0..grid.bitmap.width() as i32 {
            if let Some(color) = grid.bitmap.get(x, y).and_then(|v| grid.palette.get(v)) {
                target.set_pixel(
                    grid.location.x.saturating_add(x),
                    grid.location.y.saturating_add(y),
                    color,
                );
            }
        }
    }
}
