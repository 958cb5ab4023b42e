use bon::Builder;

use crate::error::GyroError;
use crate::geometry::{Rounding, LEGACY_RADIANS_PER_DEGREE, RADIANS_PER_DEGREE};
use crate::scene::Color;

/// Largest dial radius accepted, keeps the dial bitmap and vertex math in range
pub const MAX_RADIUS: i32 = 4096;

/// Largest distance of the dial centre from the display origin on either axis
pub const MAX_POSITION: i32 = 1 << 20;

/// The level bar is this much shorter than the needle on each side
pub const LEVEL_BAR_INSET: i32 = 10;

/// Configuration for one gyro dial
#[derive(Debug, Clone, Builder)]
pub struct GyroConfig {
    // Placement of the dial centre on the display
    #[builder(default = 100)]
    pub posx: i32,
    #[builder(default = 100)]
    pub posy: i32,

    // Dial geometry
    #[builder(default = 50)]
    pub radius: i32,
    #[builder(default = 10)]
    pub padding: i32,
    #[builder(default = 10)]
    pub tick_height: i32,

    // Transform behaviour
    #[builder(default)]
    pub rounding: Rounding,
    #[builder(default = RADIANS_PER_DEGREE)]
    pub radians_per_degree: f64,

    // Colors
    #[builder(default = Color::new(0x00, 0x00, 0x00))]
    pub background_color: Color,
    /// Index 0 is always transparent
    #[builder(default = vec![
        Color::from_hex(0x000000),
        Color::from_hex(0x440044),
        Color::from_hex(0xFF00FF),
    ])]
    pub dial_palette: Vec<Color>,
    #[builder(default = 2)]
    pub dial_color_index: u8,
    #[builder(default = vec![
        Color::from_hex(0x123456),
        Color::from_hex(0xFF0000),
        Color::from_hex(0x00FF00),
        Color::from_hex(0x0000FF),
    ])]
    pub needle_palette: Vec<Color>,
    #[builder(default = 0)]
    pub needle_color_index: u8,
    #[builder(default = 1)]
    pub indicator_color_index: u8,
    #[builder(default = 2)]
    pub level_color_index: u8,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GyroConfig {
    /// Ceiling rounding and the truncated 0.017 factor of the first widget revision
    pub fn legacy() -> Self {
        Self::builder()
            .rounding(Rounding::Ceil)
            .radians_per_degree(LEGACY_RADIANS_PER_DEGREE)
            .build()
    }

    /// Half length of the needle, floor division as the dial was designed with
    pub fn line_roll_length(&self) -> i32 {
        (2 * self.radius - 2 * self.padding).div_euclid(2)
    }

    pub fn level_half_length(&self) -> i32 {
        self.line_roll_length() - LEVEL_BAR_INSET
    }

    /// Distance of the roll indicator from the dial centre
    pub fn indicator_orbit(&self) -> i32 {
        self.radius - 2 * self.padding
    }

    pub fn validate(&self) -> Result<(), GyroError> {
        let invalid = |msg: String| Err(GyroError::InvalidConfiguration(msg));
        if self.padding < 0 {
            return invalid(format!("padding must not be negative, got {}", self.padding));
        }
        if self.radius > MAX_RADIUS {
            return invalid(format!(
                "radius {} exceeds the maximum of {MAX_RADIUS}",
                self.radius
            ));
        }
        if self.padding.checked_mul(2).map_or(true, |twice| self.radius <= twice) {
            return invalid(format!(
                "radius {} must be larger than twice the padding {}",
                self.radius, self.padding
            ));
        }
        if self.tick_height <= 0 || self.tick_height > MAX_RADIUS {
            return invalid(format!(
                "tick height must be in 1..={MAX_RADIUS}, got {}",
                self.tick_height
            ));
        }
        let limit = MAX_POSITION as u32;
        if self.posx.unsigned_abs() > limit || self.posy.unsigned_abs() > limit {
            return invalid(format!(
                "position ({}, {}) is further than {MAX_POSITION} from the origin",
                self.posx, self.posy
            ));
        }
        if self.level_half_length() <= 0 {
            return invalid(format!(
                "needle half length {} leaves no room for the level bar",
                self.line_roll_length()
            ));
        }
        if !self.radians_per_degree.is_finite() || self.radians_per_degree == 0.0 {
            return invalid(format!(
                "degree conversion factor {} is unusable",
                self.radians_per_degree
            ));
        }
        if self.dial_color_index as usize >= self.dial_palette.len() || self.dial_color_index == 0
        {
            return invalid(format!(
                "dial color index {} is not an opaque palette entry",
                self.dial_color_index
            ));
        }
        for index in [
            self.needle_color_index,
            self.indicator_color_index,
            self.level_color_index,
        ] {
            if index as usize >= self.needle_palette.len() {
                return invalid(format!("needle palette has no entry {index}"));
            }
        }
        Ok(())
    }
}

/// Configuration for the presenting window
#[derive(Debug, Clone, Builder)]
pub struct WindowConfig {
    #[builder(default = "Gyro".to_string())]
    pub title: String,
    #[builder(default = 320)]
    pub width: usize,
    #[builder(default = 240)]
    pub height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
