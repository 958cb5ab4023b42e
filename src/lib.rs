// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Attitude indicator dial: a ticked circular face with a pitch needle, a roll
//! indicator riding on an orbit around the centre, and a level bar.
//!
//! ```no_run
//! use gyro::{Gyro, GyroConfig, SoftwareCanvas, WindowConfig};
//!
//! let mut gyro = Gyro::new(GyroConfig::default(), &mut SoftwareCanvas)?;
//! gyro.update_pitch(15.0)?;
//! gyro.update_roll(-5.0)?;
//! gyro.update_tilt(-3.0)?;
//! gyro.show(&WindowConfig::default())?;
//! # Ok::<(), gyro::GyroError>(())
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gyro;
pub mod scene;
pub mod ticks;
mod window;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use canvas::{Bitmap, Canvas, SoftwareCanvas};
pub use config::{GyroConfig, WindowConfig};
pub use error::GyroError;
pub use geometry::{Point, Rounding};
pub use gyro::{Gyro, GyroCommand};
pub use scene::{Color, Display, FrameBuffer, Layer, Palette, Polygon, Scene, TileGrid};
pub use ticks::{TickKind, TickMark};
