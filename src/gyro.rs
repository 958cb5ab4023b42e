use log::{debug, trace};

use crate::canvas::{Bitmap, Canvas};
use crate::config::GyroConfig;
use crate::error::{ensure_finite, GyroError};
use crate::geometry::{rotate_all, Point};
use crate::scene::{Layer, Palette, Polygon, Scene, TileGrid};
use crate::ticks::{self, TickMark};

/// Roll angle 0 puts the indicator straight above the dial centre
pub const ROLL_OFFSET: f64 = -std::f64::consts::FRAC_PI_2;

/// Indicator corner offset from the dial centre at construction
pub const INDICATOR_OFFSET: Point = Point::new(-5, -30);

/// Rest shape of the roll indicator
pub const INDICATOR_POINTS: [Point; 4] = [
    Point::new(0, 0),
    Point::new(20, 0),
    Point::new(20, -6),
    Point::new(0, -6),
];

/// Outline thickness of the dial circle
pub const DIAL_STROKE: i32 = 2;

/// Command enum for type-safe attitude updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GyroCommand {
    SetPitch(f64),
    SetRoll(f64),
    SetTilt(f64),
    SetAttitude { pitch: f64, roll: f64, tilt: f64 },
}

/// Attitude indicator: a ticked dial with a pitch needle, a roll indicator
/// and a level bar.
#[derive(Debug, Clone)]
pub struct Gyro {
    config: GyroConfig,
    needle: Polygon,
    indicator: Polygon,
    indicator_origin: Point,
    level_bar: Polygon,
    level_origin_y: i32,
    background: TileGrid,
    ticks: Vec<TickMark>,
}

/// `(0,0), (L,0), (L,h), (-L,h), (-L,0)`
fn bar_points(half_length: i32, height: i32) -> Vec<Point> {
    vec![
        Point::new(0, 0),
        Point::new(half_length, 0),
        Point::new(half_length, height),
        Point::new(-half_length, height),
        Point::new(-half_length, 0),
    ]
}

impl Gyro {
    pub fn new<C: Canvas + ?Sized>(
        config: GyroConfig,
        canvas: &mut C,
    ) -> Result<Self, GyroError> {
        config.validate()?;
        let (posx, posy, radius) = (config.posx, config.posy, config.radius);
        let line_roll_length = config.line_roll_length();
        let needle_palette = Palette::new(config.needle_palette.clone());

        let needle = Polygon::new(
            bar_points(line_roll_length, config.tick_height),
            Point::new(posx, posy),
            needle_palette.clone(),
            config.needle_color_index,
        );

        let indicator_origin = Point::new(posx + INDICATOR_OFFSET.x, posy + INDICATOR_OFFSET.y);
        let indicator = Polygon::new(
            INDICATOR_POINTS.to_vec(),
            indicator_origin,
            needle_palette.clone(),
            config.indicator_color_index,
        );

        let level_origin_y = posy - config.tick_height / 2;
        let level_bar = Polygon::new(
            bar_points(config.level_half_length(), config.tick_height / 3),
            Point::new(posx, level_origin_y),
            needle_palette,
            config.level_color_index,
        );

        let side = 2 * radius as usize + 1;
        let mut dial = Bitmap::new(side, side);
        canvas.draw_circle(
            &mut dial,
            radius,
            radius,
            radius,
            DIAL_STROKE,
            config.dial_color_index,
        );
        let ticks = ticks::layout(radius);
        ticks::stamp(canvas, &mut dial, &ticks, config.dial_color_index);

        let mut dial_palette = Palette::new(config.dial_palette.clone());
        dial_palette.make_transparent(0);
        let background = TileGrid::new(
            dial,
            dial_palette,
            Point::new(posx - radius, posy - radius),
        );

        debug!("gyro at ({posx}, {posy}), radius {radius}, padding {}", config.padding);
        debug!("needle half length {line_roll_length}, level baseline {level_origin_y}");

        Ok(Self {
            config,
            needle,
            indicator,
            indicator_origin,
            level_bar,
            level_origin_y,
            background,
            ticks,
        })
    }

    fn theta(&self, angle: f64) -> f64 {
        angle * self.config.radians_per_degree
    }

    /// Rotate the needle to `angle` degrees about its local origin
    pub fn update_pitch(&mut self, angle: f64) -> Result<(), GyroError> {
        let theta = self.theta(ensure_finite(angle)?);
        let points = rotate_all(self.needle.original_points(), theta, self.config.rounding);
        trace!("pitch {angle}: {points:?}");
        self.needle.set_points(points);
        Ok(())
    }

    /// Rotate the roll indicator and move it along its orbit around the dial centre
    pub fn update_roll(&mut self, angle: f64) -> Result<(), GyroError> {
        let theta = self.theta(ensure_finite(angle)?) + ROLL_OFFSET;
        let rounding = self.config.rounding;
        let orbit = self.config.indicator_orbit() as f64;

        let (sin, cos) = theta.sin_cos();
        let delta = Point::new(rounding.apply(orbit * cos), rounding.apply(orbit * sin));
        let location = Point::new(
            self.indicator_origin.x + delta.x - INDICATOR_OFFSET.x,
            self.indicator_origin.y + delta.y - INDICATOR_OFFSET.y,
        );
        let points = rotate_all(self.indicator.original_points(), theta, rounding);
        trace!("roll {angle}: at {location:?} {points:?}");
        self.indicator.set_shape(points, location);
        Ok(())
    }

    /// Move the level bar `value` pixels below its baseline, negative moves it up
    pub fn update_tilt(&mut self, value: f64) -> Result<(), GyroError> {
        let offset = self.config.rounding.apply(ensure_finite(value)?);
        let location = Point::new(
            self.level_bar.location().x,
            self.level_origin_y.saturating_add(offset),
        );
        trace!("tilt {value}: at {location:?}");
        self.level_bar.set_location(location);
        Ok(())
    }

    /// Apply a command; nothing changes if any of its values is rejected
    pub fn apply(&mut self, command: GyroCommand) -> Result<(), GyroError> {
        match command {
            GyroCommand::SetPitch(angle) => self.update_pitch(angle),
            GyroCommand::SetRoll(angle) => self.update_roll(angle),
            GyroCommand::SetTilt(value) => self.update_tilt(value),
            GyroCommand::SetAttitude { pitch, roll, tilt } => {
                ensure_finite(pitch)?;
                ensure_finite(roll)?;
                ensure_finite(tilt)?;
                self.update_pitch(pitch)?;
                self.update_roll(roll)?;
                self.update_tilt(tilt)
            }
        }
    }

    /// Layers in composition order: level bar, needle, indicator, dial face
    pub fn scene(&self) -> Scene<'_> {
        let mut scene = Scene::new(self.config.background_color);
        scene.append(Layer::Polygon(&self.level_bar));
        scene.append(Layer::Polygon(&self.needle));
        scene.append(Layer::Polygon(&self.indicator));
        scene.append(Layer::TileGrid(&self.background));
        scene
    }

    pub fn config(&self) -> &GyroConfig {
        &self.config
    }

    pub fn needle(&self) -> &Polygon {
        &self.needle
    }

    pub fn indicator(&self) -> &Polygon {
        &self.indicator
    }

    pub fn level_bar(&self) -> &Polygon {
        &self.level_bar
    }

    pub fn level_origin_y(&self) -> i32 {
        self.level_origin_y
    }

    pub fn background(&self) -> &TileGrid {
        &self.background
    }

    pub fn ticks(&self) -> &[TickMark] {
        &self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SoftwareCanvas;
    use crate::config::MAX_POSITION;
    use crate::geometry::Rounding;

    fn gyro(config: GyroConfig) -> Gyro {
        Gyro::new(config, &mut SoftwareCanvas).unwrap()
    }

    /// Records every blit angle
    #[derive(Default)]
    struct RecordingCanvas {
        circles: usize,
        blit_angles: Vec<f64>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_circle(
            &mut self,
            bitmap: &mut Bitmap,
            cx: i32,
            cy: i32,
            radius: i32,
            stroke: i32,
            value: u8,
        ) {
            self.circles += 1;
            SoftwareCanvas.draw_circle(bitmap, cx, cy, radius, stroke, value);
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
            self.blit_angles.push(angle);
            SoftwareCanvas.blit_rotated(dest, dest_x, dest_y, src, pivot_x, pivot_y, angle);
        }
    }

    #[test]
    fn construction_builds_reference_shapes() {
        let gyro = gyro(GyroConfig::default());
        assert_eq!(
            gyro.needle().points(),
            &[
                Point::new(0, 0),
                Point::new(40, 0),
                Point::new(40, 10),
                Point::new(-40, 10),
                Point::new(-40, 0),
            ]
        );
        assert_eq!(gyro.needle().location(), Point::new(100, 100));
        assert_eq!(gyro.indicator().points(), &INDICATOR_POINTS);
        assert_eq!(gyro.indicator().location(), Point::new(95, 70));
        assert_eq!(
            gyro.level_bar().points(),
            &[
                Point::new(0, 0),
                Point::new(30, 0),
                Point::new(30, 3),
                Point::new(-30, 3),
                Point::new(-30, 0),
            ]
        );
        assert_eq!(gyro.level_bar().location(), Point::new(100, 95));
        assert_eq!(gyro.level_origin_y(), 95);
        assert_eq!(gyro.background().location, Point::new(50, 50));
        assert_eq!(gyro.background().bitmap.width(), 101);
    }

    #[test]
    fn construction_draws_dial_once_with_unrotated_ticks() {
        let mut canvas = RecordingCanvas::default();
        let gyro = Gyro::new(GyroConfig::default(), &mut canvas).unwrap();
        assert_eq!(canvas.circles, 1);
        assert_eq!(canvas.blit_angles.len(), gyro.ticks().len());
        assert!(canvas.blit_angles.iter().all(|&a| a == 0.0));
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let config = GyroConfig::builder().radius(20).padding(10).build();
        let result = Gyro::new(config, &mut SoftwareCanvas);
        assert!(matches!(result, Err(GyroError::InvalidConfiguration(_))));
    }

    #[test]
    fn dials_at_extreme_positions_are_rejected() {
        let cases = [
            GyroConfig::builder().posx(i32::MIN).build(),
            GyroConfig::builder().posy(i32::MAX).build(),
            GyroConfig::builder().padding(i32::MAX).build(),
            GyroConfig::builder().tick_height(i32::MAX).build(),
        ];
        for config in cases {
            let result = Gyro::new(config, &mut SoftwareCanvas);
            assert!(matches!(result, Err(GyroError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn dial_at_the_position_limit_rolls_freely() {
        let config = GyroConfig::builder()
            .posx(-MAX_POSITION)
            .posy(MAX_POSITION)
            .build();
        let mut gyro = gyro(config);
        assert_eq!(gyro.config().posx, -MAX_POSITION);
        gyro.update_roll(90.0).unwrap();
        let orbit = gyro.config().indicator_orbit();
        let expected = Point::new(-MAX_POSITION + orbit, MAX_POSITION);
        assert_eq!(gyro.indicator().location(), expected);
        assert_eq!(gyro.background().location.y, MAX_POSITION - gyro.config().radius);
    }

    #[test]
    fn pitch_zero_restores_original_points() {
        let mut gyro = gyro(GyroConfig::default());
        gyro.update_pitch(37.0).unwrap();
        assert_ne!(gyro.needle().points(), gyro.needle().original_points());
        gyro.update_pitch(0.0).unwrap();
        assert_eq!(gyro.needle().points(), gyro.needle().original_points());
    }

    #[test]
    fn pitch_quarter_turn_keeps_pivot() {
        let mut gyro = gyro(GyroConfig::default());
        gyro.update_pitch(90.0).unwrap();
        let points = gyro.needle().points();
        assert_eq!(points[0], Point::new(0, 0));
        assert_eq!(points[1], Point::new(0, 40));
        assert_eq!(points[2], Point::new(-10, 40));
        assert_eq!(points[4], Point::new(0, -40));
        assert_eq!(gyro.needle().location(), Point::new(100, 100));
    }

    #[test]
    fn pitch_does_not_accumulate_drift() {
        let mut gyro = gyro(GyroConfig::default());
        for angle in 0..500 {
            gyro.update_pitch(angle as f64 * 0.7).unwrap();
        }
        gyro.update_pitch(12.0).unwrap();
        let fresh = {
            let mut other = self::gyro(GyroConfig::default());
            other.update_pitch(12.0).unwrap();
            other.needle().points().to_vec()
        };
        assert_eq!(gyro.needle().points(), &fresh[..]);
    }

    #[test]
    fn pitch_rounding_policy_differs_on_negative_fractions() {
        let mut exact = gyro(GyroConfig::default());
        let mut ceil = gyro(GyroConfig::builder().rounding(Rounding::Ceil).build());
        exact.update_pitch(-10.0).unwrap();
        ceil.update_pitch(-10.0).unwrap();
        // (40, 0) at -10 degrees is (39.39, -6.95)
        assert_eq!(exact.needle().points()[1], Point::new(39, -7));
        assert_eq!(ceil.needle().points()[1], Point::new(40, -6));
        // (-40, 0) is (-39.39, 6.95)
        assert_eq!(exact.needle().points()[4], Point::new(-39, 7));
        assert_eq!(ceil.needle().points()[4], Point::new(-39, 7));
    }

    #[test]
    fn legacy_factor_drifts_from_exact_degrees() {
        let mut legacy = gyro(GyroConfig::legacy());
        legacy.update_pitch(180.0).unwrap();
        // 180 * 0.017 = 3.06 rad, short of a half turn
        assert_eq!(legacy.needle().points()[1], Point::new(-39, 4));
    }

    #[test]
    fn roll_zero_parks_indicator_at_zenith() {
        let mut gyro = gyro(GyroConfig::default());
        gyro.update_roll(0.0).unwrap();
        // orbit is radius - 2 * padding = 30 straight up from the centre
        assert_eq!(gyro.indicator().location(), Point::new(100, 70));
        assert_eq!(
            gyro.indicator().points(),
            &[
                Point::new(0, 0),
                Point::new(0, -20),
                Point::new(-6, -20),
                Point::new(-6, 0),
            ]
        );
    }

    #[test]
    fn roll_moves_indicator_along_its_orbit() {
        let mut gyro = gyro(GyroConfig::default());
        gyro.update_roll(90.0).unwrap();
        assert_eq!(gyro.indicator().location(), Point::new(130, 100));
        assert_eq!(gyro.indicator().points(), &INDICATOR_POINTS);

        gyro.update_roll(-90.0).unwrap();
        assert_eq!(gyro.indicator().location(), Point::new(70, 100));

        for angle in (-180..180).step_by(13) {
            gyro.update_roll(angle as f64).unwrap();
            let dist = gyro.indicator().location().distance(Point::new(100, 100));
            assert!((dist - 30.0).abs() <= 1.0, "angle {angle}: {dist}");
        }
    }

    #[test]
    fn tilt_is_a_pure_vertical_translation() {
        let mut gyro = gyro(GyroConfig::default());
        let points = gyro.level_bar().points().to_vec();
        gyro.update_tilt(-7.0).unwrap();
        assert_eq!(gyro.level_bar().location(), Point::new(100, 88));
        gyro.update_tilt(12.0).unwrap();
        assert_eq!(gyro.level_bar().location(), Point::new(100, 107));
        gyro.update_tilt(0.0).unwrap();
        assert_eq!(gyro.level_bar().location().y, gyro.level_origin_y());
        assert_eq!(gyro.level_bar().points(), &points[..]);
    }

    #[test]
    fn non_finite_input_is_rejected_without_side_effects() {
        let mut gyro = gyro(GyroConfig::default());
        gyro.update_pitch(30.0).unwrap();
        gyro.update_roll(30.0).unwrap();
        let before = gyro.clone();

        assert!(matches!(gyro.update_pitch(f64::NAN), Err(GyroError::InvalidAngle(_))));
        assert!(matches!(gyro.update_roll(f64::INFINITY), Err(GyroError::InvalidAngle(_))));
        assert!(matches!(gyro.update_tilt(f64::NEG_INFINITY), Err(GyroError::InvalidAngle(_))));
        let attitude = GyroCommand::SetAttitude {
            pitch: 5.0,
            roll: 5.0,
            tilt: f64::NAN,
        };
        assert!(gyro.apply(attitude).is_err());

        assert_eq!(gyro.needle(), before.needle());
        assert_eq!(gyro.indicator(), before.indicator());
        assert_eq!(gyro.level_bar(), before.level_bar());
    }

    #[test]
    fn commands_drive_the_same_updates() {
        let mut by_command = gyro(GyroConfig::default());
        let mut direct = gyro(GyroConfig::default());
        by_command
            .apply(GyroCommand::SetAttitude {
                pitch: 12.0,
                roll: -8.0,
                tilt: -3.0,
            })
            .unwrap();
        direct.update_pitch(12.0).unwrap();
        direct.update_roll(-8.0).unwrap();
        direct.update_tilt(-3.0).unwrap();
        assert_eq!(by_command.needle(), direct.needle());
        assert_eq!(by_command.indicator(), direct.indicator());
        assert_eq!(by_command.level_bar(), direct.level_bar());
    }

    #[test]
    fn scene_layers_are_in_composition_order() {
        let gyro = gyro(GyroConfig::default());
        let scene = gyro.scene();
        let layers = scene.layers();
        assert_eq!(layers.len(), 4);
        assert!(matches!(layers[0], Layer::Polygon(p) if std::ptr::eq(p, gyro.level_bar())));
        assert!(matches!(layers[1], Layer::Polygon(p) if std::ptr::eq(p, gyro.needle())));
        assert!(matches!(layers[2], Layer::Polygon(p) if std::ptr::eq(p, gyro.indicator())));
        assert!(matches!(layers[3], Layer::TileGrid(_)));
    }
}
