use log::debug;

use crate::canvas::{Bitmap, Canvas};
use crate::geometry::{Point, RADIANS_PER_DEGREE};

/// Minor tick angles, in 5 degree steps around the top of the dial
pub const MINOR_TICK_ANGLES: [i32; 13] = [
    -90, -85, -80, -75, -70, -65, -60, -95, -100, -105, -110, -115, -120,
];

/// Major ticks on the right hand side of the dial
pub const RIGHT_TICK_ANGLES: [i32; 5] = [0, 15, 30, -15, -30];

/// Major ticks on the left hand side of the dial
pub const LEFT_TICK_ANGLES: [i32; 5] = [150, 165, 180, 195, 210];

pub const MINOR_TICK_SIZE: (usize, usize) = (1, 6);
pub const MAJOR_TICK_SIZE: (usize, usize) = (12, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Minor,
    Major,
}

impl TickKind {
    /// Stroke size as (width, height)
    pub fn size(self) -> (usize, usize) {
        match self {
            TickKind::Minor => MINOR_TICK_SIZE,
            TickKind::Major => MAJOR_TICK_SIZE,
        }
    }

    /// Point of the stroke that is placed on the computed position.
    ///
    /// Minor strokes are centred, major strokes hang off their left end.
    pub fn pivot(self) -> Point {
        let (width, height) = self.size();
        match self {
            TickKind::Minor => Point::new(width as i32 / 2, height as i32 / 2),
            TickKind::Major => Point::new(0, height as i32 / 2),
        }
    }
}

/// A stroke burned into the dial bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMark {
    pub angle: i32,
    pub kind: TickKind,
    /// Position in the dial bitmap's own frame, `(radius, radius)` is the centre
    pub position: Point,
}

fn on_circle(radius: i32, angle: i32) -> Point {
    let theta = angle as f64 * RADIANS_PER_DEGREE;
    let r = radius as f64;
    Point::new(
        (r + r * theta.cos()).round() as i32,
        (r + r * theta.sin()).round() as i32,
    )
}

/// Tick positions for a dial of `radius`
pub fn layout(radius: i32) -> Vec<TickMark> {
    let (major_length, _) = MAJOR_TICK_SIZE;
    let minor = MINOR_TICK_ANGLES.iter().map(|&angle| TickMark {
        angle,
        kind: TickKind::Minor,
        position: on_circle(radius, angle),
    });
    // Shifted by the stroke length so it ends on the right edge
    let right = RIGHT_TICK_ANGLES.iter().map(|&angle| {
        let p = on_circle(radius, angle);
        TickMark {
            angle,
            kind: TickKind::Major,
            position: Point::new(p.x - major_length as i32, p.y),
        }
    });
    let left = LEFT_TICK_ANGLES.iter().map(|&angle| TickMark {
        angle,
        kind: TickKind::Major,
        position: on_circle(radius, angle),
    });
    minor.chain(right).chain(left).collect()
}

/// Stamp `ticks` into `dial` with palette index `value`
pub fn stamp<C: Canvas + ?Sized>(
    canvas: &mut C,
    dial: &mut Bitmap,
    ticks: &[TickMark],
    value: u8,
) {
    let (w, h) = MINOR_TICK_SIZE;
    let minor = Bitmap::filled(w, h, value);
    let (w, h) = MAJOR_TICK_SIZE;
    let major = Bitmap::filled(w, h, value);

    for tick in ticks {
        let stroke = match tick.kind {
            TickKind::Minor => &minor,
            TickKind::Major => &major,
        };
        let pivot = tick.kind.pivot();
        canvas.blit_rotated(
            dial,
            tick.position.x,
            tick.position.y,
            stroke,
            pivot.x,
            pivot.y,
            0.0,
        );
    }
    debug!("stamped {} ticks into {}x{} dial", ticks.len(), dial.width(), dial.height());
}
