//! Joystick to motor command mixing, as done by the web controller.
//!
//! The joystick reports a speed (percent) and an `(x, y)` deflection. The
//! deflection angle (0° straight ahead, clockwise) selects how the left and
//! right wheel pairs share that speed: full ahead at 0°, spin right at 90°,
//! full reverse at 180°, spin left at 270°, blended linearly in between.

use std::{fmt::Write as _, str::FromStr};

use orover_core::utils::protocol::{Direction, MotorCommand, Position};

/// Highest percentage the two-digit speed field can carry.
const SPEED_MAX: f64 = 99.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveVector {
    pub speed: i32,
    pub x: i32,
    pub y: i32,
}

impl FromStr for DriveVector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<i32> = s
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("expected SPEED,X,Y: {e}"))?;
        let [speed, x, y] = parts[..] else {
            return Err(format!("expected 3 values, got {}", parts.len()));
        };
        if [speed, x, y].iter().any(|v| !(-100..=100).contains(v)) {
            return Err("values must be within -100..=100".into());
        }
        Ok(Self { speed, x, y })
    }
}

/// Left and right wheel factors in `-1.0..=1.0` for a deflection angle.
fn wheel_factors(angle: f64) -> (f64, f64) {
    if angle <= 90.0 {
        (1.0, (45.0 - angle) / 45.0)
    } else if angle <= 180.0 {
        ((135.0 - angle) / 45.0, -1.0)
    } else if angle <= 270.0 {
        (-1.0, (angle - 225.0) / 45.0)
    } else {
        ((angle - 315.0) / 45.0, 1.0)
    }
}

fn side(
    factor: f64,
    speed: i32,
) -> (Direction, i32) {
    let direction = if factor < 0.0 {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let percent = (factor.abs() * f64::from(speed)).round().clamp(0.0, SPEED_MAX);
    (direction, percent as i32)
}

/// Command stream for one joystick sample. Zero speed becomes a stop.
pub fn commands(v: DriveVector) -> String {
    if v.speed == 0 {
        return "S;".to_string();
    }

    let mut angle = f64::from(v.x).atan2(f64::from(v.y)).to_degrees().round();
    if angle < 0.0 {
        angle += 360.0;
    }
    let (left, right) = wheel_factors(angle);
    let (left_dir, left_pct) = side(left, v.speed);
    let (right_dir, right_pct) = side(right, v.speed);

    let mut out = String::new();
    for position in Position::ALL {
        let (direction, percent) = match position {
            Position::FrontLeft | Position::RearLeft => (left_dir, left_pct),
            Position::FrontRight | Position::RearRight => (right_dir, right_pct),
        };
        let _ = write!(out, "{};", MotorCommand::new(position, direction, percent));
    }
    out
}
