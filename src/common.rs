use std::fmt;

/// Simulated time covered by a single turn.
pub const SECONDS_PER_TURN: f64 = 1.0;

#[derive(PartialEq, Copy, Clone, Debug, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

pub trait SpeedConv {
    fn kmh(&self) -> f64;

    /// Kilometres covered in one turn at this speed.
    fn km_per_turn(&self) -> f64 {
        self.kmh() * SECONDS_PER_TURN / 3600.0
    }
}

impl SpeedConv for u32 {
    fn kmh(&self) -> f64 {
        *self as f64
    }
}
