//! Classified gestures delivered to handlers.
//!
//! A [`Gesture`] is the only thing that leaves the engine. Besides the typed form,
//! kinds and directions carry stable numeric codes for consumers that speak integers
//! over a bus (swipe = 100, pinch = 101; up/down/left/right/in/out = 10..=15).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Swipe,
    Pinch,
}

impl GestureKind {
    pub fn code(self) -> i32 {
        match self {
            GestureKind::Swipe => 100,
            GestureKind::Pinch => 101,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GestureKind::Swipe => "Swipe",
            GestureKind::Pinch => "Pinch",
        }
    }
}

/// Gesture direction. `Up`/`Down`/`Left`/`Right` only occur for swipes,
/// `In`/`Out` only for pinches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    In,
    Out,
}

impl Direction {
    pub fn code(self) -> i32 {
        match self {
            Direction::Up => 10,
            Direction::Down => 11,
            Direction::Left => 12,
            Direction::Right => 13,
            Direction::In => 14,
            Direction::Out => 15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// One classified gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gesture {
    pub kind: GestureKind,
    pub direction: Direction,
    pub fingers: u32,
}

impl Gesture {
    pub fn swipe(direction: Direction, fingers: u32) -> Self {
        Self {
            kind: GestureKind::Swipe,
            direction,
            fingers,
        }
    }

    pub fn pinch(direction: Direction, fingers: u32) -> Self {
        Self {
            kind: GestureKind::Pinch,
            direction,
            fingers,
        }
    }

    /// `(kind, direction, fingers)` as bus integers.
    pub fn codes(&self) -> (i32, i32, i32) {
        (
            self.kind.code(),
            self.direction.code(),
            i32::try_from(self.fingers).unwrap_or(i32::MAX),
        )
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] direction: {}, fingers: {}",
            self.kind.as_str(),
            self.direction.as_str(),
            self.fingers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_log_format() {
        let g = Gesture::swipe(Direction::Left, 3);
        assert_eq!(g.to_string(), "[Swipe] direction: left, fingers: 3");
        let p = Gesture::pinch(Direction::Out, 4);
        assert_eq!(p.to_string(), "[Pinch] direction: out, fingers: 4");
    }

    #[test]
    fn bus_codes() {
        assert_eq!(Gesture::swipe(Direction::Up, 3).codes(), (100, 10, 3));
        assert_eq!(Gesture::pinch(Direction::In, 2).codes(), (101, 14, 2));
        assert_eq!(Direction::Right.code(), 13);
        assert_eq!(Direction::Out.code(), 15);
    }

    #[test]
    fn json_form_is_snake_case() {
        let json = serde_json::to_string(&Gesture::pinch(Direction::In, 2)).unwrap();
        assert_eq!(json, r#"{"kind":"pinch","direction":"in","fingers":2}"#);
    }
}
