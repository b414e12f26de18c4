use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::FLOAT_EPSILON;

/// 2D integer vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Widen to a float vector.
    pub fn to_f(self) -> Vector2f {
        Vector2f::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for Vector2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 2D float vector.
///
/// Equality is within [`FLOAT_EPSILON`] per component, matching scalar float
/// equality on [`Value`](crate::Value).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector2f {
    pub x: f32,
    pub y: f32,
}

impl Vector2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Truncate to an integer vector.
    pub fn to_i(self) -> Vector2i {
        Vector2i::new(self.x as i32, self.y as i32)
    }

    /// Component-wise comparison within [`FLOAT_EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= FLOAT_EPSILON && (self.y - other.y).abs() <= FLOAT_EPSILON
    }
}

impl PartialEq for Vector2f {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl fmt::Display for Vector2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_vector_equality_is_exact() {
        assert_eq!(Vector2i::new(1, 2), Vector2i::new(1, 2));
        assert_ne!(Vector2i::new(1, 2), Vector2i::new(2, 1));
    }

    #[test]
    fn float_vector_equality_has_tolerance() {
        let a = Vector2f::new(1.0, 2.0);
        let b = Vector2f::new(1.000001, 1.999999);
        assert_eq!(a, b);
        assert_ne!(a, Vector2f::new(1.1, 2.0));
    }

    #[test]
    fn widen_and_truncate() {
        assert_eq!(Vector2i::new(3, -4).to_f(), Vector2f::new(3.0, -4.0));
        assert_eq!(Vector2f::new(3.9, -4.2).to_i(), Vector2i::new(3, -4));
    }
}
