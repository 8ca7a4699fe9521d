use serde::{Deserialize, Serialize};

/// A city on the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[inline(always)]
pub fn euclidean_distance(from: &Point, to: &Point) -> f64 {
    let dx = from.x - to.x;
    let dy = from.y - to.y;

    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_four_five() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(euclidean_distance(&a, &b), 5.0);
        assert_eq!(euclidean_distance(&b, &a), 5.0);
        assert_eq!(euclidean_distance(&a, &a), 0.0);
    }
}
