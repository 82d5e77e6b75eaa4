use geo::{Coord, Distance, Euclidean};
use serde::{Deserialize, Serialize};

/// A 2D point carrying an opaque payload.
///
/// Identity for removal and update is the exact `(x, y)` pair. The payload
/// is never compared, so two points with equal payloads at different
/// positions are distinct, and two points at the same position are the same
/// entity regardless of payload.
///
/// # Examples
///
/// ```
/// use quadex_types::Point;
///
/// let a = Point::new(3.0, 4.0, "vehicle-a");
/// let b = Point::new(3.0, 4.0, "vehicle-b");
/// assert!(a.same_position(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: f64,
    pub y: f64,
    pub data: T,
}

impl<T> Point<T> {
    #[inline]
    pub fn new(x: f64, y: f64, data: T) -> Self {
        Self { x, y, data }
    }

    /// Coordinates as a `geo::Coord`.
    #[inline]
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }

    /// Exact coordinate equality, ignoring payload.
    #[inline]
    pub fn same_position<U>(&self, other: &Point<U>) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Euclidean distance to an arbitrary coordinate.
    #[inline]
    pub fn distance_to(&self, target: impl Into<Coord<f64>>) -> f64 {
        Euclidean.distance(geo::Point::from(self.coord()), geo::Point::from(target.into()))
    }

    /// Replace the payload, keeping the position.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Point<U> {
        Point {
            x: self.x,
            y: self.y,
            data: f(self.data),
        }
    }
}

impl<T> From<Point<T>> for geo::Point<f64> {
    fn from(point: Point<T>) -> Self {
        geo::Point::new(point.x, point.y)
    }
}

impl<T> From<&Point<T>> for Coord<f64> {
    fn from(point: &Point<T>) -> Self {
        point.coord()
    }
}

/// Euclidean distance between two points. Symmetric, zero iff the
/// coordinates are equal.
///
/// # Examples
///
/// ```
/// use quadex_types::{Point, distance};
///
/// let origin = Point::new(0.0, 0.0, ());
/// let p = Point::new(3.0, 4.0, ());
/// assert_eq!(distance(&origin, &p), 5.0);
/// ```
#[inline]
pub fn distance<A, B>(a: &Point<A>, b: &Point<B>) -> f64 {
    a.distance_to(b.coord())
}
