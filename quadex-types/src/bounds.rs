use crate::point::Point;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// One of the four children of a subdivided node, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    /// Traversal order used for insertion (first match wins) and search.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A 2D axis-aligned rectangle.
///
/// `(x, y)` is the top-left corner; `y` grows downwards. The rectangle is
/// closed, so every edge belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create a rectangle from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadex_types::Bounds;
    ///
    /// let city = Bounds::new(0.0, 0.0, 1000.0, 1000.0);
    /// assert_eq!(city.max_x(), 1000.0);
    /// ```
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A square of side `2 * half_extent` centred on `(cx, cy)`.
    #[inline]
    pub fn centered(cx: f64, cy: f64, half_extent: f64) -> Self {
        Self::new(
            cx - half_extent,
            cy - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edge-inclusive containment test on raw coordinates.
    #[inline]
    pub fn contains_coord(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.max_x() && y >= self.y && y <= self.max_y()
    }

    /// Check if a point lies within this rectangle, edges included.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadex_types::{Bounds, Point};
    ///
    /// let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(b.contains(&Point::new(10.0, 5.0, ())));
    /// assert!(!b.contains(&Point::new(11.0, 5.0, ())));
    /// ```
    #[inline]
    pub fn contains<T>(&self, point: &Point<T>) -> bool {
        self.contains_coord(point.x, point.y)
    }

    /// Closed-interval overlap test. Rectangles that only share an edge or a
    /// corner intersect. Symmetric.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.x > other.max_x()
            || self.max_x() < other.x
            || self.y > other.max_y()
            || self.max_y() < other.y)
    }

    /// Split into four equal children, indexed by [`Quadrant`].
    pub fn quadrants(&self) -> [Bounds; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [
            Bounds::new(self.x, self.y, hw, hh),
            Bounds::new(self.x + hw, self.y, hw, hh),
            Bounds::new(self.x, self.y + hh, hw, hh),
            Bounds::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> Bounds {
        self.quadrants()[quadrant.index()]
    }
}

impl From<Bounds> for Rect<f64> {
    fn from(bounds: Bounds) -> Self {
        Rect::new(
            geo::coord! { x: bounds.min_x(), y: bounds.min_y() },
            geo::coord! { x: bounds.max_x(), y: bounds.max_y() },
        )
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds::new(rect.min().x, rect.min().y, rect.width(), rect.height())
    }
}
