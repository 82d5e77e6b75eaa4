//! # quadex-types
//!
//! Geometry primitives for the quadex spatial index.
//!
//! - **`Point<T>`**: a coordinate pair carrying an opaque payload
//! - **`Bounds`**: an axis-aligned rectangle anchored at its top-left corner
//!
//! Both types are serializable with Serde and convert to and from the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use quadex_types::{Bounds, Point};
//!
//! let area = Bounds::new(0.0, 0.0, 100.0, 100.0);
//! let courier = Point::new(50.0, 50.0, "courier-17");
//! assert!(area.contains(&courier));
//! ```

pub mod bounds;
pub mod point;

pub use bounds::{Bounds, Quadrant};
pub use point::{Point, distance};
