//! Concurrent quadtree index for 2D points with range and k-nearest queries.
//!
//! ## Features
//! - **Mutable index**: insert, remove and atomically move points while other
//!   threads query
//! - **Range search**: all points inside an axis-aligned rectangle
//! - **K-nearest**: expanding-radius probe ranked by Euclidean distance
//! - **Coarse locking**: one reader/writer lock per index; readers run in
//!   parallel, writers are exclusive
//!
//! Identity is positional: removal and update match the stored point by its
//! exact `(x, y)` coordinates, never by payload.
//!
//! ```rust
//! use quadex::{Bounds, Point, QuadTree};
//!
//! let index = QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 4)?;
//! index.insert(Point::new(50.0, 50.0, "vehicle-1"));
//!
//! // Vehicle moved
//! index.update(&Point::new(50.0, 50.0, ()), Point::new(75.0, 75.0, "vehicle-1"));
//!
//! let around = index.search(&Bounds::new(70.0, 70.0, 10.0, 10.0));
//! assert_eq!(around.len(), 1);
//!
//! let nearest = index.k_nearest((0.0, 0.0), 1);
//! assert_eq!(nearest[0].data, "vehicle-1");
//! # Ok::<(), quadex::IndexError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;

pub use builder::QuadTreeBuilder;
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{Node, NodeStats, QuadTree};

pub use quadex_types::{Bounds, Point, Quadrant, distance};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{IndexConfig, IndexError, QuadTree, QuadTreeBuilder, Result};

    pub use crate::{Bounds, Point, distance};
}
