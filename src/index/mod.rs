//! Thread-safe quadtree facade.
//!
//! `QuadTree` owns the root [`Node`] behind a single `parking_lot::RwLock`.
//! Queries take the read lock, mutations take the write lock, and every
//! operation holds its lock for the whole recursion. There is no per-node
//! locking.
//!
//! # Examples
//!
//! ```rust
//! use quadex::{Bounds, Point, QuadTree};
//! use std::sync::Arc;
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = Arc::new(QuadTree::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0), 8)?);
//!
//! let writer = {
//!     let index = Arc::clone(&index);
//!     thread::spawn(move || {
//!         index.insert(Point::new(120.0, 80.0, "vehicle-1"));
//!     })
//! };
//! writer.join().unwrap();
//!
//! let nearby = index.search(&Bounds::new(100.0, 50.0, 50.0, 50.0));
//! assert_eq!(nearby.len(), 1);
//! # Ok(())
//! # }
//! ```

mod knn;
mod node;

pub use node::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, Node, NodeStats};

use crate::builder::QuadTreeBuilder;
use crate::config::IndexConfig;
use crate::error::Result;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use quadex_types::{Bounds, Point};

struct Tree<T> {
    root: Node<T>,
    len: usize,
}

/// Concurrent point index over a fixed rectangular universe.
///
/// Points outside the universe are rejected. Identity for removal and
/// update is the exact `(x, y)` pair; payloads are never compared.
pub struct QuadTree<T> {
    tree: RwLock<Tree<T>>,
    config: IndexConfig,
}

impl<T> QuadTree<T> {
    /// Create an empty index accepting points within `bounds`.
    pub fn new(bounds: Bounds, capacity: usize) -> Result<Self> {
        Self::with_config(IndexConfig::new(bounds, capacity))
    }

    /// Create an empty index from a full configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let root = Node::with_max_depth(config.bounds, config.capacity, config.max_depth);
        Ok(Self {
            tree: RwLock::new(Tree { root, len: 0 }),
            config,
        })
    }

    pub fn builder() -> QuadTreeBuilder {
        QuadTreeBuilder::new()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of points currently stored.
    pub fn len(&self) -> usize {
        self.tree.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a point. Returns `false` if it lies outside the index bounds.
    pub fn insert(&self, point: Point<T>) -> bool {
        let mut guard = self.tree.write();
        let tree = &mut *guard;
        match tree.root.insert(point) {
            Ok(()) => {
                tree.len += 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Remove the point stored at `point`'s exact coordinates.
    ///
    /// Returns `false` if the position is out of bounds or nothing is stored
    /// there. When several points share the position, one is removed.
    pub fn remove<U>(&self, point: &Point<U>) -> bool {
        let mut guard = self.tree.write();
        let tree = &mut *guard;
        match tree.root.remove(point.x, point.y) {
            Some(_) => {
                tree.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Move the point stored at `old`'s coordinates to `new`, atomically.
    ///
    /// Either the tree reflects the move or it is left exactly as it was:
    /// an out-of-bounds `new` or a missing `old` changes nothing. Other
    /// threads never observe the intermediate state.
    pub fn update<U>(&self, old: &Point<U>, new: Point<T>) -> bool {
        let mut guard = self.tree.write();
        let tree = &mut *guard;

        if !tree.root.bounds().contains(&new) {
            return false;
        }

        let Some(previous) = tree.root.remove(old.x, old.y) else {
            return false;
        };

        match tree.root.insert(new) {
            Ok(()) => true,
            Err(rejected) => {
                log::warn!(
                    "Update rejected ({}, {}) after bounds check passed; restoring ({}, {})",
                    rejected.x,
                    rejected.y,
                    previous.x,
                    previous.y
                );
                if let Err(lost) = tree.root.insert(previous) {
                    log::error!("Failed to restore point at ({}, {})", lost.x, lost.y);
                    tree.len -= 1;
                }
                false
            }
        }
    }

    /// Whether a point is stored at exactly `(x, y)`.
    pub fn contains_position(&self, x: f64, y: f64) -> bool {
        self.tree.read().root.contains_position(x, y)
    }

    /// Structural counters for the whole tree.
    pub fn stats(&self) -> NodeStats {
        self.tree.read().root.stats()
    }

    /// Acquire the read lock and borrow the root node.
    ///
    /// Allows several read-only inspections under a single lock. Writers
    /// block until the guard is dropped.
    pub fn read(&self) -> MappedRwLockReadGuard<'_, Node<T>> {
        RwLockReadGuard::map(self.tree.read(), |tree| &tree.root)
    }
}

impl<T: Clone> QuadTree<T> {
    /// All points inside `area`, edges included. Order is unspecified.
    pub fn search(&self, area: &Bounds) -> Vec<Point<T>> {
        let mut results = Vec::new();
        self.tree.read().root.search(area, &mut results);
        results
    }
}

impl<T> std::fmt::Debug for QuadTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.config.bounds)
            .field("capacity", &self.config.capacity)
            .field("len", &self.len())
            .finish()
    }
}

// Ensure QuadTree is Send + Sync for thread-safe payloads
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    const fn assert_index<T: Send + Sync>() {
        assert_send_sync::<QuadTree<T>>();
    }
    let _ = assert_index::<String>;
};
