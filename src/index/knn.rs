//! K-nearest-neighbour queries by expanding-radius probe.
//!
//! A square window centred on the target is searched, doubling its
//! half-extent until it holds at least `k` candidates, the window outgrows
//! the index, or the candidate count passes the configured cap. The final
//! window's candidates are then ranked by Euclidean distance.

use super::{Node, QuadTree};
use crate::config::IndexConfig;
use geo::Coord;
use quadex_types::{Bounds, Point};

/// Collect the candidate set for `target` from the final probe window.
///
/// Candidates come back in the tree's deterministic visit order.
fn probe<'a, T>(
    root: &'a Node<T>,
    config: &IndexConfig,
    target: Coord<f64>,
    k: usize,
) -> Vec<&'a Point<T>> {
    let cap = config.candidate_cap(k);
    let universe = root.bounds();
    let max_radius = 2.0 * universe.width.max(universe.height);

    let mut radius = config.initial_search_radius;
    let mut candidates = Vec::new();
    loop {
        candidates.clear();
        let window = Bounds::centered(target.x, target.y, radius);
        root.visit(&window, &mut |point: &'a Point<T>| candidates.push(point));

        if candidates.len() >= k || radius >= max_radius || candidates.len() > cap {
            break;
        }
        radius *= 2.0;
    }

    log::debug!(
        "k-nearest probe around ({}, {}) stopped at radius {} with {} candidates for k={}",
        target.x,
        target.y,
        radius,
        candidates.len(),
        k
    );
    candidates
}

/// Rank candidates by distance to `target`, nearest first, keeping at most
/// `k`. Equal distances keep their discovery order.
fn rank<'a, T>(
    candidates: Vec<&'a Point<T>>,
    target: Coord<f64>,
    k: usize,
) -> Vec<(&'a Point<T>, f64)> {
    let mut ranked: Vec<_> = candidates
        .into_iter()
        .map(|point| (point, point.distance_to(target)))
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(k);
    ranked
}

impl<T: Clone> QuadTree<T> {
    /// Up to `k` points nearest to `target`, paired with their distance,
    /// nearest first.
    ///
    /// `target` is anything convertible to a `geo::Coord`: a tuple, an
    /// array or a `geo::Point`.
    pub fn k_nearest_with_distance(
        &self,
        target: impl Into<Coord<f64>>,
        k: usize,
    ) -> Vec<(Point<T>, f64)> {
        let target = target.into();
        let guard = self.tree.read();
        if k == 0 || guard.len == 0 {
            return Vec::new();
        }

        let candidates = probe(&guard.root, &self.config, target, k);
        rank(candidates, target, k)
            .into_iter()
            .map(|(point, dist)| (point.clone(), dist))
            .collect()
    }

    /// Up to `k` points nearest to `target`, nearest first.
    ///
    /// Returns an empty vector when `k` is zero or the index is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadex::{Bounds, Point, QuadTree};
    ///
    /// let index = QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 4).unwrap();
    /// index.insert(Point::new(3.0, 4.0, "a"));
    /// index.insert(Point::new(4.0, 3.0, "b"));
    /// index.insert(Point::new(6.0, 8.0, "c"));
    ///
    /// let nearest = index.k_nearest((0.0, 0.0), 2);
    /// let tags: Vec<_> = nearest.iter().map(|p| p.data).collect();
    /// assert_eq!(tags.len(), 2);
    /// assert!(!tags.contains(&"c"));
    /// ```
    pub fn k_nearest(&self, target: impl Into<Coord<f64>>, k: usize) -> Vec<Point<T>> {
        self.k_nearest_with_distance(target, k)
            .into_iter()
            .map(|(point, _)| point)
            .collect()
    }
}
