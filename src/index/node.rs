//! A single quadrant of the index.
//!
//! A node is either a leaf holding up to `capacity` points or an internal
//! node owning exactly four children and no points. Nodes do no locking;
//! callers hold the tree lock for the whole recursion.

use quadex_types::{Bounds, Point, Quadrant};

/// Default depth guard for nodes created without an explicit limit.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Largest accepted depth guard. Insertion, search and stats recurse once
/// per level, so the guard also bounds stack use.
pub const MAX_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Clone)]
enum NodeKind<T> {
    Leaf(Vec<Point<T>>),
    Internal(Box<[Node<T>; 4]>),
}

/// One node of the quadtree.
///
/// Children are owned exclusively by their parent and inherit its capacity
/// and depth limit. Once subdivided, a node stays internal for its lifetime.
#[derive(Debug, Clone)]
pub struct Node<T> {
    bounds: Bounds,
    capacity: usize,
    depth: usize,
    max_depth: usize,
    kind: NodeKind<T>,
}

impl<T> Node<T> {
    /// Create an empty root leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadex::{Bounds, Node, Point};
    ///
    /// let mut node = Node::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 2);
    /// assert!(node.insert(Point::new(25.0, 25.0, "a")).is_ok());
    /// assert!(node.is_leaf());
    /// ```
    pub fn new(bounds: Bounds, capacity: usize) -> Self {
        Self::with_max_depth(bounds, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty root leaf with an explicit depth guard, clamped to
    /// [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(bounds: Bounds, capacity: usize, max_depth: usize) -> Self {
        Self::leaf(bounds, capacity, 0, max_depth.min(MAX_DEPTH_LIMIT))
    }

    fn leaf(bounds: Bounds, capacity: usize, depth: usize, max_depth: usize) -> Self {
        Self {
            bounds,
            capacity,
            depth,
            max_depth,
            kind: NodeKind::Leaf(Vec::with_capacity(capacity.min(64))),
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Distance from the root; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Points held directly by this node. Always empty for internal nodes.
    pub fn points(&self) -> &[Point<T>] {
        match &self.kind {
            NodeKind::Leaf(points) => points.as_slice(),
            NodeKind::Internal(_) => &[],
        }
    }

    /// The four children in NW, NE, SW, SE order, if subdivided.
    pub fn children(&self) -> Option<&[Node<T>; 4]> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal(children) => Some(&**children),
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Node<T>> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// Number of points stored in this subtree.
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(points) => points.len(),
            NodeKind::Internal(children) => children.iter().map(Node::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a point, subdividing full leaves on the way down.
    ///
    /// A point outside this node's bounds is handed back unchanged. Any
    /// point inside the bounds is always accepted.
    pub fn insert(&mut self, point: Point<T>) -> Result<(), Point<T>> {
        if !self.bounds.contains(&point) {
            return Err(point);
        }
        self.insert_contained(point);
        Ok(())
    }

    fn insert_contained(&mut self, point: Point<T>) {
        let full = match &self.kind {
            NodeKind::Leaf(points) => points.len() >= self.capacity,
            NodeKind::Internal(_) => false,
        };
        if full && self.depth < self.max_depth {
            self.subdivide();
        }

        match &mut self.kind {
            NodeKind::Leaf(points) => {
                if points.len() == self.capacity {
                    log::warn!(
                        "Leaf at depth {} holds {} points at ({}, {}) and cannot subdivide further",
                        self.depth,
                        points.len() + 1,
                        point.x,
                        point.y
                    );
                }
                points.push(point);
            }
            NodeKind::Internal(children) => {
                let idx = route(&**children, point.x, point.y);
                children[idx].insert_contained(point);
            }
        }
    }

    /// Convert this leaf into an internal node and redistribute its points.
    ///
    /// Returns `false` if the node is already internal.
    pub fn subdivide(&mut self) -> bool {
        if !self.is_leaf() {
            return false;
        }

        let (capacity, depth, max_depth) = (self.capacity, self.depth + 1, self.max_depth);
        let children = self
            .bounds
            .quadrants()
            .map(|bounds| Node::leaf(bounds, capacity, depth, max_depth));

        let previous = std::mem::replace(&mut self.kind, NodeKind::Internal(Box::new(children)));
        if let (NodeKind::Leaf(points), NodeKind::Internal(children)) = (previous, &mut self.kind) {
            log::trace!(
                "Subdividing node at depth {} ({:?}) holding {} points",
                self.depth,
                self.bounds,
                points.len()
            );
            for point in points {
                let idx = route(&**children, point.x, point.y);
                children[idx].insert_contained(point);
            }
        }
        true
    }

    /// Visit every point inside `area`, pruning subtrees that do not
    /// intersect it. Visit order is deterministic for a given tree state.
    pub fn visit<'a, F>(&'a self, area: &Bounds, f: &mut F)
    where
        F: FnMut(&'a Point<T>),
    {
        if !self.bounds.intersects(area) {
            return;
        }

        match &self.kind {
            NodeKind::Leaf(points) => {
                for point in points.iter().filter(|p| area.contains(*p)) {
                    f(point);
                }
            }
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.visit(area, f);
                }
            }
        }
    }

    /// Append clones of every point inside `area` to `results`.
    pub fn search(&self, area: &Bounds, results: &mut Vec<Point<T>>)
    where
        T: Clone,
    {
        self.visit(area, &mut |point: &Point<T>| results.push(point.clone()));
    }

    /// Remove one point stored at exactly `(x, y)` and return it.
    ///
    /// Order among the remaining points of the leaf is not preserved.
    /// Emptied subtrees are not merged back into their parent.
    pub fn remove(&mut self, x: f64, y: f64) -> Option<Point<T>> {
        if !self.bounds.contains_coord(x, y) {
            return None;
        }
        self.remove_contained(x, y)
    }

    fn remove_contained(&mut self, x: f64, y: f64) -> Option<Point<T>> {
        match &mut self.kind {
            NodeKind::Leaf(points) => {
                let idx = points.iter().position(|p| p.x == x && p.y == y)?;
                Some(points.swap_remove(idx))
            }
            NodeKind::Internal(children) => {
                let idx = route(&**children, x, y);
                children[idx].remove_contained(x, y)
            }
        }
    }

    /// Whether a point is stored at exactly `(x, y)`.
    pub fn contains_position(&self, x: f64, y: f64) -> bool {
        if !self.bounds.contains_coord(x, y) {
            return false;
        }

        let mut node = self;
        loop {
            match &node.kind {
                NodeKind::Leaf(points) => return points.iter().any(|p| p.x == x && p.y == y),
                NodeKind::Internal(children) => node = &children[route(&**children, x, y)],
            }
        }
    }

    /// Structural summary of this subtree.
    pub fn stats(&self) -> NodeStats {
        let mut stats = NodeStats::default();
        self.collect_stats(&mut stats);
        stats
    }

    fn collect_stats(&self, stats: &mut NodeStats) {
        stats.nodes += 1;
        stats.depth = stats.depth.max(self.depth);
        match &self.kind {
            NodeKind::Leaf(points) => {
                stats.leaves += 1;
                stats.points += points.len();
                stats.max_leaf_points = stats.max_leaf_points.max(points.len());
            }
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.collect_stats(stats);
                }
            }
        }
    }
}

/// Pick the child that owns `(x, y)`: the first in NW, NE, SW, SE order whose
/// closed bounds contain it. A coordinate lost to rounding between the
/// parent's far edge and the children's computed edges falls back to the
/// quadrant on its side of the midlines.
fn route<T>(children: &[Node<T>; 4], x: f64, y: f64) -> usize {
    Quadrant::ALL
        .iter()
        .map(|q| q.index())
        .find(|&idx| children[idx].bounds.contains_coord(x, y))
        .unwrap_or_else(|| {
            let east = x >= children[Quadrant::NorthEast.index()].bounds.x;
            let south = y >= children[Quadrant::SouthWest.index()].bounds.y;
            usize::from(south) * 2 + usize::from(east)
        })
}

/// Counters gathered by walking a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub points: usize,
    pub nodes: usize,
    pub leaves: usize,
    /// Deepest node depth; 0 for a lone root leaf.
    pub depth: usize,
    pub max_leaf_points: usize,
}
