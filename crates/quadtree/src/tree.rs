//! Region quadtree over caller-owned points.
//!
//! Each cell keeps up to `capacity` point indices of its own. When a cell is
//! full the next point subdivides it into four quadrants and is routed to the
//! quadrant containing it. Points already held by the cell stay where they
//! are, so every level of the tree can hold points, not just the leaves.
//!
//! Cells store `usize` indices into the slice the caller passes to each
//! operation. The slice length is recorded on first use and checked on every
//! refresh, so storage that was resized under the index is reported instead
//! of silently producing wrong neighbours.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::QuadTreeError;
use crate::region::{Bounds, Positioned, Rect, Region};

/// Depth limit used by [`QuadTree::new`].
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// How the index is brought up to date after points move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStrategy {
    /// Throw away every cell and reinsert all indexed points.
    #[default]
    Rebuild,
    /// Move only the points that left their cell, collapsing emptied subtrees.
    Incremental,
}

/// Outcome of a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Points that were placed again from the root.
    pub reinserted: usize,
    /// Points that are now outside the root boundary and are no longer indexed.
    pub dropped: Vec<usize>,
    /// Subdivided cells reverted to leaves.
    pub collapsed: usize,
}

/// Structural summary for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub cells: usize,
    pub leaves: usize,
    pub max_depth: usize,
    pub points: usize,
}

#[derive(Debug)]
struct Node {
    boundary: Rect,
    capacity: usize,
    depth: usize,
    points: Vec<usize>,
    /// NW, NE, SW, SE.
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    fn new(boundary: Rect, capacity: usize, depth: usize) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            points: Vec::with_capacity(capacity),
            children: None,
        }
    }

    /// A cell too deep or too thin to split keeps its overflow.
    #[inline]
    fn can_subdivide(&self, max_depth: usize) -> bool {
        self.depth < max_depth && self.boundary.w >= 2 && self.boundary.h >= 2
    }

    fn subdivide(&mut self) {
        let [nw, ne, sw, se] = self.boundary.quadrants();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            Node::new(nw, self.capacity, depth),
            Node::new(ne, self.capacity, depth),
            Node::new(sw, self.capacity, depth),
            Node::new(se, self.capacity, depth),
        ]));
    }

    fn insert(&mut self, index: usize, pos: Vec2, max_depth: usize) -> bool {
        if !self.boundary.contains(pos) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < self.capacity || !self.can_subdivide(max_depth) {
                self.points.push(index);
                return true;
            }
            self.subdivide();
        }

        // Quadrants are disjoint, so at most one can take the point.
        match self.children.as_deref_mut() {
            Some(children) => children
                .iter_mut()
                .find(|child| child.boundary.contains(pos))
                .is_some_and(|child| child.insert(index, pos, max_depth)),
            None => false,
        }
    }

    fn query<P: Positioned>(&self, points: &[P], region: &Region, range: &Bounds, found: &mut Vec<usize>) {
        for &index in &self.points {
            if let Some(point) = points.get(index) {
                if region.contains(point.position()) {
                    found.push(index);
                }
            }
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.boundary.bounds().overlaps(range) {
                    child.query(points, region, range, found);
                }
            }
        }
    }

    /// Remove points that left this cell. Returns true when the cell ends up
    /// holding nothing and has no children.
    fn sweep<P: Positioned>(&mut self, points: &[P], removed: &mut Vec<usize>, collapsed: &mut usize) -> bool {
        let boundary = self.boundary;
        self.points.retain(|&index| {
            let inside = points
                .get(index)
                .is_some_and(|point| boundary.contains(point.position()));
            if !inside {
                removed.push(index);
            }
            inside
        });

        let children_empty = match self.children.as_deref_mut() {
            Some(children) => {
                // Every child is swept, even after a non-empty one.
                let mut all_empty = true;
                for child in children.iter_mut() {
                    all_empty &= child.sweep(points, removed, collapsed);
                }
                all_empty
            }
            None => false,
        };

        if children_empty && self.points.is_empty() {
            self.children = None;
            *collapsed += 1;
        }

        self.points.is_empty() && self.children.is_none()
    }

    fn count(&self) -> usize {
        let own = self.points.len();
        match &self.children {
            Some(children) => own + children.iter().map(Node::count).sum::<usize>(),
            None => own,
        }
    }

    fn collect_boundaries(&self, found: &mut Vec<Rect>) {
        found.push(self.boundary);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_boundaries(found);
            }
        }
    }

    fn collect_points(&self, found: &mut Vec<usize>) {
        found.extend_from_slice(&self.points);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_points(found);
            }
        }
    }

    fn accumulate_stats(&self, stats: &mut TreeStats) {
        stats.cells += 1;
        stats.points += self.points.len();
        stats.max_depth = stats.max_depth.max(self.depth);
        match &self.children {
            Some(children) => {
                for child in children.iter() {
                    child.accumulate_stats(stats);
                }
            }
            None => stats.leaves += 1,
        }
    }
}

/// Quadtree index over a caller-owned slice of points.
pub struct QuadTree {
    root: Node,
    max_depth: usize,
    /// Length of the slice this tree indexes, fixed on first use.
    source_len: Option<usize>,
}

impl QuadTree {
    /// Create an empty tree over `boundary` holding `capacity` points per cell.
    pub fn new(boundary: Rect, capacity: usize) -> Result<Self, QuadTreeError> {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty tree whose cells stop subdividing at `max_depth`.
    pub fn with_max_depth(boundary: Rect, capacity: usize, max_depth: usize) -> Result<Self, QuadTreeError> {
        if capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if boundary.is_empty() {
            return Err(QuadTreeError::EmptyBoundary { w: boundary.w, h: boundary.h });
        }

        Ok(Self {
            root: Node::new(boundary, capacity, 0),
            max_depth,
            source_len: None,
        })
    }

    /// Build a tree holding every point of `points`.
    ///
    /// Points outside `boundary` are listed in the report's `dropped`.
    pub fn from_points<P: Positioned>(
        boundary: Rect,
        capacity: usize,
        max_depth: usize,
        points: &[P],
    ) -> Result<(Self, RefreshReport), QuadTreeError> {
        let mut tree = Self::with_max_depth(boundary, capacity, max_depth)?;
        tree.source_len = Some(points.len());
        let report = tree.reinsert(points, (0..points.len()).collect(), 0);
        Ok((tree, report))
    }

    #[inline]
    pub fn boundary(&self) -> Rect {
        self.root.boundary
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.root.capacity
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Index `points[index]`.
    ///
    /// Returns false when the point lies outside the tree boundary, when
    /// `index` is out of range, or when `points` is not the same length as the
    /// slice this tree was built over.
    pub fn insert<P: Positioned>(&mut self, points: &[P], index: usize) -> bool {
        let expected = *self.source_len.get_or_insert(points.len());
        if expected != points.len() {
            warn!(expected, found = points.len(), "Insert against resized point storage");
            return false;
        }

        let Some(point) = points.get(index) else {
            warn!(index, len = points.len(), "Insert of point index out of range");
            return false;
        };

        self.root.insert(index, point.position(), self.max_depth)
    }

    /// Indices of indexed points lying inside `region`.
    ///
    /// Each cell reports its own points before its children. Cells whose
    /// boundary box misses the region's box are skipped entirely.
    pub fn query<P: Positioned>(&self, points: &[P], region: &Region) -> Vec<usize> {
        let mut found = Vec::new();
        let range = region.bounds();
        if self.root.boundary.bounds().overlaps(&range) {
            self.root.query(points, region, &range, &mut found);
        }
        found
    }

    /// Total number of indexed points.
    pub fn count(&self) -> usize {
        self.root.count()
    }

    /// Boundary of every cell, parents before children.
    pub fn cell_boundaries(&self) -> Vec<Rect> {
        let mut found = Vec::new();
        self.root.collect_boundaries(&mut found);
        found
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.root.accumulate_stats(&mut stats);
        stats
    }

    /// Bring the index up to date with `points` using `strategy`.
    pub fn refresh<P: Positioned>(
        &mut self,
        points: &[P],
        strategy: RefreshStrategy,
    ) -> Result<RefreshReport, QuadTreeError> {
        match strategy {
            RefreshStrategy::Rebuild => self.rebuild(points),
            RefreshStrategy::Incremental => self.update(points),
        }
    }

    /// Discard every cell and reinsert every indexed point.
    pub fn rebuild<P: Positioned>(&mut self, points: &[P]) -> Result<RefreshReport, QuadTreeError> {
        self.check_source(points.len())?;

        let mut indexed = Vec::with_capacity(self.count());
        self.root.collect_points(&mut indexed);
        // Same insertion order as a fresh build over the same indices.
        indexed.sort_unstable();

        self.root = Node::new(self.root.boundary, self.root.capacity, 0);
        let report = self.reinsert(points, indexed, 0);
        debug!(reinserted = report.reinserted, dropped = report.dropped.len(), "Rebuilt quadtree");
        Ok(report)
    }

    /// Relocate only the points that moved out of their cell.
    ///
    /// Subdivided cells whose own list and four children all end up empty
    /// are collapsed. Nothing is rebalanced, so long runs should rebuild
    /// periodically to bound depth.
    pub fn update<P: Positioned>(&mut self, points: &[P]) -> Result<RefreshReport, QuadTreeError> {
        self.check_source(points.len())?;

        let mut removed = Vec::new();
        let mut collapsed = 0;
        self.root.sweep(points, &mut removed, &mut collapsed);

        let report = self.reinsert(points, removed, collapsed);
        debug!(
            reinserted = report.reinserted,
            dropped = report.dropped.len(),
            collapsed = report.collapsed,
            "Updated quadtree"
        );
        Ok(report)
    }

    fn check_source(&mut self, len: usize) -> Result<(), QuadTreeError> {
        let expected = *self.source_len.get_or_insert(len);
        if expected != len {
            return Err(QuadTreeError::SourceResized { expected, found: len });
        }
        Ok(())
    }

    fn reinsert<P: Positioned>(&mut self, points: &[P], indices: Vec<usize>, collapsed: usize) -> RefreshReport {
        let mut report = RefreshReport {
            collapsed,
            ..RefreshReport::default()
        };

        for index in indices {
            let placed = match points.get(index) {
                Some(point) => self.root.insert(index, point.position(), self.max_depth),
                None => false,
            };
            if placed {
                report.reinserted += 1;
            } else {
                report.dropped.push(index);
            }
        }

        if !report.dropped.is_empty() {
            warn!(count = report.dropped.len(), "Points outside quadtree boundary were not reinserted");
        }
        report
    }
}

impl std::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("boundary", &self.root.boundary)
            .field("capacity", &self.root.capacity)
            .field("points", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Circle;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn square() -> Rect {
        Rect::new(0, 0, 100, 100)
    }

    fn corners() -> Vec<Vec2> {
        vec![
            Vec2::new(10.0, 10.0),
            Vec2::new(90.0, 10.0),
            Vec2::new(10.0, 90.0),
            Vec2::new(90.0, 90.0),
        ]
    }

    fn random_points(rng: &mut StdRng, n: usize, extent: f32) -> Vec<Vec2> {
        (0..n)
            .map(|_| Vec2::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
            .collect()
    }

    fn brute_force(points: &[Vec2], region: &Region) -> Vec<usize> {
        (0..points.len()).filter(|&i| region.contains(points[i])).collect()
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    fn check_capacity(node: &Node, max_depth: usize) {
        if node.children.is_none() && node.can_subdivide(max_depth) {
            assert!(node.points.len() <= node.capacity, "leaf {:?} over capacity", node.boundary);
        }
        if node.children.is_some() {
            assert!(node.points.len() <= node.capacity);
        }
        if let Some(children) = &node.children {
            for child in children.iter() {
                check_capacity(child, max_depth);
            }
        }
    }

    fn check_partition(node: &Node) {
        if let Some(children) = &node.children {
            let area: i64 = children.iter().map(|c| c.boundary.area()).sum();
            assert_eq!(area, node.boundary.area());
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert!(!children[i].boundary.overlaps(&children[j].boundary));
                }
            }
            for child in children.iter() {
                check_partition(child);
            }
        }
    }

    #[test]
    fn test_rejects_bad_construction() {
        assert_eq!(QuadTree::new(square(), 0).unwrap_err(), QuadTreeError::ZeroCapacity);
        assert_eq!(
            QuadTree::new(Rect::new(0, 0, 0, 10), 4).unwrap_err(),
            QuadTreeError::EmptyBoundary { w: 0, h: 10 }
        );
    }

    #[test]
    fn test_corner_scenario_single_subdivision() {
        let points = corners();
        let mut tree = QuadTree::new(square(), 1).unwrap();
        for i in 0..points.len() {
            assert!(tree.insert(&points, i));
        }

        assert_eq!(tree.count(), 4);

        let cells = tree.cell_boundaries();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0], square());
        for quad in &cells[1..] {
            assert_eq!((quad.w, quad.h), (50, 50));
        }

        // One point per quadrant
        for quad in &cells[1..] {
            assert_eq!(tree.query(&points, &Region::Rect(*quad)).len(), 1);
        }
    }

    #[test]
    fn test_circle_query_finds_only_nearby() {
        let points = corners();
        let (tree, report) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();
        assert!(report.dropped.is_empty());

        let found = tree.query(&points, &Circle::new(Vec2::new(10.0, 10.0), 5.0).into());
        assert_eq!(found, vec![0]);
    }

    #[test]
    fn test_insert_outside_boundary() {
        let mut points = corners();
        points.push(Vec2::new(150.0, 10.0));
        let mut tree = QuadTree::new(square(), 1).unwrap();
        for i in 0..4 {
            tree.insert(&points, i);
        }

        assert!(!tree.insert(&points, 4));
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn test_insert_checks_storage() {
        let points = corners();
        let mut tree = QuadTree::new(square(), 4).unwrap();
        assert!(tree.insert(&points, 0));
        assert!(!tree.insert(&points, 9));
        assert!(!tree.insert(&points[..2], 1));
        assert_eq!(tree.count(), 1);
    }

    #[test]
    fn test_subdivision_keeps_parent_points() {
        let points = corners();
        let mut tree = QuadTree::new(square(), 2).unwrap();
        for i in 0..points.len() {
            tree.insert(&points, i);
        }

        assert_eq!(tree.root.points, vec![0, 1]);
        let children = tree.root.children.as_ref().unwrap();
        assert!(children[0].points.is_empty());
        assert!(children[1].points.is_empty());
        assert_eq!(children[2].points, vec![2]);
        assert_eq!(children[3].points, vec![3]);
    }

    #[test]
    fn test_query_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = random_points(&mut rng, 800, 1000.0);
        let (tree, _) = QuadTree::from_points(Rect::new(0, 0, 1000, 1000), 4, DEFAULT_MAX_DEPTH, &points).unwrap();

        assert_eq!(tree.count(), points.len());

        for _ in 0..50 {
            let center = Vec2::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0));
            let circle = Region::Circle(Circle::new(center, rng.random_range(1.0..120.0)));
            assert_eq!(sorted(tree.query(&points, &circle)), brute_force(&points, &circle));

            let rect = Region::Rect(Rect::new(
                rng.random_range(-50..1000),
                rng.random_range(-50..1000),
                rng.random_range(1..300),
                rng.random_range(1..300),
            ));
            assert_eq!(sorted(tree.query(&points, &rect)), brute_force(&points, &rect));
        }
    }

    #[test]
    fn test_every_inserted_point_is_found() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points(&mut rng, 300, 640.0);
        let (tree, _) = QuadTree::from_points(Rect::new(0, 0, 640, 640), 1, DEFAULT_MAX_DEPTH, &points).unwrap();

        for (i, p) in points.iter().enumerate() {
            let found = tree.query(&points, &Circle::new(*p, 0.5).into());
            assert!(found.contains(&i), "point {i} at {p:?} not found");
        }
    }

    #[test]
    fn test_capacity_and_partition_invariants() {
        let mut rng = StdRng::seed_from_u64(5);
        for capacity in [1, 2, 3, 8] {
            let points = random_points(&mut rng, 400, 777.0);
            let (tree, _) = QuadTree::from_points(Rect::new(0, 0, 777, 777), capacity, DEFAULT_MAX_DEPTH, &points).unwrap();
            check_capacity(&tree.root, tree.max_depth);
            check_partition(&tree.root);
            assert_eq!(tree.count(), 400);
        }
    }

    #[test]
    fn test_fresh_builds_are_identical() {
        let mut rng = StdRng::seed_from_u64(17);
        let points = random_points(&mut rng, 250, 500.0);
        let boundary = Rect::new(0, 0, 500, 500);

        let (a, _) = QuadTree::from_points(boundary, 3, DEFAULT_MAX_DEPTH, &points).unwrap();
        let (b, _) = QuadTree::from_points(boundary, 3, DEFAULT_MAX_DEPTH, &points).unwrap();
        assert_eq!(a.count(), b.count());
        assert_eq!(a.cell_boundaries(), b.cell_boundaries());

        let mut c = a;
        c.rebuild(&points).unwrap();
        assert_eq!(c.cell_boundaries(), b.cell_boundaries());
    }

    #[test]
    fn test_coincident_points_stop_at_max_depth() {
        let points = vec![Vec2::new(33.0, 33.0); 64];
        let (tree, report) = QuadTree::from_points(Rect::new(0, 0, 1 << 20, 1 << 20), 2, 6, &points).unwrap();

        assert!(report.dropped.is_empty());
        assert_eq!(tree.count(), 64);
        assert_eq!(tree.stats().max_depth, 6);
    }

    #[test]
    fn test_thin_cells_do_not_split() {
        let points = vec![Vec2::new(0.5, 0.5); 10];
        let (tree, _) = QuadTree::from_points(Rect::new(0, 0, 1, 1), 1, DEFAULT_MAX_DEPTH, &points).unwrap();
        assert_eq!(tree.count(), 10);
        assert_eq!(tree.cell_boundaries().len(), 1);
    }

    #[test]
    fn test_update_moves_point_across_quadrants() {
        let mut points = vec![
            Vec2::new(5.0, 5.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(70.0, 20.0),
            Vec2::new(20.0, 70.0),
            Vec2::new(70.0, 70.0),
        ];
        let (mut tree, _) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();

        points[0] = Vec2::new(95.0, 95.0);
        let report = tree.update(&points).unwrap();
        assert!(report.dropped.is_empty());
        assert_eq!(tree.count(), 5);

        let south_east = Region::Rect(Rect::new(50, 50, 50, 50));
        let vacated = Region::Rect(Rect::new(0, 0, 10, 10));
        assert!(tree.query(&points, &south_east).contains(&0));
        assert!(tree.query(&points, &vacated).is_empty());
    }

    #[test]
    fn test_update_matches_rebuild() {
        let mut rng = StdRng::seed_from_u64(29);
        let boundary = Rect::new(0, 0, 1000, 1000);
        let mut points = random_points(&mut rng, 600, 1000.0);

        let (mut incremental, _) = QuadTree::from_points(boundary, 4, DEFAULT_MAX_DEPTH, &points).unwrap();
        let (mut rebuilt, _) = QuadTree::from_points(boundary, 4, DEFAULT_MAX_DEPTH, &points).unwrap();

        for _ in 0..5 {
            for p in points.iter_mut().step_by(3) {
                *p += Vec2::new(rng.random_range(-80.0..80.0), rng.random_range(-80.0..80.0));
                *p = p.clamp(Vec2::ZERO, Vec2::splat(999.0));
            }

            let a = incremental.update(&points).unwrap();
            let b = rebuilt.rebuild(&points).unwrap();
            assert!(a.dropped.is_empty() && b.dropped.is_empty());
            assert_eq!(incremental.count(), rebuilt.count());
            check_capacity(&incremental.root, incremental.max_depth);

            for _ in 0..30 {
                let center = Vec2::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0));
                let region = Region::Circle(Circle::new(center, rng.random_range(5.0..150.0)));
                let expected = brute_force(&points, &region);
                assert_eq!(sorted(incremental.query(&points, &region)), expected);
                assert_eq!(sorted(rebuilt.query(&points, &region)), expected);
            }
        }
    }

    #[test]
    fn test_update_collapses_empty_subtrees() {
        let mut points = vec![
            Vec2::new(60.0, 60.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(30.0, 30.0),
        ];
        let (mut tree, _) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();
        assert!(tree.cell_boundaries().len() > 5);

        // Everything inside the NW subtree moves into the root's SE quadrant
        for p in &mut points[1..] {
            *p += Vec2::splat(60.0);
        }
        let report = tree.update(&points).unwrap();

        assert!(report.collapsed >= 1);
        assert_eq!(tree.count(), 4);
        let children = tree.root.children.as_ref().unwrap();
        assert!(children[0].children.is_none());
        assert!(children[0].points.is_empty());
    }

    #[test]
    fn test_refresh_reports_points_leaving_boundary() {
        let mut points = corners();
        let (mut incremental, _) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();
        let (mut rebuilt, _) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();

        points[1] = Vec2::new(150.0, 10.0);

        let a = incremental.refresh(&points, RefreshStrategy::Incremental).unwrap();
        let b = rebuilt.refresh(&points, RefreshStrategy::Rebuild).unwrap();
        assert_eq!(a.dropped, vec![1]);
        assert_eq!(b.dropped, vec![1]);
        assert_eq!(incremental.count(), 3);
        assert_eq!(rebuilt.count(), 3);
    }

    #[test]
    fn test_refresh_rejects_resized_storage() {
        let mut points = corners();
        let (mut tree, _) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();

        points.push(Vec2::new(50.0, 50.0));
        assert_eq!(
            tree.update(&points).unwrap_err(),
            QuadTreeError::SourceResized { expected: 4, found: 5 }
        );
        assert!(tree.rebuild(&points).is_err());
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn test_stats() {
        let points = corners();
        let (tree, _) = QuadTree::from_points(square(), 1, DEFAULT_MAX_DEPTH, &points).unwrap();
        let stats = tree.stats();
        assert_eq!(stats.cells, 5);
        assert_eq!(stats.leaves, 4);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.points, 4);
    }
}
