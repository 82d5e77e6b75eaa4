use quadex::{Bounds, Node, Point, QuadTree, distance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn city(capacity: usize) -> QuadTree<String> {
    QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), capacity).unwrap()
}

/// Walk the tree and check the structural invariants on every node.
fn assert_invariants<T>(node: &Node<T>, capacity: usize) {
    assert_eq!(node.capacity(), capacity, "capacity must be uniform");

    for point in node.points() {
        assert!(
            node.bounds().contains(point),
            "point ({}, {}) escapes {:?}",
            point.x,
            point.y,
            node.bounds()
        );
    }

    match node.children() {
        None => assert!(node.points().len() <= capacity, "leaf over capacity"),
        Some(children) => {
            assert!(node.points().is_empty(), "internal node holds points");
            let parent = node.bounds();
            let (nw, ne, sw, se) = (
                children[0].bounds(),
                children[1].bounds(),
                children[2].bounds(),
                children[3].bounds(),
            );
            assert_eq!((nw.min_x(), nw.min_y()), (parent.min_x(), parent.min_y()));
            assert_eq!(nw.max_x(), ne.min_x());
            assert_eq!(nw.max_y(), sw.min_y());
            assert_eq!(sw.max_x(), se.min_x());
            assert_eq!(ne.max_y(), se.min_y());
            assert_eq!((se.max_x(), se.max_y()), (parent.max_x(), parent.max_y()));
            for child in children {
                assert_invariants(child, capacity);
            }
        }
    }
}

#[test]
fn test_insert_single_point() {
    init_logging();
    let index = city(4);
    assert!(index.insert(Point::new(50.0, 50.0, "center".to_string())));

    let results = index.search(&Bounds::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(results.len(), 1);
    assert_eq!((results[0].x, results[0].y), (50.0, 50.0));
}

#[test]
fn test_capacity_overflow_subdivides_root() {
    let index = city(2);
    for c in [10.0, 20.0, 30.0, 40.0] {
        assert!(index.insert(Point::new(c, c, format!("p{c}"))));
    }

    let root = index.read();
    assert!(root.children().is_some(), "root should be subdivided");
    assert!(root.points().is_empty());
    assert_invariants(&*root, 2);
}

#[test]
fn test_insert_up_to_capacity_stays_leaf() {
    let index = city(4);
    for c in [10.0, 20.0, 30.0, 40.0] {
        index.insert(Point::new(c, c, String::new()));
    }
    let root = index.read();
    assert!(root.is_leaf());
    assert_eq!(root.points().len(), 4);
}

#[test]
fn test_update_moves_point() {
    let index = city(4);
    index.insert(Point::new(50.0, 50.0, "courier".to_string()));

    assert!(index.update(
        &Point::new(50.0, 50.0, ()),
        Point::new(75.0, 75.0, "courier".to_string())
    ));
    assert!(index.search(&Bounds::new(45.0, 45.0, 10.0, 10.0)).is_empty());

    let moved = index.search(&Bounds::new(70.0, 70.0, 10.0, 10.0));
    assert_eq!(moved.len(), 1);
    assert_eq!((moved[0].x, moved[0].y), (75.0, 75.0));
}

#[test]
fn test_k_nearest_scenario() {
    let index = QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 4).unwrap();
    index.insert(Point::new(3.0, 4.0, "a"));
    index.insert(Point::new(4.0, 3.0, "b"));
    index.insert(Point::new(6.0, 8.0, "c"));

    let nearest = index.k_nearest((0.0, 0.0), 2);
    assert_eq!(nearest.len(), 2);
    let mut tags: Vec<_> = nearest.iter().map(|p| p.data).collect();
    tags.sort();
    assert_eq!(tags, vec!["a", "b"]);
}

#[test]
fn test_insert_out_of_bounds() {
    let index = city(4);
    assert!(!index.insert(Point::new(150.0, 150.0, String::new())));
    assert!(index.is_empty());
    assert!(index.read().points().is_empty());
}

#[test]
fn test_k_nearest_zero_k() {
    let index = city(4);
    index.insert(Point::new(1.0, 1.0, String::new()));
    assert!(index.k_nearest((0.0, 0.0), 0).is_empty());
}

#[test]
fn test_search_after_subdivision() {
    let index = city(2);
    for (x, y) in [(10.0, 10.0), (15.0, 15.0), (80.0, 20.0), (20.0, 80.0), (80.0, 80.0)] {
        index.insert(Point::new(x, y, String::new()));
    }
    assert!(!index.read().is_leaf());

    assert_eq!(index.search(&Bounds::new(0.0, 0.0, 50.0, 50.0)).len(), 2);
    assert_eq!(index.search(&Bounds::new(50.0, 0.0, 50.0, 50.0)).len(), 1);
    assert_eq!(index.search(&Bounds::new(0.0, 0.0, 100.0, 100.0)).len(), 5);
}

#[test]
fn test_search_no_results_is_empty_vec() {
    let index = city(4);
    index.insert(Point::new(10.0, 10.0, String::new()));
    let results = index.search(&Bounds::new(60.0, 60.0, 10.0, 10.0));
    assert!(results.is_empty());
}

#[test]
fn test_search_preserves_payload() {
    let index = city(2);
    for i in 0..10 {
        let c = i as f64 * 9.0 + 1.0;
        index.insert(Point::new(c, c, format!("order-{i}")));
    }
    let mut payloads: Vec<_> = index
        .search(&Bounds::new(0.0, 0.0, 100.0, 100.0))
        .into_iter()
        .map(|p| p.data)
        .collect();
    payloads.sort();
    let mut expected: Vec<_> = (0..10).map(|i| format!("order-{i}")).collect();
    expected.sort();
    assert_eq!(payloads, expected);
}

#[test]
fn test_insert_then_remove_round_trip() {
    let index = city(3);
    for i in 0..20 {
        let c = i as f64 * 4.0 + 2.0;
        index.insert(Point::new(c, 100.0 - c, String::new()));
    }
    let area = Bounds::new(40.0, 40.0, 20.0, 20.0);
    let before = index.search(&area).len();

    index.insert(Point::new(47.0, 51.0, "probe".to_string()));
    assert_eq!(index.search(&area).len(), before + 1);

    assert!(index.remove(&Point::new(47.0, 51.0, ())));
    assert_eq!(index.search(&area).len(), before);
    assert!(!index.remove(&Point::new(47.0, 51.0, ())));
}

#[test]
fn test_remove_matches_by_position_not_payload() {
    let index = city(4);
    index.insert(Point::new(10.0, 10.0, "same".to_string()));
    index.insert(Point::new(20.0, 20.0, "same".to_string()));

    assert!(index.remove(&Point::new(20.0, 20.0, "something else")));
    let remaining = index.search(&Bounds::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(remaining.len(), 1);
    assert_eq!((remaining[0].x, remaining[0].y), (10.0, 10.0));
}

#[test]
fn test_update_failure_leaves_tree_unchanged() {
    let index = city(2);
    for c in [10.0, 30.0, 60.0, 90.0] {
        index.insert(Point::new(c, c, format!("p{c}")));
    }

    // New position out of bounds: old stays.
    assert!(!index.update(&Point::new(30.0, 30.0, ()), Point::new(130.0, 30.0, String::new())));
    assert!(index.contains_position(30.0, 30.0));

    // Old position not stored: new never appears.
    assert!(!index.update(&Point::new(31.0, 30.0, ()), Point::new(45.0, 45.0, String::new())));
    assert!(!index.contains_position(45.0, 45.0));
    assert_eq!(index.len(), 4);
}

#[test]
fn test_randomised_invariants() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let index: QuadTree<u32> = QuadTree::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0), 6).unwrap();
    let mut live: Vec<(f64, f64)> = Vec::new();

    for id in 0..2_000u32 {
        match rng.random_range(0..10) {
            0..=5 => {
                let (x, y) = (rng.random_range(0.0..=1000.0), rng.random_range(0.0..=1000.0));
                assert!(index.insert(Point::new(x, y, id)));
                live.push((x, y));
            }
            6..=7 if !live.is_empty() => {
                let (x, y) = live.swap_remove(rng.random_range(0..live.len()));
                assert!(index.remove(&Point::new(x, y, ())));
            }
            _ if !live.is_empty() => {
                let i = rng.random_range(0..live.len());
                let (x, y) = live[i];
                let to = (rng.random_range(0.0..=1000.0), rng.random_range(0.0..=1000.0));
                assert!(index.update(&Point::new(x, y, ()), Point::new(to.0, to.1, id)));
                live[i] = to;
            }
            _ => {}
        }
    }

    assert_eq!(index.len(), live.len());
    assert_invariants(&*index.read(), 6);

    // Every live point is found exactly once by a window covering it.
    for &(x, y) in live.iter().take(200) {
        let window = Bounds::centered(x, y, 0.5);
        let hits = index
            .search(&window)
            .into_iter()
            .filter(|p| p.x == x && p.y == y)
            .count();
        let expected = live.iter().filter(|&&(lx, ly)| lx == x && ly == y).count();
        assert_eq!(hits, expected);
    }

    let stats = index.stats();
    assert_eq!(stats.points, live.len());
    assert!(stats.max_leaf_points <= 6);
}

#[test]
fn test_k_nearest_ordering_and_length() {
    let mut rng = StdRng::seed_from_u64(42);
    let index: QuadTree<usize> = QuadTree::new(Bounds::new(0.0, 0.0, 500.0, 500.0), 8).unwrap();
    for i in 0..400 {
        index.insert(Point::new(rng.random_range(0.0..500.0), rng.random_range(0.0..500.0), i));
    }

    for _ in 0..25 {
        let target = Point::new(rng.random_range(0.0..500.0), rng.random_range(0.0..500.0), ());
        for k in [1, 5, 17, 400, 1_000] {
            let nearest = index.k_nearest_with_distance(target.coord(), k);
            assert_eq!(nearest.len(), k.min(400));
            for pair in nearest.windows(2) {
                assert!(pair[0].1 <= pair[1].1, "distances must be non-decreasing");
            }
            for (point, dist) in &nearest {
                assert_eq!(*dist, distance(point, &target));
            }
        }
    }
}

#[test]
fn test_k_nearest_all_points_when_k_exceeds_population() {
    let index = QuadTree::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0), 2).unwrap();
    for (x, y, tag) in [(900.0, 900.0, "far"), (10.0, 10.0, "near"), (500.0, 500.0, "mid")] {
        index.insert(Point::new(x, y, tag));
    }
    let tags: Vec<_> = index.k_nearest((0.0, 0.0), 10).into_iter().map(|p| p.data).collect();
    assert_eq!(tags, vec!["near", "mid", "far"]);
}

#[test]
fn test_k_nearest_is_deterministic() {
    let index = QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 2).unwrap();
    // Eight points equidistant from the target.
    let offsets = [
        (5.0, 0.0),
        (-5.0, 0.0),
        (0.0, 5.0),
        (0.0, -5.0),
        (3.0, 4.0),
        (-3.0, 4.0),
        (3.0, -4.0),
        (-3.0, -4.0),
    ];
    for (i, (dx, dy)) in offsets.into_iter().enumerate() {
        index.insert(Point::new(50.0 + dx, 50.0 + dy, i));
    }

    let first = index.k_nearest((50.0, 50.0), 3);
    for _ in 0..10 {
        assert_eq!(index.k_nearest((50.0, 50.0), 3), first);
    }
}

#[test]
fn test_k_nearest_accepts_geo_point_target() {
    let index = city(4);
    index.insert(Point::new(20.0, 20.0, "x".to_string()));
    let nearest = index.k_nearest(geo::Point::new(25.0, 25.0), 1);
    assert_eq!(nearest.len(), 1);
}
