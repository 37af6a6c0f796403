//! Unit tests for the A* search.

use super::*;
use crate::graph::{Coordinates, GraphStore};
use proptest::prelude::*;

fn graph(edges: &[(&str, &str, f64)]) -> GraphStore {
    let mut g = GraphStore::new();
    for (a, b, d) in edges {
        g.add_edge(a, b, *d).unwrap();
    }
    g
}

fn path(nodes: &[&str]) -> Path {
    Path::from(nodes.to_vec())
}

/// Cost of a path using the cheapest edge for every hop.
fn path_cost(g: &GraphStore, p: &Path) -> f64 {
    p.hops()
        .map(|(a, b)| {
            let ia = g.index_of(a).unwrap();
            let ib = g.index_of(b).unwrap();
            g.neighbors(ia)
                .iter()
                .filter(|adj| adj.neighbor == ib)
                .map(|adj| adj.distance)
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

/// Reference Dijkstra over the whole graph, O(n^2).
fn dijkstra_cost(g: &GraphStore, start: &str, end: &str) -> Option<f64> {
    let n = g.node_count();
    let start = g.index_of(start)?.0;
    let end = g.index_of(end)?.0;

    let mut dist = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    dist[start] = 0.0;

    for _ in 0..n {
        let next = (0..n)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else { break };
        done[u] = true;
        for adj in g.neighbors(crate::graph::NodeIndex(u)) {
            let cand = dist[u] + adj.distance;
            if cand < dist[adj.neighbor.0] {
                dist[adj.neighbor.0] = cand;
            }
        }
    }

    dist[end].is_finite().then_some(dist[end])
}

#[test]
fn same_node_returns_single_element_path() {
    let g = graph(&[("A", "B", 1.0)]);
    let finder = PathFinder::new(&g);

    assert_eq!(finder.route("A", "A"), PathOutcome::SameNode(path(&["A"])));
    assert_eq!(finder.shortest_path("A", "A"), vec!["A".to_string()]);
}

#[test]
fn unknown_start_or_end() {
    let g = graph(&[("A", "B", 1.0)]);
    let finder = PathFinder::new(&g);

    assert_eq!(
        finder.route("Z", "A"),
        PathOutcome::UnknownNode("Z".to_string())
    );
    assert_eq!(
        finder.route("A", "Q"),
        PathOutcome::UnknownNode("Q".to_string())
    );
    // Unknown self-route is still unknown, not SameNode
    assert_eq!(
        finder.route("Z", "Z"),
        PathOutcome::UnknownNode("Z".to_string())
    );
    assert!(finder.shortest_path("Z", "A").is_empty());
}

#[test]
fn disconnected_components_have_no_route() {
    let g = graph(&[("A", "B", 1.0), ("C", "D", 1.0)]);
    let finder = PathFinder::new(&g);

    assert_eq!(finder.route("A", "D"), PathOutcome::NoRoute);
    assert!(finder.shortest_path("A", "D").is_empty());
    assert!(!finder.route("A", "D").is_reachable());
}

#[test]
fn prefers_cheaper_two_hop_route() {
    let g = graph(&[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 20.0)]);
    let finder = PathFinder::new(&g);

    let outcome = finder.route("A", "C");
    assert_eq!(outcome, PathOutcome::Found(path(&["A", "B", "C"])));
    assert_eq!(path_cost(&g, outcome.path()), 15.0);
}

#[test]
fn routes_are_reversible() {
    let g = graph(&[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 20.0)]);
    let finder = PathFinder::new(&g);

    assert_eq!(
        finder.shortest_path("C", "A"),
        vec!["C".to_string(), "B".to_string(), "A".to_string()]
    );
}

#[test]
fn direct_edge_used_when_cheaper() {
    let g = graph(&[("A", "B", 10.0), ("B", "C", 15.0), ("A", "C", 20.0)]);
    let finder = PathFinder::new(&g);

    assert_eq!(finder.route("A", "C"), PathOutcome::Found(path(&["A", "C"])));
}

#[test]
fn equal_cost_ties_break_by_node_name() {
    // Two routes of cost 2: A-B-D and A-C-D. C is inserted first, but B
    // sorts first and so is expanded first.
    let g = graph(&[
        ("A", "C", 1.0),
        ("C", "D", 1.0),
        ("A", "B", 1.0),
        ("B", "D", 1.0),
    ]);
    let finder = PathFinder::new(&g);

    assert_eq!(finder.route("A", "D"), PathOutcome::Found(path(&["A", "B", "D"])));
    // Stable across repeated queries
    for _ in 0..10 {
        assert_eq!(finder.shortest_path("A", "D"), vec!["A", "B", "D"]);
    }
}

#[test]
fn parallel_edges_use_cheapest_for_search() {
    let g = graph(&[("A", "B", 9.0), ("A", "B", 2.0), ("A", "C", 3.0), ("C", "B", 3.0)]);
    let finder = PathFinder::new(&g);

    // The direct route costs 2 via the second parallel edge
    assert_eq!(finder.route("A", "B"), PathOutcome::Found(path(&["A", "B"])));
}

#[test]
fn zero_weight_edges() {
    let g = graph(&[("A", "B", 0.0), ("B", "C", 0.0), ("A", "C", 1.0)]);
    let finder = PathFinder::new(&g);

    assert_eq!(finder.route("A", "C"), PathOutcome::Found(path(&["A", "B", "C"])));
}

#[test]
fn longer_chain() {
    let g = graph(&[
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "D", 1.0),
        ("D", "E", 1.0),
        ("A", "E", 10.0),
    ]);
    let finder = PathFinder::new(&g);

    assert_eq!(
        finder.route("A", "E"),
        PathOutcome::Found(path(&["A", "B", "C", "D", "E"]))
    );
}

#[test]
fn heuristic_is_zero_without_coordinates() {
    let g = graph(&[("A", "B", 1.0), ("B", "C", 1.0)]);
    let finder = PathFinder::new(&g);
    let a = g.index_of("A").unwrap();
    let c = g.index_of("C").unwrap();

    assert_eq!(finder.heuristic(a, c), 0.0);
}

#[test]
fn heuristic_needs_both_coordinates() {
    let mut g = graph(&[("A", "B", 500.0)]);
    g.set_coordinates("A", Coordinates::new(51.5, -0.12).unwrap())
        .unwrap();
    let finder = PathFinder::new(&g);
    let a = g.index_of("A").unwrap();
    let b = g.index_of("B").unwrap();

    assert_eq!(finder.heuristic(a, b), 0.0);
}

#[test]
fn heuristic_is_great_circle_distance() {
    let london = Coordinates::new(51.5074, -0.1278).unwrap();
    let paris = Coordinates::new(48.8566, 2.3522).unwrap();

    let mut g = graph(&[("London", "Paris", 460.0)]);
    g.set_coordinates("London", london).unwrap();
    g.set_coordinates("Paris", paris).unwrap();
    let finder = PathFinder::new(&g);

    let h = finder.heuristic(g.index_of("London").unwrap(), g.index_of("Paris").unwrap());
    assert!((h - london.haversine_km(&paris)).abs() < 1e-9);
    assert!(h > 300.0);
}

#[test]
fn coordinates_keep_result_optimal() {
    // Points along the equator, one degree apart (~111 km). Edge weights are
    // road distances no shorter than the straight line.
    let mut g = graph(&[
        ("W", "M", 120.0),
        ("M", "E", 120.0),
        ("W", "N", 200.0),
        ("N", "E", 200.0),
        ("W", "E", 260.0),
    ]);
    g.set_coordinates("W", Coordinates::new(0.0, 0.0).unwrap()).unwrap();
    g.set_coordinates("M", Coordinates::new(0.0, 1.0).unwrap()).unwrap();
    g.set_coordinates("E", Coordinates::new(0.0, 2.0).unwrap()).unwrap();
    g.set_coordinates("N", Coordinates::new(1.0, 1.0).unwrap()).unwrap();
    let finder = PathFinder::new(&g);

    let outcome = finder.route("W", "E");
    assert_eq!(outcome, PathOutcome::Found(path(&["W", "M", "E"])));
    assert_eq!(path_cost(&g, outcome.path()), 240.0);
}

#[test]
fn sample_network_with_and_without_coordinates() {
    use std::io::Cursor;

    let mut g = GraphStore::new();
    g.load_from_reader(Cursor::new(include_str!("../../data/cities.txt")))
        .unwrap();
    let plain = PathFinder::new(&g).route("Boston", "NewYork");

    let report = g
        .apply_coordinates(Cursor::new(include_str!("../../data/coordinates.txt")))
        .unwrap();
    assert_eq!(report.skipped_lines, 0);
    let guided = PathFinder::new(&g).route("Boston", "NewYork");

    let expected = path(&[
        "Boston",
        "Worcester",
        "Springfield",
        "Hartford",
        "NewHaven",
        "NewYork",
    ]);
    assert_eq!(plain, PathOutcome::Found(expected.clone()));
    assert_eq!(guided, PathOutcome::Found(expected));
    assert_eq!(path_cost(&g, guided.path()), 378.0);
}

#[test]
fn outcome_path_accessors() {
    let found = PathOutcome::Found(path(&["A", "B"]));
    assert_eq!(found.path().len(), 2);
    assert!(found.is_reachable());

    let same = PathOutcome::SameNode(path(&["A"]));
    assert_eq!(same.clone().into_path(), path(&["A"]));
    assert!(same.is_reachable());

    assert!(PathOutcome::NoRoute.path().is_empty());
    assert!(PathOutcome::UnknownNode("X".into()).into_path().is_empty());
}

#[test]
fn path_display() {
    assert_eq!(path(&["A", "B", "C"]).to_string(), "A -> B -> C");
    assert_eq!(path(&["A"]).to_string(), "A");
    assert_eq!(Path::empty().to_string(), "(no route)");
}

#[test]
fn path_hops() {
    let p = path(&["A", "B", "C"]);
    let hops: Vec<_> = p.hops().collect();
    assert_eq!(hops, vec![("A", "B"), ("B", "C")]);
    assert_eq!(path(&["A"]).hops().count(), 0);
}

#[test]
fn outcome_serializes_with_tag() {
    let json = serde_json::to_string(&PathOutcome::Found(path(&["A", "B"]))).unwrap();
    assert_eq!(json, r#"{"outcome":"found","path":["A","B"]}"#);

    let json = serde_json::to_string(&PathOutcome::NoRoute).unwrap();
    assert_eq!(json, r#"{"outcome":"no_route"}"#);
}

#[test]
fn finder_as_route_provider() {
    fn via_trait<P: RouteProvider>(p: &P) -> PathOutcome {
        p.route("A", "C")
    }

    let g = graph(&[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 20.0)]);
    let finder = PathFinder::new(&g);
    assert_eq!(via_trait(&finder), finder.route("A", "C"));
    assert_eq!(RouteProvider::graph(&finder).node_count(), 3);
}

/// Strategy for small random graphs: node names N0..N7, integer weights.
fn edge_list() -> impl Strategy<Value = Vec<(u8, u8, u8)>> {
    proptest::collection::vec((0u8..8, 0u8..8, 0u8..50), 1..30)
}

fn build(edges: &[(u8, u8, u8)]) -> GraphStore {
    let mut g = GraphStore::new();
    for (a, b, w) in edges {
        g.add_edge(&format!("N{a}"), &format!("N{b}"), f64::from(*w))
            .unwrap();
    }
    g
}

proptest! {
    /// Without coordinates, A* finds exactly Dijkstra's optimal cost
    #[test]
    fn matches_dijkstra_without_coordinates(edges in edge_list(), s in 0u8..8, t in 0u8..8) {
        let g = build(&edges);
        let (s, t) = (format!("N{s}"), format!("N{t}"));
        prop_assume!(g.contains(&s) && g.contains(&t));

        let finder = PathFinder::new(&g);
        let outcome = finder.route(&s, &t);

        match dijkstra_cost(&g, &s, &t) {
            Some(expected) => {
                prop_assert!(outcome.is_reachable());
                prop_assert_eq!(path_cost(&g, outcome.path()), expected);
                prop_assert_eq!(outcome.path().nodes().first(), Some(&s));
                prop_assert_eq!(outcome.path().nodes().last(), Some(&t));
            }
            None => prop_assert_eq!(outcome, PathOutcome::NoRoute),
        }
    }

    /// Every hop of a found path is a real edge
    #[test]
    fn found_paths_follow_edges(edges in edge_list(), s in 0u8..8, t in 0u8..8) {
        let g = build(&edges);
        let finder = PathFinder::new(&g);
        let outcome = finder.route(&format!("N{s}"), &format!("N{t}"));

        for (a, b) in outcome.path().hops() {
            prop_assert!(g.edge_weight(a, b).is_some());
        }
    }

    /// With admissible coordinates, A* still finds the optimal cost
    #[test]
    fn admissible_heuristic_stays_optimal(
        edges in edge_list(),
        points in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 8),
        s in 0u8..8,
        t in 0u8..8,
    ) {
        // Road distance = straight line + a non-negative detour
        let mut g = GraphStore::new();
        for (a, b, extra) in &edges {
            let pa = Coordinates::new(points[*a as usize].0, points[*a as usize].1).unwrap();
            let pb = Coordinates::new(points[*b as usize].0, points[*b as usize].1).unwrap();
            let weight = pa.haversine_km(&pb) + f64::from(*extra);
            g.add_edge(&format!("N{a}"), &format!("N{b}"), weight).unwrap();
        }
        for (i, (lat, lon)) in points.iter().enumerate() {
            let name = format!("N{i}");
            if g.contains(&name) {
                g.set_coordinates(&name, Coordinates::new(*lat, *lon).unwrap()).unwrap();
            }
        }

        let (s, t) = (format!("N{s}"), format!("N{t}"));
        prop_assume!(g.contains(&s) && g.contains(&t));

        let outcome = PathFinder::new(&g).route(&s, &t);
        match dijkstra_cost(&g, &s, &t) {
            Some(expected) => {
                prop_assert!(outcome.is_reachable());
                prop_assert!((path_cost(&g, outcome.path()) - expected).abs() < 1e-6);
            }
            None => prop_assert_eq!(outcome, PathOutcome::NoRoute),
        }
    }
}
