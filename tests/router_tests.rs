//! Route resolution against nested tables
//!
//! # Test Coverage
//!
//! - First match wins in traversal order, siblings before children
//! - Static routes match only the exact (trailing-slash-normalized) path
//! - Segment-count mismatches never match
//! - Parameter extraction yields one entry per dynamic segment
//! - Root and index routes
//! - Sorted, de-duplicated canonical path listing

use routeshim::router::{params_to_map, RouteTable};
use routeshim::table::{parse_route_table, RouteDef};

fn example_table() -> &'static str {
    r#"
- path: /
  handler: root
- path: /zoo
  handler: zoo/index
  children:
    - path: ""
      handler: zoo/index_child
    - path: animals
      handler: zoo/animals
      children:
        - path: ":id"
          handler: zoo/animal
          children:
            - path: toys/:toy_id
              handler: zoo/animal_toy
    - path: health
      handler: zoo/health
    - path: ":category"
      handler: zoo/category
- path: /api/users/:id
  handler: h
"#
}

fn table() -> RouteTable {
    RouteTable::new(&parse_route_table(example_table(), true).unwrap())
}

fn assert_route_match(table: &RouteTable, path: &str, expected_handler: &str) {
    match table.resolve(path) {
        Some(route) => {
            println!("✅ {} → {}", path, route.handler_ref);
            assert_eq!(
                route.handler_ref.as_ref(),
                expected_handler,
                "Handler mismatch for {path}"
            );
        }
        None => {
            println!("❌ {} → no match", path);
            assert_eq!(expected_handler, "<none>", "Expected route to match for {path}");
        }
    }
}

#[test]
fn test_router_root_path() {
    let table = table();
    assert_route_match(&table, "/", "root");
    assert_route_match(&table, "", "root");
}

#[test]
fn test_router_static_child() {
    let table = table();
    assert_route_match(&table, "/zoo/animals", "zoo/animals");
    assert_route_match(&table, "/zoo/animals/", "zoo/animals");
}

#[test]
fn test_router_parent_wins_over_index_child() {
    // The index child shares `/zoo` but its parent is visited first.
    assert_route_match(&table(), "/zoo", "zoo/index");
}

#[test]
fn test_router_sibling_checked_before_children() {
    // `/zoo/health` is a static sibling of the `:category` node, and both are
    // on the same level; declaration order decides.
    let table = table();
    assert_route_match(&table, "/zoo/health", "zoo/health");
    assert_route_match(&table, "/zoo/reptiles", "zoo/category");
}

#[test]
fn test_router_first_match_wins_over_specificity() {
    let defs = vec![
        RouteDef::new("/items/:id", "dynamic"),
        RouteDef::new("/items/new", "static"),
    ];
    let table = RouteTable::new(&defs);
    assert_route_match(&table, "/items/new", "dynamic");
}

#[test]
fn test_router_dynamic_chain() {
    let table = table();
    assert_route_match(&table, "/zoo/animals/7", "zoo/animal");
    assert_route_match(&table, "/zoo/animals/7/toys/ball", "zoo/animal_toy");
}

#[test]
fn test_router_segment_count_mismatch() {
    let table = table();
    assert_route_match(&table, "/zoo/animals/7/toys", "<none>");
    assert_route_match(&table, "/api/users", "<none>");
    assert_route_match(&table, "/api/users/1/extra", "<none>");
}

#[test]
fn test_router_unknown_path() {
    assert_route_match(&table(), "/unknown/path", "<none>");
}

#[test]
fn test_router_case_sensitive() {
    assert_route_match(&table(), "/ZOO/animals", "<none>");
}

#[test]
fn test_resolution_is_deterministic() {
    let table = table();
    for path in ["/", "/zoo/animals/3", "/zoo/x", "/nope", "/api/users/9"] {
        assert_eq!(table.resolve(path), table.resolve(path), "{path}");
    }
}

#[test]
fn test_params_one_entry_per_dynamic_segment() {
    let table = table();
    let route = table.resolve("/zoo/animals/7/toys/ball").unwrap();
    assert_eq!(route.canonical_path.as_ref(), "/zoo/animals/:id/toys/:toy_id");
    assert_eq!(route.param_count(), 2);

    let params = route.params("/zoo/animals/7/toys/ball");
    assert_eq!(params.len(), 2);
    let map = params_to_map(&params);
    assert_eq!(map.get("id").map(String::as_str), Some("7"));
    assert_eq!(map.get("toy_id").map(String::as_str), Some("ball"));
}

#[test]
fn test_params_values_are_verbatim() {
    let table = table();
    let route = table.resolve("/api/users/a%20b").unwrap();
    let map = params_to_map(&route.params("/api/users/a%20b"));
    assert_eq!(map["id"], "a%20b");
}

#[test]
fn test_canonical_paths_sorted_and_deduplicated() {
    let paths = table().canonical_paths();
    assert_eq!(
        paths,
        vec![
            "/",
            "/api/users/:id",
            "/zoo",
            "/zoo/:category",
            "/zoo/animals",
            "/zoo/animals/:id",
            "/zoo/animals/:id/toys/:toy_id",
            "/zoo/health",
        ]
    );
}

#[test]
fn test_table_len_counts_every_node() {
    let table = table();
    assert_eq!(table.len(), 9);
    assert!(!table.is_empty());
    assert!(RouteTable::new(&[]).is_empty());
}

#[test]
fn test_empty_table_never_matches() {
    let table = RouteTable::new(&[]);
    assert!(table.resolve("/").is_none());
    assert!(table.canonical_paths().is_empty());
}
