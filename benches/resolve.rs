#![allow(clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion};
use routeshim::router::RouteTable;
use routeshim::table::parse_route_table;
use std::hint::black_box;

fn example_table() -> &'static str {
    r#"
- path: /
  handler: index
- path: /zoo
  handler: zoo/index
  children:
    - path: animals
      handler: zoo/animals
      children:
        - path: ":id"
          handler: zoo/animal
          children:
            - path: toys/:toy_id
              handler: zoo/animal_toy
    - path: ":category/animals/:id/habitats/:habitat_id/sections/:section_id"
      handler: zoo/habitat_section
    - path: health
      handler: zoo/health
- path: /inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id
  handler: inventory/batch
- path: /complex/:a/:b/:c/:d/:e/:f/:g/:h/:i
  handler: complex
"#
}

fn bench_resolve(c: &mut Criterion) {
    let defs = parse_route_table(example_table(), true).expect("failed to parse table");
    let table = RouteTable::new(&defs);
    let test_paths = [
        "/zoo/animals/123",
        "/zoo/animals/123/toys/456",
        "/zoo/cats/animals/123/habitats/88/sections/5",
        "/inventory/1/feeds/2/items/3/batches/4",
        "/complex/1/2/3/4/5/6/7/8/9",
        "/does/not/exist",
    ];

    c.bench_function("route_resolve", |b| {
        b.iter(|| {
            for path in &test_paths {
                black_box(table.resolve(path));
            }
        })
    });

    c.bench_function("route_resolve_with_params", |b| {
        b.iter(|| {
            for path in &test_paths {
                if let Some(route) = table.resolve(path) {
                    black_box(route.params(path));
                }
            }
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
