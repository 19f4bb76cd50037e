use criterion::{criterion_group, criterion_main, Criterion};
use riouter::pattern::{compile_template, PatternOptions};
use riouter::{Router, RouterConfig};
use std::hint::black_box;

fn example_config() -> &'static str {
    r#"
routes:
  - path: /
  - path: /zoo/animals
  - path: /zoo/animals/:id
  - path: /zoo/animals/:id/toys/:toy_id
  - path: /zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id
  - path: /inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id
  - path: /complex/:a/:b/:c/:d/:e/:f/:g/:h/:i
  - path: /files/:path*
  - path: /zoo/health
"#
}

fn example_router() -> Router {
    let config = RouterConfig::from_yaml_str(example_config()).expect("failed to parse config");
    Router::from_config(config).expect("failed to build router")
}

const TEST_PATHS: [&str; 6] = [
    "/zoo/animals/123",
    "/zoo/animals/123/toys/456",
    "/zoo/cats/animals/123/habitats/88/sections/5",
    "/inventory/1/feeds/2/items/3/batches/4",
    "/complex/1/2/3/4/5/6/7/8/9",
    "/files/a/b/c/d.txt",
];

fn bench_push_throughput(c: &mut Criterion) {
    let router = example_router();
    c.bench_function("router_push", |b| {
        b.iter(|| {
            for path in TEST_PATHS.iter() {
                let res = router.push(path);
                black_box(&res);
            }
        })
    });
}

fn bench_param_extraction(c: &mut Criterion) {
    let compiled = compile_template(
        "/zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id",
        &PatternOptions::default(),
    )
    .expect("failed to compile template");
    c.bench_function("match_params", |b| {
        b.iter(|| black_box(compiled.match_params("/zoo/cats/animals/123/habitats/88/sections/5")))
    });
}

fn bench_compile(c: &mut Criterion) {
    let options = PatternOptions::default();
    c.bench_function("compile_template", |b| {
        b.iter(|| black_box(compile_template("/users/:id(\\d+)/posts/:slug?/{-:page}?", &options)))
    });
}

criterion_group!(benches, bench_push_throughput, bench_param_extraction, bench_compile);
criterion_main!(benches);
