// Performance-focused tests for router scalability
//
// Push resolution scans every registered route, so these tests keep the
// per-push cost bounded for registries of realistic size.

use super::Router;
use crate::config::RouterConfig;
use crate::pattern::PatternOverrides;
use std::time::Instant;

fn router_with(templates: &[String]) -> Router {
    let router = Router::new(RouterConfig::default());
    for template in templates {
        router
            .add_route(template.as_str(), &PatternOverrides::default())
            .unwrap();
    }
    router
}

#[test]
fn test_router_performance_with_many_routes() {
    let templates: Vec<String> = (0..500)
        .map(|i| format!("/api/v1/resource{i}/:id"))
        .collect();
    let router = router_with(&templates);

    let start = Instant::now();
    for i in 0..200 {
        let path = format!("/api/v1/resource250/{i}");
        assert!(router.push(&path).unwrap());
        assert_eq!(
            router.current_route().unwrap().template(),
            "/api/v1/resource250/:id"
        );
    }
    let duration = start.elapsed();

    // Generous bound: unoptimized test builds scan 100k regexes here
    assert!(
        duration.as_secs() < 5,
        "Router performance degraded: {}ms for 200 pushes with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_router_deep_paths() {
    let templates: Vec<String> = ["/a", "/a/b", "/a/b/c", "/a/b/c/d", "/a/b/c/d/e", "/a/b/c/d/e/f"]
        .iter()
        .map(|t| (*t).to_string())
        .collect();
    let router = router_with(&templates);

    let start = Instant::now();
    for i in 0..1000 {
        let path = if i % 2 == 0 { "/a/b/c/d/e/f" } else { "/a" };
        router.push(path).unwrap();
    }
    let duration = start.elapsed();

    assert_eq!(router.current_route().unwrap().template(), "/a");
    assert!(
        duration.as_secs() < 2,
        "Deep path matching too slow: {}ms",
        duration.as_millis()
    );
}

#[test]
fn test_router_common_prefix_resolution() {
    let templates: Vec<String> = [
        "/api/v1/users",
        "/api/v1/users/:id",
        "/api/v1/users/:id/profile",
        "/api/v1/posts",
        "/api/v1/posts/:id",
        "/api/v2/users",
        "/api/v2/posts",
    ]
    .iter()
    .map(|t| (*t).to_string())
    .collect();
    let router = router_with(&templates);

    for (path, template) in [
        ("/api/v1/users", "/api/v1/users"),
        ("/api/v1/users/123", "/api/v1/users/:id"),
        ("/api/v1/users/123/profile", "/api/v1/users/:id/profile"),
        ("/api/v1/posts", "/api/v1/posts"),
        ("/api/v2/users", "/api/v2/users"),
    ] {
        router.push(path).unwrap();
        assert_eq!(router.current_route().unwrap().template(), template);
    }
}

#[test]
fn test_parameter_extraction_performance() {
    let router = router_with(&[
        "/api/:version/users/:user_id/posts/:post_id/comments/:comment_id".to_string(),
    ]);
    router.push("/api/v1/users/123/posts/456/comments/789").unwrap();
    let route = router.current_route().unwrap();

    let start = Instant::now();
    for _ in 0..1000 {
        let result = route
            .params("/api/v1/users/123/posts/456/comments/789")
            .unwrap();
        assert_eq!(result.params.len(), 4);
    }
    let duration = start.elapsed();

    assert!(
        duration.as_secs() < 2,
        "Parameter extraction too slow: {}ms",
        duration.as_millis()
    );
}
