#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;

use http::Method;
use serde_json::json;

use crate::collection::RouteCollection;
use crate::context::RequestContext;
use crate::route::Route;

use super::Router;

fn sample_routes() -> RouteCollection {
    let mut routes = RouteCollection::new();
    let mut show = Route::new("/blog/{slug}");
    show.set_default("_controller", json!("blog.show"));
    routes.add("blog_show", show).unwrap();

    let mut index = Route::new("/blog/{page}");
    index.set_default("page", json!(1));
    routes.add("blog_index", index).unwrap();
    routes
}

#[test]
fn test_match_and_generate_share_the_table() {
    let router = Router::new(sample_routes(), RequestContext::default());

    let params = router.match_path("/blog/rust-1.0").unwrap();
    assert_eq!(params.get("_route"), Some(&json!("blog_show")));
    assert_eq!(params.get("slug"), Some(&json!("rust-1.0")));

    let url = router
        .generate(
            "blog_show",
            &HashMap::from([("slug".to_string(), json!("rust-1.0"))]),
            false,
        )
        .unwrap();
    assert_eq!(url, "/blog/rust-1.0");
}

#[test]
fn test_set_context_reaches_both_delegates() {
    let mut routes = sample_routes();
    let mut create = Route::new("/posts");
    create.set_requirement("_method", "POST");
    routes.add("post_create", create).unwrap();

    let mut router = Router::new(routes, RequestContext::default());

    // Under the default GET context the POST-only route is rejected.
    assert!(router.match_path("/posts").is_err());

    let mut context = RequestContext::default();
    context.set_method(Method::POST).set_base_url("/index.php");
    router.set_context(context);

    assert_eq!(router.context().base_url(), "/index.php");

    // The matcher sees the new method.
    let params = router.match_path("/posts").unwrap();
    assert_eq!(params.get("_route"), Some(&json!("post_create")));

    // The generator sees the new base URL.
    let url = router
        .generate(
            "blog_show",
            &HashMap::from([("slug".to_string(), json!("x"))]),
            false,
        )
        .unwrap();
    assert_eq!(url, "/index.php/blog/x");
}

#[test]
fn test_routes_accessor_exposes_registrations() {
    let router = Router::new(sample_routes(), RequestContext::default());

    assert_eq!(router.routes().len(), 2);
    assert!(router.routes().get("blog_index").is_some());
}
