mod common;

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use serde_json::{json, Value};
use waymark::{MatchError, RequestContext, Route, RouteCollection, UrlMatcher};

fn matcher_for(routes: RouteCollection, method: Method) -> UrlMatcher {
    common::init_tracing();
    let mut context = RequestContext::default();
    context.set_method(method);
    UrlMatcher::new(Arc::new(routes), context)
}

#[test]
fn test_literal_route_matches_exactly() {
    let mut routes = RouteCollection::new();
    routes.add("about", Route::new("/about")).unwrap();

    let matcher = matcher_for(routes, Method::GET);

    assert!(matcher.match_path("/about").is_ok());

    // No trailing-slash tolerance and no prefix matching.
    for path in ["/about/", "/abou", "/about/team", "/About"] {
        assert!(
            matches!(matcher.match_path(path), Err(MatchError::NotFound)),
            "path {path:?} should not match"
        );
    }
}

#[test]
fn test_slug_match_yields_capture_and_route_name() {
    let mut routes = RouteCollection::new();
    routes.add("blog_show", Route::new("/blog/{slug}")).unwrap();

    let matcher = matcher_for(routes, Method::GET);

    let params = matcher.match_path("/blog/my-post").unwrap();
    let expected: HashMap<String, Value> = HashMap::from([
        ("slug".to_string(), json!("my-post")),
        ("_route".to_string(), json!("blog_show")),
    ]);
    assert_eq!(params, expected);
}

#[test]
fn test_nested_prefixes_accumulate_through_the_tree() {
    let mut v2 = RouteCollection::new();
    v2.add("v2_users", Route::new("/users")).unwrap();

    let mut admin = RouteCollection::new();
    admin.add("admin_users", Route::new("/users")).unwrap();
    admin.add_collection(v2, "/v2");

    let mut routes = RouteCollection::new();
    routes.add_collection(admin, "/admin");
    routes.add("home", Route::new("/")).unwrap();

    let matcher = matcher_for(routes, Method::GET);

    let params = matcher.match_path("/admin/users").unwrap();
    assert_eq!(params.get("_route"), Some(&json!("admin_users")));

    let params = matcher.match_path("/admin/v2/users").unwrap();
    assert_eq!(params.get("_route"), Some(&json!("v2_users")));

    let params = matcher.match_path("/").unwrap();
    assert_eq!(params.get("_route"), Some(&json!("home")));

    assert!(matcher.match_path("/v2/users").is_err());
}

#[test]
fn test_declaration_order_wins_across_collections() {
    // A collection attached before a sibling route is walked first even
    // though both could match.
    let mut api = RouteCollection::new();
    api.add("api_item", Route::new("/items/{id}")).unwrap();

    let mut routes = RouteCollection::new();
    routes.add_collection(api, "/");
    routes.add("catch_all", Route::new("/items/{rest}")).unwrap();

    let matcher = matcher_for(routes, Method::GET);

    let params = matcher.match_path("/items/42").unwrap();
    assert_eq!(params.get("_route"), Some(&json!("api_item")));
}

#[test]
fn test_method_restriction_reports_method_not_allowed() {
    let mut routes = RouteCollection::new();
    let mut create = Route::new("/orders");
    create.set_requirement("_method", "POST");
    routes.add("order_create", create).unwrap();

    let matcher = matcher_for(routes, Method::GET);

    match matcher.match_path("/orders") {
        Err(MatchError::MethodNotAllowed { allow }) => {
            assert_eq!(allow, vec!["POST"]);
        }
        other => panic!("expected MethodNotAllowed, got {other:?}"),
    }

    // A path no route covers is a plain NotFound.
    assert!(matches!(
        matcher.match_path("/orders/archive"),
        Err(MatchError::NotFound)
    ));
}

#[test]
fn test_head_request_passes_get_restriction() {
    let mut routes = RouteCollection::new();
    let mut route = Route::new("/status");
    route.set_requirement("_method", "GET");
    routes.add("status", route).unwrap();

    let matcher = matcher_for(routes, Method::HEAD);

    assert!(matcher.match_path("/status").is_ok());
}

#[test]
fn test_encoded_path_is_decoded_before_matching() {
    let mut routes = RouteCollection::new();
    routes
        .add("file_show", Route::new("/files/{name}"))
        .unwrap();

    let matcher = matcher_for(routes, Method::GET);

    let params = matcher.match_path("/files/annual%20report").unwrap();
    assert_eq!(params.get("name"), Some(&json!("annual report")));
}
