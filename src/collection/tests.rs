#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::{CollectionEntry, RegistrationError, RouteCollection};
use crate::compiler::CompileError;
use crate::route::Route;

#[test]
fn test_add_and_get() {
    let mut routes = RouteCollection::new();
    routes
        .add("home", Route::new("/"))
        .expect("name should be valid");

    assert_eq!(routes.len(), 1);
    let route = routes.get("home").expect("route should be found");
    assert_eq!(route.pattern(), "/");
    assert!(routes.get("missing").is_none());
}

#[test]
fn test_invalid_name_rejected() {
    let mut routes = RouteCollection::new();
    for name in ["foo bar", "foo-bar", "foo/bar", ""] {
        let err = routes
            .add(name, Route::new("/"))
            .expect_err("name should be rejected");
        assert!(matches!(
            err,
            RegistrationError::InvalidName { name: rejected } if rejected == name
        ));
    }
    assert!(routes.is_empty());

    routes
        .add("valid_name.v2", Route::new("/"))
        .expect("dots and underscores should be accepted");
}

#[test]
fn test_add_replaces_route_with_same_name() {
    let mut routes = RouteCollection::new();
    routes
        .add("first", Route::new("/one"))
        .expect("name should be valid");
    routes
        .add("second", Route::new("/two"))
        .expect("name should be valid");
    routes
        .add("first", Route::new("/changed"))
        .expect("name should be valid");

    assert_eq!(routes.len(), 2);
    let names: Vec<&str> = routes.all().into_iter().map(|(name, _)| name).collect();
    // Re-adding moves the route to the end of the matching order.
    assert_eq!(names, ["second", "first"]);
    assert_eq!(
        routes.get("first").expect("route should exist").pattern(),
        "/changed"
    );
}

#[test]
fn test_remove_reaches_nested_collections() {
    let mut sub = RouteCollection::new();
    sub.add("nested", Route::new("/inner"))
        .expect("name should be valid");

    let mut routes = RouteCollection::new();
    routes
        .add("top", Route::new("/top"))
        .expect("name should be valid");
    routes.add_collection(sub, "/sub");

    routes.remove("nested");
    assert!(routes.get("nested").is_none());
    assert_eq!(routes.len(), 1);
}

#[test]
fn test_add_prefix_normalizes_and_rewrites() {
    let mut routes = RouteCollection::new();
    routes
        .add("posts", Route::new("/posts"))
        .expect("name should be valid");

    routes.add_prefix("admin/");

    assert_eq!(routes.prefix(), "/admin");
    assert_eq!(
        routes.get("posts").expect("route should exist").pattern(),
        "/admin/posts"
    );

    // An empty prefix is a no-op.
    routes.add_prefix("/");
    assert_eq!(routes.prefix(), "/admin");
}

#[test]
fn test_add_collection_applies_prefix_and_removes_collisions() {
    let mut routes = RouteCollection::new();
    routes
        .add("dup", Route::new("/old"))
        .expect("name should be valid");

    let mut sub = RouteCollection::new();
    sub.add("dup", Route::new("/new"))
        .expect("name should be valid");
    routes.add_collection(sub, "/api");

    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes.get("dup").expect("route should exist").pattern(),
        "/api/new"
    );
}

#[test]
fn test_nested_prefixes_accumulate() {
    let mut inner = RouteCollection::new();
    inner
        .add("deep", Route::new("/leaf"))
        .expect("name should be valid");

    let mut mid = RouteCollection::new();
    mid.add_collection(inner, "/inner");

    let mut routes = RouteCollection::new();
    routes.add_collection(mid, "/outer");

    assert_eq!(
        routes.get("deep").expect("route should exist").pattern(),
        "/outer/inner/leaf"
    );

    let CollectionEntry::Collection(mid) = &routes.entries()[0] else {
        panic!("first entry should be the attached collection");
    };
    assert_eq!(mid.prefix(), "/outer");
    let CollectionEntry::Collection(inner) = &mid.entries()[0] else {
        panic!("nested entry should be the inner collection");
    };
    assert_eq!(inner.prefix(), "/outer/inner");
}

#[test]
fn test_all_flattens_depth_first_in_insertion_order() {
    let mut sub = RouteCollection::new();
    sub.add("b", Route::new("/b")).expect("name should be valid");
    sub.add("c", Route::new("/c")).expect("name should be valid");

    let mut routes = RouteCollection::new();
    routes.add("a", Route::new("/a")).expect("name should be valid");
    routes.add_collection(sub, "/s");
    routes.add("d", Route::new("/d")).expect("name should be valid");

    let names: Vec<&str> = routes.all().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
    assert_eq!(routes.len(), 4);
}

#[test]
fn test_compile_all_surfaces_registration_defects() {
    let mut routes = RouteCollection::new();
    routes
        .add("ok", Route::new("/fine/{x}"))
        .expect("name should be valid");
    routes
        .add("broken", Route::new("/{x}/{x}"))
        .expect("name should be valid");

    let err = routes
        .compile_all()
        .expect_err("duplicate variable should fail the pass");
    assert!(matches!(
        err,
        RegistrationError::Compile(CompileError::DuplicateVariable { variable, .. })
            if variable == "x"
    ));
}
