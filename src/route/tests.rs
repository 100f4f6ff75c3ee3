#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::Route;
use crate::compiler::{CompileError, CompiledRoute, RouteCompiler, StandardRouteCompiler};

/// Coerce the concrete counting compiler into the trait object
/// `Route::with_compiler` expects, keeping the original `Arc` observable.
fn as_dyn(compiler: &Arc<CountingCompiler>) -> Arc<dyn RouteCompiler> {
    Arc::clone(compiler) as Arc<dyn RouteCompiler>
}

/// Delegates to the standard compiler while counting invocations, to observe
/// memoization and invalidation.
#[derive(Debug, Default)]
struct CountingCompiler {
    calls: AtomicUsize,
}

impl RouteCompiler for CountingCompiler {
    fn compile(&self, route: &Route) -> Result<CompiledRoute, CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StandardRouteCompiler.compile(route)
    }
}

#[test]
fn test_pattern_gets_leading_slash() {
    assert_eq!(Route::new("blog").pattern(), "/blog");
    assert_eq!(Route::new("/blog").pattern(), "/blog");
    assert_eq!(Route::new("  /blog  ").pattern(), "/blog");
    assert_eq!(Route::new("").pattern(), "/");
}

#[test]
fn test_requirement_anchors_stripped() {
    let mut route = Route::new("/user/{id}");
    route.set_requirement("id", r"^\d+$");
    assert_eq!(route.requirement("id"), Some(r"\d+"));

    let mut route = Route::new("/user/{id}");
    route.set_requirements(
        [("id".to_string(), r"^[a-z]+$".to_string())]
            .into_iter()
            .collect(),
    );
    assert_eq!(route.requirement("id"), Some("[a-z]+"));
}

#[test]
fn test_compile_is_memoized() {
    let compiler = Arc::new(CountingCompiler::default());
    let route = Route::with_compiler("/user/{id}", as_dyn(&compiler));

    let first = route.compile().expect("route should compile");
    let second = route.compile().expect("route should compile");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(compiler.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_setters_invalidate_compiled_form() {
    let compiler = Arc::new(CountingCompiler::default());
    let mut route = Route::with_compiler("/user/{id}", as_dyn(&compiler));

    let loose = route.compile().expect("route should compile");
    route.set_requirement("id", r"\d+");
    let strict = route.compile().expect("route should compile");

    assert_eq!(compiler.calls.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&loose, &strict));
    assert_ne!(loose.regex().as_str(), strict.regex().as_str());
    assert!(strict.regex().is_match("/user/42"));
    assert!(!strict.regex().is_match("/user/alice"));
}

#[test]
fn test_clone_starts_uncompiled() {
    let compiler = Arc::new(CountingCompiler::default());
    let route = Route::with_compiler("/user/{id}", as_dyn(&compiler));

    let original = route.compile().expect("route should compile");
    let clone = route.clone();
    let recompiled = clone.compile().expect("clone should compile");

    assert_eq!(compiler.calls.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&original, &recompiled));
    assert_eq!(original.regex().as_str(), recompiled.regex().as_str());
}

#[test]
fn test_compile_failure_is_not_memoized() {
    let mut route = Route::new("/{id}/{id}");
    assert!(route.compile().is_err());

    route.set_pattern("/{id}/{other}");
    let compiled = route.compile().expect("fixed route should compile");
    assert_eq!(compiled.variables(), ["id".to_string(), "other".to_string()]);
}
