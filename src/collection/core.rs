use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::compiler::CompileError;
use crate::route::Route;

/// Valid route names: digits, letters, underscores and dots.
static ROUTE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("route name regex should be valid"));

/// Route registration error
///
/// Fatal at startup: registration failures are programming errors in the
/// route table, not runtime conditions.
#[derive(Debug, Clone)]
pub enum RegistrationError {
    /// The route name contains characters outside `[A-Za-z0-9_.]`
    InvalidName {
        /// The rejected name
        name: String,
    },
    /// A route failed to compile during an eager compilation pass
    Compile(CompileError),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::InvalidName { name } => {
                write!(
                    f,
                    "The provided route name \"{}\" contains non-valid characters. A route name \
                     must only contain digits (0-9), letters (a-z and A-Z), underscores (_) and \
                     dots (.).",
                    name
                )
            }
            RegistrationError::Compile(source) => source.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistrationError::Compile(source) => Some(source),
            RegistrationError::InvalidName { .. } => None,
        }
    }
}

impl From<CompileError> for RegistrationError {
    fn from(source: CompileError) -> Self {
        RegistrationError::Compile(source)
    }
}

/// One entry of a collection: a named leaf route or a nested sub-collection.
#[derive(Debug, Clone)]
pub enum CollectionEntry {
    /// A named route
    Route {
        /// The route's unique name
        name: String,
        /// The route definition
        route: Route,
    },
    /// A nested collection, reached through its prefix
    Collection(RouteCollection),
}

/// An ordered, nestable, prefixable set of named routes.
///
/// Built once during the registration phase and treated as read-only while
/// requests are served; only the per-route compiled-form memos mutate after
/// that, and those are concurrency-safe.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    entries: Vec<CollectionEntry>,
    prefix: String,
}

impl RouteCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated literal prefix applied to this collection's subtree.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Entries in insertion order.
    ///
    /// The matcher iterates these directly; ordering is first-match-wins.
    #[must_use]
    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    /// Number of leaf routes in the subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                CollectionEntry::Route { .. } => 1,
                CollectionEntry::Collection(collection) => collection.len(),
            })
            .sum()
    }

    /// Whether the subtree contains no leaf routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a named route at this level.
    ///
    /// Any pre-existing route with the same name anywhere in this tree is
    /// removed first, so the name stays unique and the new route takes the
    /// new position in matching order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidName`] when `name` contains
    /// characters outside digits, letters, underscores and dots.
    pub fn add(&mut self, name: &str, route: Route) -> Result<(), RegistrationError> {
        if !ROUTE_NAME_REGEX.is_match(name) {
            return Err(RegistrationError::InvalidName {
                name: name.to_string(),
            });
        }

        self.remove(name);
        debug!(name = %name, pattern = %route.pattern(), "Route registered");
        self.entries.push(CollectionEntry::Route {
            name: name.to_string(),
            route,
        });
        Ok(())
    }

    /// Attach a sub-collection, applying `prefix` to its whole subtree.
    ///
    /// Routes in this tree whose names collide with incoming ones are
    /// removed. The sub-collection is moved into the tree; afterwards it can
    /// only be reached (immutably) through its parent.
    pub fn add_collection(&mut self, mut collection: RouteCollection, prefix: &str) {
        collection.add_prefix(prefix);

        let incoming: Vec<String> = collection
            .all()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect();
        for name in &incoming {
            self.remove(name);
        }

        debug!(
            prefix = %collection.prefix(),
            routes = incoming.len(),
            "Route collection attached"
        );
        self.entries.push(CollectionEntry::Collection(collection));
    }

    /// Prepend a literal prefix to every pattern in the subtree.
    ///
    /// The prefix is normalized: trailing slashes are trimmed and a leading
    /// slash is ensured. An empty prefix is a no-op. Prefixed routes are
    /// rewritten through their pattern setter, so previously compiled forms
    /// are invalidated.
    pub fn add_prefix(&mut self, prefix: &str) {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return;
        }
        let prefix = if prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };

        self.prefix = format!("{}{}", prefix, self.prefix);

        for entry in &mut self.entries {
            match entry {
                CollectionEntry::Collection(collection) => collection.add_prefix(&prefix),
                CollectionEntry::Route { route, .. } => {
                    let pattern = format!("{}{}", prefix, route.pattern());
                    route.set_pattern(&pattern);
                }
            }
        }
    }

    /// Look up a route by name anywhere in the subtree.
    ///
    /// Nested collections are searched before this level's own leaves, most
    /// recently attached first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        for entry in self.entries.iter().rev() {
            if let CollectionEntry::Collection(collection) = entry {
                if let Some(route) = collection.get(name) {
                    return Some(route);
                }
            }
        }

        self.entries.iter().find_map(|entry| match entry {
            CollectionEntry::Route {
                name: entry_name,
                route,
            } if entry_name == name => Some(route),
            _ => None,
        })
    }

    /// Remove a route by name everywhere in the subtree.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|entry| {
            !matches!(entry, CollectionEntry::Route { name: entry_name, .. } if entry_name == name)
        });

        for entry in &mut self.entries {
            if let CollectionEntry::Collection(collection) = entry {
                collection.remove(name);
            }
        }
    }

    /// Flattened `(name, route)` view of the subtree, depth-first in
    /// insertion order. This is the order the matcher scans.
    #[must_use]
    pub fn all(&self) -> Vec<(&str, &Route)> {
        let mut routes = Vec::new();
        self.collect_all(&mut routes);
        routes
    }

    fn collect_all<'a>(&'a self, routes: &mut Vec<(&'a str, &'a Route)>) {
        for entry in &self.entries {
            match entry {
                CollectionEntry::Route { name, route } => routes.push((name.as_str(), route)),
                CollectionEntry::Collection(collection) => collection.collect_all(routes),
            }
        }
    }

    /// Compile every route in the subtree eagerly.
    ///
    /// Matching and generation compile lazily; this pass lets an application
    /// surface registration defects (duplicate variables, malformed
    /// requirements) at startup instead of on the first request that hits
    /// the broken route.
    ///
    /// # Errors
    ///
    /// Returns the first route's [`CompileError`], wrapped as a registration
    /// error.
    pub fn compile_all(&self) -> Result<(), RegistrationError> {
        for (name, route) in self.all() {
            if let Err(source) = route.compile() {
                debug!(name = %name, pattern = %route.pattern(), "Route failed to compile");
                return Err(RegistrationError::Compile(source));
            }
        }
        Ok(())
    }
}
