mod method;

pub use self::method::{MethodSet, METHODS};

use crate::pattern::{Params, Pattern};

use std::collections::HashMap;

use http::Method;

/// Ordered `(pattern, data)` entries. Insertion order is the match order.
#[derive(Debug, Clone)]
pub struct PatternList<T> {
    entries: Vec<(Pattern, T)>,
}

impl<T> Default for PatternList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PatternList<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, pattern: Pattern, data: T) -> &mut Self {
        self.entries.push((pattern, data));
        self
    }

    /// The earliest registered entry whose pattern matches `path`.
    pub fn first(&self, path: &str) -> Option<(&T, Params)> {
        self.entries
            .iter()
            .find_map(|(p, data)| p.matches(path).map(|params| (data, params)))
    }

    /// Every matching entry, in registration order.
    pub fn all<'a>(&'a self, path: &'a str) -> impl Iterator<Item = (&'a T, Params)> + 'a {
        self.entries
            .iter()
            .filter_map(move |(p, data)| p.matches(path).map(|params| (data, params)))
    }
}

/// One independent [`PatternList`] per method.
#[derive(Debug, Clone)]
pub struct MethodTable<T> {
    method_map: HashMap<Method, PatternList<T>>,
}

impl<T> Default for MethodTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MethodTable<T> {
    pub fn new() -> Self {
        Self {
            method_map: HashMap::new(),
        }
    }

    pub fn get(&self, method: &Method) -> Option<&PatternList<T>> {
        self.method_map.get(method)
    }

    pub fn first(&self, method: &Method, path: &str) -> Option<(&T, Params)> {
        self.method_map.get(method)?.first(path)
    }

    pub fn all<'a>(
        &'a self,
        method: &Method,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a T, Params)> + 'a {
        self.method_map
            .get(method)
            .into_iter()
            .flat_map(move |list| list.all(path))
    }

    pub fn len(&self) -> usize {
        self.method_map.values().map(PatternList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.method_map.values().all(PatternList::is_empty)
    }
}

impl<T: Clone> MethodTable<T> {
    /// Appends one entry per method in `methods`.
    pub fn insert(&mut self, methods: &MethodSet, pattern: Pattern, data: T) -> &mut Self {
        for method in methods.iter() {
            self.access_list(method.clone())
                .push(pattern.clone(), data.clone());
        }
        self
    }

    fn access_list(&mut self, method: Method) -> &mut PatternList<T> {
        self.method_map.entry(method).or_insert_with(PatternList::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile;

    fn table(routes: &[(&str, &str, usize)]) -> MethodTable<usize> {
        let mut t = MethodTable::new();
        for &(methods, pattern, data) in routes {
            t.insert(&methods.parse().unwrap(), compile(pattern).unwrap(), data);
        }
        t
    }

    #[test]
    fn first_match_wins() {
        let t = table(&[("GET", "/a/{x}", 1), ("GET", "/a/b", 2)]);
        let (data, params) = t.first(&Method::GET, "/a/b").unwrap();
        assert_eq!(*data, 1);
        assert_eq!(params.nth(0), Some("b"));
    }

    #[test]
    fn methods_are_independent() {
        let t = table(&[("GET", "/x", 1), ("POST", "/x", 2), ("PUT|PATCH", "/y", 3)]);
        assert_eq!(*t.first(&Method::GET, "/x").unwrap().0, 1);
        assert_eq!(*t.first(&Method::POST, "/x").unwrap().0, 2);
        assert_eq!(*t.first(&Method::PATCH, "/y").unwrap().0, 3);
        assert!(t.first(&Method::DELETE, "/x").is_none());
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn all_keeps_relative_order() {
        let t = table(&[("GET", "/{p}", 1), ("ALL", "/home", 2), ("GET", "/home", 3)]);
        let hits: Vec<usize> = t.all(&Method::GET, "/home").map(|(d, _)| *d).collect();
        assert_eq!(hits, [1, 2, 3]);
        let hits: Vec<usize> = t.all(&Method::POST, "/home").map(|(d, _)| *d).collect();
        assert_eq!(hits, [2]);
    }
}
