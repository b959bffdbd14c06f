use std::iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator};
use std::str::FromStr;
use std::sync::Arc;

use smallvec::SmallVec;

type Names = Arc<[Option<Arc<str>>]>;

/// Values extracted from a matched path, one slot per capturing unit in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct Params {
    path: Box<str>,
    names: Option<Names>,
    spans: SmallVec<[Option<(usize, usize)>; 8]>, // (start, end)
}

impl Params {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Positional access. `None` for an out-of-range index and for a unit
    /// that did not take part in the match.
    pub fn nth(&self, index: usize) -> Option<&str> {
        let (s, e) = (*self.spans.get(index)?)?;
        Some(&self.path[s..e])
    }

    /// Access by placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let names = self.names.as_ref()?;
        let index = names.iter().position(|n| n.as_deref() == Some(name))?;
        self.nth(index)
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            params: self,
            range: 0..self.spans.len(),
        }
    }
}

impl Params {
    pub(super) fn new(
        path: &str,
        names: Names,
        spans: SmallVec<[Option<(usize, usize)>; 8]>,
    ) -> Self {
        let path = if spans.iter().any(Option::is_some) {
            path.into()
        } else {
            Box::default()
        };
        Self {
            path,
            names: Some(names),
            spans,
        }
    }

    fn entry(&self, index: usize) -> (Option<&str>, Option<&str>) {
        let name = self
            .names
            .as_ref()
            .and_then(|names| names.get(index))
            .and_then(|n| n.as_deref());
        (name, self.nth(index))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (Option<&'a str>, Option<&'a str>);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Yields `(name, value)` pairs. Raw groups have no name.
pub struct Iter<'a> {
    params: &'a Params,
    range: std::ops::Range<usize>,
}

macro_rules! delegate {
    ($method:tt) => {
        fn $method(&mut self) -> Option<Self::Item> {
            let i = self.range.$method()?;
            Some(self.params.entry(i))
        }
    };
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Option<&'a str>, Option<&'a str>);
    delegate!(next);

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    delegate!(next_back);
}

impl FusedIterator for Iter<'_> {}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.range.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::pattern::compile;

    #[test]
    fn named_and_positional() {
        let p = compile("/users/{id}/posts/{post}").unwrap();
        let params = p.matches("/users/7/posts/hello").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("7"));
        assert_eq!(params.nth(1), Some("hello"));
        assert_eq!(params.get("nope"), None);
        assert_eq!(params.nth(2), None);
        assert_eq!(params.parse::<u32>("id"), Some(Ok(7)));

        let pairs: Vec<_> = params.iter().rev().collect();
        assert_eq!(pairs, [(Some("post"), Some("hello")), (Some("id"), Some("7"))]);
    }

    #[test]
    fn empty() {
        let params = crate::Params::empty();
        assert!(params.is_empty());
        assert_eq!(params.iter().len(), 0);
    }
}
