mod compile;
mod matcher;
mod params;

pub use self::params::{Iter, Params};

use crate::error::RouterError;

use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// A compiled route template.
///
/// Matches a whole path or nothing. The matching expression behind it is
/// private; callers only see [`Pattern::matches`] and the extracted
/// [`Params`].
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    names: Arc<[Option<Arc<str>>]>,
}

impl Pattern {
    pub fn compile(template: &str) -> Result<Self, RouterError> {
        self::compile::compile(template)
    }

    /// Number of capturing units, `{name}` placeholders and raw groups alike.
    pub fn placeholders(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.names.iter().map(|n| n.as_deref())
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn matches(&self, path: &str) -> Option<Params> {
        self::matcher::slice(self, path)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("names", &self.names)
            .finish()
    }
}

/// Shorthand for [`Pattern::compile`].
pub fn compile(template: &str) -> Result<Pattern, RouterError> {
    Pattern::compile(template)
}
