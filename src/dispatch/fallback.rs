use super::handler::BoxHandler;
use crate::pattern::{Params, Pattern};
use crate::table::PatternList;

/// Pattern fallbacks tried in registration order, then the catch-all.
#[derive(Default, Clone)]
pub(crate) struct FallbackSet {
    patterns: PatternList<BoxHandler>,
    default: Option<BoxHandler>,
}

impl FallbackSet {
    pub(crate) fn push(&mut self, pattern: Pattern, h: BoxHandler) {
        self.patterns.push(pattern, h);
    }

    pub(crate) fn set_default(&mut self, h: BoxHandler) {
        self.default = Some(h);
    }

    pub(crate) fn find(&self, path: &str) -> Option<(&BoxHandler, Params)> {
        self.patterns
            .first(path)
            .or_else(|| self.default.as_ref().map(|h| (h, Params::empty())))
    }

    fn len(&self) -> usize {
        self.patterns.len() + usize::from(self.default.is_some())
    }
}

#[derive(Default, Clone)]
pub(crate) struct FallbackRegistry {
    pub(crate) not_found: FallbackSet,
    pub(crate) internal_error: FallbackSet,
}

impl FallbackRegistry {
    pub(crate) fn len(&self) -> usize {
        self.not_found.len() + self.internal_error.len()
    }
}
