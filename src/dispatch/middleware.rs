use super::handler::BoxHandler;
use crate::pattern::{Params, Pattern};
use crate::table::{MethodSet, MethodTable};

use http::Method;

/// Before/after middleware. Unlike routes, every matching entry runs.
#[derive(Default, Clone)]
pub(crate) struct MiddlewareChain {
    before: MethodTable<BoxHandler>,
    after: MethodTable<BoxHandler>,
}

impl MiddlewareChain {
    pub(crate) fn register_before(&mut self, methods: &MethodSet, pattern: Pattern, h: BoxHandler) {
        self.before.insert(methods, pattern, h);
    }

    pub(crate) fn register_after(&mut self, methods: &MethodSet, pattern: Pattern, h: BoxHandler) {
        self.after.insert(methods, pattern, h);
    }

    pub(crate) fn before<'a>(
        &'a self,
        method: &Method,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a BoxHandler, Params)> + 'a {
        self.before.all(method, path)
    }

    pub(crate) fn after<'a>(
        &'a self,
        method: &Method,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a BoxHandler, Params)> + 'a {
        self.after.all(method, path)
    }

    pub(crate) fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }
}
