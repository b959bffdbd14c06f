mod routes_macro;

use crate::config::Config;
use crate::dispatch::fallback::FallbackRegistry;
use crate::dispatch::middleware::MiddlewareChain;
use crate::dispatch::{BoxHandler, Dispatcher, Handle};
use crate::error::RouterError;
use crate::pattern::Pattern;
use crate::table::{MethodSet, MethodTable};

use std::sync::Arc;

use http::Method;
use tracing::{error, info};

/// Collects routes, middleware and fallbacks, then seals them into a
/// [`Dispatcher`].
///
/// The chaining methods never fail on the spot: the first configuration
/// error is kept and returned by [`build`](Self::build). The `try_*`
/// methods report it immediately instead.
#[derive(Default)]
pub struct RouterBuilder {
    routes: MethodTable<BoxHandler>,
    middleware: MiddlewareChain,
    fallbacks: FallbackRegistry,
    config: Config,
    base: String,
    error: Option<RouterError>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn build(self) -> Result<Dispatcher, RouterError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        info!(
            routes = self.routes.len(),
            middleware = self.middleware.len(),
            fallbacks = self.fallbacks.len(),
            "router sealed"
        );
        Ok(Dispatcher {
            routes: self.routes,
            middleware: self.middleware,
            fallbacks: self.fallbacks,
            config: self.config,
        })
    }

    /// Registers `pattern` for a `|`-delimited method list such as
    /// `"GET|POST"`, or `"ALL"`.
    pub fn try_map(
        &mut self,
        methods: &str,
        pattern: &str,
        h: impl Handle,
    ) -> Result<&mut Self, RouterError> {
        let methods: MethodSet = methods.parse()?;
        self.try_route(methods, pattern, h)
    }

    pub fn try_route(
        &mut self,
        methods: impl Into<MethodSet>,
        pattern: &str,
        h: impl Handle,
    ) -> Result<&mut Self, RouterError> {
        let pattern = self.compile(pattern)?;
        self.routes.insert(&methods.into(), pattern, Arc::new(h));
        Ok(self)
    }

    pub fn map(&mut self, methods: &str, pattern: &str, h: impl Handle) -> &mut Self {
        let ret = self.try_map(methods, pattern, h).map(drop);
        self.record(ret)
    }

    pub fn route(&mut self, methods: impl Into<MethodSet>, pattern: &str, h: impl Handle) -> &mut Self {
        let ret = self.try_route(methods, pattern, h).map(drop);
        self.record(ret)
    }

    pub fn all(&mut self, pattern: &str, h: impl Handle) -> &mut Self {
        self.route(MethodSet::all(), pattern, h)
    }

    pub fn before(&mut self, pattern: &str, h: impl Handle) -> &mut Self {
        self.before_for(MethodSet::all(), pattern, h)
    }

    pub fn before_for(
        &mut self,
        methods: impl Into<MethodSet>,
        pattern: &str,
        h: impl Handle,
    ) -> &mut Self {
        let ret = self.compile(pattern).map(|p| {
            self.middleware
                .register_before(&methods.into(), p, Arc::new(h))
        });
        self.record(ret)
    }

    pub fn after(&mut self, pattern: &str, h: impl Handle) -> &mut Self {
        self.after_for(MethodSet::all(), pattern, h)
    }

    pub fn after_for(
        &mut self,
        methods: impl Into<MethodSet>,
        pattern: &str,
        h: impl Handle,
    ) -> &mut Self {
        let ret = self.compile(pattern).map(|p| {
            self.middleware
                .register_after(&methods.into(), p, Arc::new(h))
        });
        self.record(ret)
    }

    /// Catch-all not-found handler, consulted after every pattern one.
    pub fn set_404(&mut self, h: impl Handle) -> &mut Self {
        self.fallbacks.not_found.set_default(Arc::new(h));
        self
    }

    pub fn map_404(&mut self, pattern: &str, h: impl Handle) -> &mut Self {
        let ret = self
            .compile(pattern)
            .map(|p| self.fallbacks.not_found.push(p, Arc::new(h)));
        self.record(ret)
    }

    /// Catch-all internal-error handler, consulted after every pattern one.
    pub fn set_500(&mut self, h: impl Handle) -> &mut Self {
        self.fallbacks.internal_error.set_default(Arc::new(h));
        self
    }

    pub fn map_500(&mut self, pattern: &str, h: impl Handle) -> &mut Self {
        let ret = self
            .compile(pattern)
            .map(|p| self.fallbacks.internal_error.push(p, Arc::new(h)));
        self.record(ret)
    }

    /// Everything registered inside `f` is prefixed with `prefix`.
    pub fn mount(&mut self, prefix: &str, f: impl FnOnce(&mut Self)) -> &mut Self {
        let saved = self.base.clone();
        let prefix = prefix.trim_matches('/');
        if !prefix.is_empty() {
            self.base.push('/');
            self.base.push_str(prefix);
        }
        f(self);
        self.base = saved;
        self
    }
}

macro_rules! define_method {
    ($name:ident, $method:ident) => {
        pub fn $name(&mut self, pattern: &str, h: impl Handle) -> &mut Self {
            self.route(Method::$method, pattern, h)
        }
    };
}

impl RouterBuilder {
    define_method!(get, GET);
    define_method!(post, POST);
    define_method!(put, PUT);
    define_method!(patch, PATCH);
    define_method!(delete, DELETE);
    define_method!(options, OPTIONS);
}

impl RouterBuilder {
    fn compile(&self, pattern: &str) -> Result<Pattern, RouterError> {
        Pattern::compile(&self.full_pattern(pattern))
    }

    fn full_pattern(&self, pattern: &str) -> String {
        let joined = format!("{}/{}", self.base, pattern.trim_matches('/'));
        if self.base.is_empty() {
            joined
        } else {
            joined.trim_end_matches('/').to_owned()
        }
    }

    fn record(&mut self, ret: Result<(), RouterError>) -> &mut Self {
        if let Err(e) = ret {
            error!(error = %e, "route registration failed");
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
        self
    }
}
