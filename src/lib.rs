//! Request routing and dispatch.
//!
//! Routes are registered on a [`RouterBuilder`] as `(method, template,
//! handler)` triples, where a template such as `/users/{id}` is compiled
//! into a [`Pattern`] that matches a whole path. Sealing the builder yields
//! a [`Dispatcher`] that, for every request, runs the matching
//! before-middleware, the first matching route (or a not-found fallback),
//! the matching after-middleware, and contains any failure behind the
//! internal-error fallbacks. Every dispatch produces exactly one response.
//!
//! ```
//! use waypoint::{Context, Request, Response, RouterBuilder};
//!
//! let mut builder = RouterBuilder::new();
//! builder.get("/users/{id}", |cx: &Context<'_>| {
//!     Response::new(format!("user {}", cx.param("id").unwrap()).into_bytes())
//! });
//! let dispatcher = builder.build().unwrap();
//!
//! let req: Request = http::Request::get("/users/42/").body(Vec::new()).unwrap();
//! assert_eq!(dispatcher.dispatch(&req).body(), b"user 42");
//! ```

#![forbid(unsafe_code)]

mod builder;
mod config;
mod dispatch;
mod error;
mod pattern;
mod table;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

pub use crate::builder::RouterBuilder;
pub use crate::config::{Config, DEFAULT_OVERRIDE_HEADER};
pub use crate::dispatch::{
    bare, normalize_path, params, request, Context, Dispatcher, Emit, Handle, HandlerResult,
    IntoReply, ParamsFn, Request, RequestFn, Response,
};
pub use crate::error::{BoxError, ConfigError, DispatchError, RouterError};
pub use crate::pattern::{compile, Iter as ParamsIter, Params, Pattern};
pub use crate::table::{MethodSet, MethodTable, PatternList, METHODS};

pub use http::{Method, StatusCode};
