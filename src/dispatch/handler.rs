use super::context::Context;
use super::Response;
use crate::error::BoxError;
use crate::pattern::Params;

use std::sync::Arc;

use http::Request;

/// `Ok(None)` lets a middleware fall through; for a route or a fallback it
/// is an invalid response.
pub type HandlerResult = Result<Option<Response>, BoxError>;

/// The single invocation signature every registered handler is stored as.
pub trait Handle: Send + Sync + 'static {
    fn call(&self, cx: &Context<'_>) -> HandlerResult;
}

pub(crate) type BoxHandler = Arc<dyn Handle>;

impl<F, R> Handle for F
where
    F: Fn(&Context<'_>) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    fn call(&self, cx: &Context<'_>) -> HandlerResult {
        (self)(cx).into_reply()
    }
}

/// Values a handler may hand back.
pub trait IntoReply {
    fn into_reply(self) -> HandlerResult;
}

impl IntoReply for Response {
    fn into_reply(self) -> HandlerResult {
        Ok(Some(self))
    }
}

impl IntoReply for Option<Response> {
    fn into_reply(self) -> HandlerResult {
        Ok(self)
    }
}

impl IntoReply for () {
    fn into_reply(self) -> HandlerResult {
        Ok(None)
    }
}

impl<R, E> IntoReply for Result<R, E>
where
    R: IntoReply,
    E: Into<BoxError>,
{
    fn into_reply(self) -> HandlerResult {
        self.map_err(Into::into)?.into_reply()
    }
}

/// Adapts a callable that only wants the extracted parameters.
pub fn params<F, R>(f: F) -> ParamsFn<F>
where
    F: Fn(&Params) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    ParamsFn(f)
}

/// Adapts a callable taking the raw request and the extracted parameters.
pub fn request<F, R>(f: F) -> RequestFn<F>
where
    F: Fn(&Request<Vec<u8>>, &Params) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    RequestFn(f)
}

pub struct ParamsFn<F>(F);

pub struct RequestFn<F>(F);

impl<F, R> Handle for ParamsFn<F>
where
    F: Fn(&Params) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    fn call(&self, cx: &Context<'_>) -> HandlerResult {
        (self.0)(cx.params()).into_reply()
    }
}

impl<F, R> Handle for RequestFn<F>
where
    F: Fn(&Request<Vec<u8>>, &Params) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    fn call(&self, cx: &Context<'_>) -> HandlerResult {
        (self.0)(cx.request(), cx.params()).into_reply()
    }
}
