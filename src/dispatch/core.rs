use super::context::{Context, Frame};
use super::fallback::FallbackRegistry;
use super::handler::BoxHandler;
use super::middleware::MiddlewareChain;
use super::{Emit, Request, Response};
use crate::config::Config;
use crate::error::DispatchError;
use crate::table::MethodTable;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use http::StatusCode;
use tracing::{debug, error, trace, warn};

/// The sealed routing tables. Built once by a
/// [`RouterBuilder`](crate::RouterBuilder), then only read, so one instance
/// can serve any number of concurrent dispatches.
pub struct Dispatcher {
    pub(crate) routes: MethodTable<BoxHandler>,
    pub(crate) middleware: MiddlewareChain,
    pub(crate) fallbacks: FallbackRegistry,
    pub(crate) config: Config,
}

impl Dispatcher {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatches one request. Always yields a response: failures without
    /// an internal-error fallback become a generic 500.
    pub fn dispatch(&self, request: &Request) -> Response {
        self.dispatch_with_status(request).0
    }

    /// Like [`dispatch`](Self::dispatch), but hands back a failure that no
    /// internal-error fallback answered.
    pub fn try_dispatch(&self, request: &Request) -> Result<Response, DispatchError> {
        let frame = Frame::resolve(request, &self.config);
        let (response, _) = self.execute(&frame)?;
        Ok(frame.finish(response))
    }

    /// Dispatches and hands the response to `emitter` exactly once.
    /// Returns whether a route handled the request.
    pub fn run(&self, request: &Request, emitter: &mut impl Emit) -> bool {
        let (response, handled) = self.dispatch_with_status(request);
        emitter.emit(response);
        handled
    }
}

impl Dispatcher {
    fn dispatch_with_status(&self, request: &Request) -> (Response, bool) {
        let frame = Frame::resolve(request, &self.config);
        let (response, handled) = match self.execute(&frame) {
            Ok(done) => done,
            Err(e) => {
                error!(method = %frame.method, path = %frame.path, error = %e, "unrecovered dispatch failure");
                (internal_error(), false)
            }
        };
        (frame.finish(response), handled)
    }

    fn execute(&self, frame: &Frame<'_>) -> Result<(Response, bool), DispatchError> {
        match self.pipeline(frame) {
            Ok(done) => Ok(done),
            Err(failure) => self.recover(frame, failure).map(|res| (res, false)),
        }
    }

    fn pipeline(&self, frame: &Frame<'_>) -> Result<(Response, bool), DispatchError> {
        let (method, path) = (&frame.method, frame.path.as_str());

        for (handler, params) in self.middleware.before(method, path) {
            trace!(%method, path, "before middleware");
            let reply = invoke(handler, &frame.context(params))?;
            if let Some(res) = reply {
                if self.config.before_short_circuit {
                    debug!(%method, path, status = %res.status(), "before middleware answered");
                    return Ok((res, false));
                }
                warn!(%method, path, "discarding response returned by before middleware");
            }
        }

        let (mut response, handled) = match self.routes.first(method, path) {
            Some((handler, params)) => {
                debug!(%method, path, params = params.len(), "route matched");
                let reply = invoke(handler, &frame.context(params))?;
                (expect_response(reply, "route", frame)?, true)
            }
            None => (self.not_found(frame)?, false),
        };

        for (handler, params) in self.middleware.after(method, path) {
            trace!(%method, path, "after middleware");
            let reply = invoke(handler, &frame.context(params).with_response(&response))?;
            if let Some(res) = reply {
                response = res;
            }
        }

        Ok((response, handled))
    }

    fn not_found(&self, frame: &Frame<'_>) -> Result<Response, DispatchError> {
        match self.fallbacks.not_found.find(&frame.path) {
            Some((handler, params)) => {
                debug!(method = %frame.method, path = %frame.path, "not-found fallback matched");
                let reply = invoke(handler, &frame.context(params))?;
                expect_response(reply, "not-found", frame)
            }
            None if self.config.strict_not_found => Err(DispatchError::InvalidRoute {
                path: frame.path.clone(),
            }),
            None => {
                warn!(method = %frame.method, path = %frame.path, "no route and no not-found fallback");
                Ok(bare(StatusCode::NOT_FOUND))
            }
        }
    }

    fn recover(&self, frame: &Frame<'_>, failure: DispatchError) -> Result<Response, DispatchError> {
        error!(method = %frame.method, path = %frame.path, error = %failure, "request failed");

        let (handler, params) = match self.fallbacks.internal_error.find(&frame.path) {
            Some(found) => found,
            None => return Err(failure),
        };

        let reply = invoke(handler, &frame.context(params).with_failure(&failure))
            .and_then(|r| expect_response(r, "internal-error", frame));

        reply.map_err(|reason| {
            error!(path = %frame.path, error = %reason, "internal-error fallback failed");
            DispatchError::ErrorHandler {
                original: failure.to_string(),
                reason: reason.to_string(),
            }
        })
    }
}

fn invoke(handler: &BoxHandler, cx: &Context<'_>) -> Result<Option<Response>, DispatchError> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.call(cx))) {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(e)) => Err(DispatchError::Handler(e)),
        Err(payload) => Err(DispatchError::Panicked(panic_message(&*payload))),
    }
}

fn expect_response(
    reply: Option<Response>,
    stage: &'static str,
    frame: &Frame<'_>,
) -> Result<Response, DispatchError> {
    reply.ok_or_else(|| DispatchError::InvalidResponse {
        stage,
        path: frame.path.clone(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

/// A status-only response with no body.
pub fn bare(status: StatusCode) -> Response {
    let mut res = Response::new(Vec::new());
    *res.status_mut() = status;
    res
}

fn internal_error() -> Response {
    let mut res = Response::new(b"500 Internal Server Error".to_vec());
    *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&42_u8), "unknown panic payload");
    }

    #[test]
    fn dispatcher_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dispatcher>();
    }
}
