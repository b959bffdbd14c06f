mod context;
mod core;
mod handler;

pub(crate) mod fallback;
pub(crate) mod middleware;

pub use self::context::{normalize_path, Context};
pub use self::core::{bare, Dispatcher};
pub use self::handler::{params, request, Handle, HandlerResult, IntoReply, ParamsFn, RequestFn};

pub(crate) use self::handler::BoxHandler;

pub type Request = http::Request<Vec<u8>>;
pub type Response = http::Response<Vec<u8>>;

/// Writes a finished response to the transport.
pub trait Emit {
    fn emit(&mut self, response: Response);
}

impl<F> Emit for F
where
    F: FnMut(Response),
{
    fn emit(&mut self, response: Response) {
        (self)(response)
    }
}
