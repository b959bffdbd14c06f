use super::BoxFuture;
use crate::dispatch::{Dispatcher, Request};
use crate::error::BoxError;

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::service::Service;

/// Serves a [`Dispatcher`] over hyper. Cloning is cheap; every connection
/// gets its own clone and all of them read the same tables.
#[derive(Clone)]
pub struct DispatchService {
    dispatcher: Arc<Dispatcher>,
}

impl DispatchService {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self::from_shared(Arc::new(dispatcher))
    }

    pub fn from_shared(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}

impl From<Dispatcher> for DispatchService {
    fn from(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher)
    }
}

impl<B> Service<http::Request<B>> for DispatchService
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = http::Response<Full<Bytes>>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, BoxError>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let dispatcher = Arc::clone(&self.dispatcher);
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body.collect().await.map_err(Into::<BoxError>::into)?.to_bytes();
            let request: Request = http::Request::from_parts(parts, body.to_vec());
            let response = dispatcher.dispatch(&request);
            Ok::<_, BoxError>(response.map(|b| Full::new(Bytes::from(b))))
        })
    }
}
