use super::{Request, Response};
use crate::config::Config;
use crate::error::DispatchError;
use crate::pattern::Params;

use std::borrow::Cow;

use http::Method;
use tracing::debug;

/// Methods a POST may be rewritten to through the override header.
static OVERRIDABLE: [Method; 3] = [Method::PUT, Method::DELETE, Method::PATCH];

/// What a handler sees of the request being dispatched.
pub struct Context<'a> {
    frame: &'a Frame<'a>,
    params: Params,
    response: Option<&'a Response>,
    failure: Option<&'a DispatchError>,
}

impl<'a> Context<'a> {
    pub fn request(&self) -> &Request {
        self.frame.request
    }

    /// The method used for routing, after HEAD and override resolution.
    pub fn method(&self) -> &Method {
        &self.frame.method
    }

    /// The normalized path the patterns were matched against.
    pub fn path(&self) -> &str {
        &self.frame.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn is_head(&self) -> bool {
        self.frame.head
    }

    pub fn config(&self) -> &Config {
        self.frame.config
    }

    /// The response produced so far. Only after-middleware sees one.
    pub fn response(&self) -> Option<&Response> {
        self.response
    }

    /// The failure being handled. Only internal-error fallbacks see one.
    pub fn failure(&self) -> Option<&DispatchError> {
        self.failure
    }

    pub(super) fn with_response(mut self, response: &'a Response) -> Self {
        self.response = Some(response);
        self
    }

    pub(super) fn with_failure(mut self, failure: &'a DispatchError) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Per-dispatch state shared by every handler invoked for one request.
pub(super) struct Frame<'a> {
    request: &'a Request,
    config: &'a Config,
    pub(super) method: Method,
    pub(super) path: String,
    pub(super) head: bool,
}

impl<'a> Frame<'a> {
    pub(super) fn resolve(request: &'a Request, config: &'a Config) -> Self {
        let (method, head) = resolve_method(request, config);
        let path = normalize_path(request.uri().path(), config.base_path());
        Self {
            request,
            config,
            method,
            path,
            head,
        }
    }

    pub(super) fn context(&'a self, params: Params) -> Context<'a> {
        Context {
            frame: self,
            params,
            response: None,
            failure: None,
        }
    }

    /// A HEAD request still runs its GET handler; only the body is dropped.
    pub(super) fn finish(&self, mut response: Response) -> Response {
        if self.head {
            response.body_mut().clear();
        }
        response
    }
}

fn resolve_method(request: &Request, config: &Config) -> (Method, bool) {
    let method = request.method();

    if method == Method::HEAD {
        return (Method::GET, true);
    }

    if method == Method::POST {
        let value = request
            .headers()
            .get(config.method_override_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim);

        if let Some(m) = value.and_then(|v| OVERRIDABLE.iter().find(|m| m.as_str() == v)) {
            debug!(method = %m, "method overridden by header");
            return (m.clone(), false);
        }
    }

    (method.clone(), false)
}

/// Strips the base path and query, percent-decodes, trims slashes and
/// enforces a leading one.
pub fn normalize_path(target: &str, base_path: &str) -> String {
    let target = match target.find('?') {
        Some(i) => &target[..i],
        None => target,
    };

    let decoded = urlencoding::decode(target).unwrap_or(Cow::Borrowed(target));

    let rest = match decoded.strip_prefix(base_path) {
        Some(rest) if !base_path.is_empty() && (rest.is_empty() || rest.starts_with('/')) => rest,
        _ => &decoded[..],
    };

    let mut path = String::with_capacity(rest.len() + 1);
    path.push('/');
    path.push_str(rest.trim_matches('/'));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_path("/users/", ""), "/users");
        assert_eq!(normalize_path("users", ""), "/users");
        assert_eq!(normalize_path("/", ""), "/");
        assert_eq!(normalize_path("", ""), "/");
        assert_eq!(normalize_path("/a%20b?x=1", ""), "/a b");
        assert_eq!(normalize_path("/app/users/", "/app"), "/users");
        assert_eq!(normalize_path("/app", "/app"), "/");
        assert_eq!(normalize_path("/application", "/app"), "/application");
    }

    #[test]
    fn method_resolution() {
        let config = Config::default();

        let req = http::Request::head("/").body(Vec::new()).unwrap();
        assert_eq!(resolve_method(&req, &config), (Method::GET, true));

        let req = http::Request::post("/")
            .header("X-HTTP-Method-Override", "DELETE")
            .body(Vec::new())
            .unwrap();
        assert_eq!(resolve_method(&req, &config), (Method::DELETE, false));

        let req = http::Request::post("/")
            .header("X-HTTP-Method-Override", "GET")
            .body(Vec::new())
            .unwrap();
        assert_eq!(resolve_method(&req, &config), (Method::POST, false));

        let req = http::Request::put("/")
            .header("X-HTTP-Method-Override", "PATCH")
            .body(Vec::new())
            .unwrap();
        assert_eq!(resolve_method(&req, &config), (Method::PUT, false));
    }
}
