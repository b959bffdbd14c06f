use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Raised while building the routing tables. A builder that recorded one
/// of these refuses to produce a dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("unknown method {method:?}")]
    InvalidMethod { method: String },

    #[error("method list can not be empty")]
    EmptyMethods,

    #[error("{msg}: pattern = {template:?}")]
    MalformedTemplate {
        template: String,
        msg: &'static str,
    },

    #[error("invalid pattern {template:?}: {source}")]
    InvalidPattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}

impl RouterError {
    pub(crate) fn malformed(template: &str, msg: &'static str) -> Self {
        Self::MalformedTemplate {
            template: template.to_owned(),
            msg,
        }
    }
}

/// A failure caught by the dispatcher's error boundary.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("the {stage} handler for {path:?} did not produce a response")]
    InvalidResponse { stage: &'static str, path: String },

    #[error("route {path:?} has not been mapped and no 404 handler exists for this pattern")]
    InvalidRoute { path: String },

    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("handler panicked: {0}")]
    Panicked(String),

    #[error("error handler failed while handling {original}: {reason}")]
    ErrorHandler { original: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
