use crate::error::RouterError;

use std::str::FromStr;

use http::Method;
use smallvec::SmallVec;

/// Methods a route can be registered for.
pub const METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
    Method::PATCH,
];

const ALL: &str = "ALL";
const SEP: char = '|';

/// A non-empty set of concrete methods, kept in the order it was written.
///
/// Parsed from a `|`-delimited list such as `"GET|POST"`. The `ALL` marker
/// expands to every method in [`METHODS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet {
    methods: SmallVec<[Method; 7]>,
}

impl MethodSet {
    pub fn all() -> Self {
        Self {
            methods: METHODS.iter().cloned().collect(),
        }
    }

    pub fn one(method: Method) -> Self {
        let mut methods = SmallVec::new();
        methods.push(method);
        Self { methods }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    fn push(&mut self, method: Method) {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }
}

impl FromStr for MethodSet {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, RouterError> {
        let mut set = Self {
            methods: SmallVec::new(),
        };
        for token in s.split(SEP).map(str::trim).filter(|t| !t.is_empty()) {
            let token = token.to_ascii_uppercase();
            if token == ALL {
                METHODS.iter().cloned().for_each(|m| set.push(m));
                continue;
            }
            match METHODS.iter().find(|m| m.as_str() == token) {
                Some(m) => set.push(m.clone()),
                None => return Err(RouterError::InvalidMethod { method: token }),
            }
        }
        if set.methods.is_empty() {
            return Err(RouterError::EmptyMethods);
        }
        Ok(set)
    }
}

impl From<Method> for MethodSet {
    fn from(method: Method) -> Self {
        Self::one(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let set: MethodSet = "get|POST".parse().unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), [&Method::GET, &Method::POST]);

        let set: MethodSet = "ALL".parse().unwrap();
        assert_eq!(set, MethodSet::all());

        assert!(matches!(
            "GET|BREW".parse::<MethodSet>(),
            Err(RouterError::InvalidMethod { .. })
        ));
        assert!(matches!("|".parse::<MethodSet>(), Err(RouterError::EmptyMethods)));
    }
}
