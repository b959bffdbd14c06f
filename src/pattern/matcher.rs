use super::params::Params;
use super::Pattern;

use smallvec::SmallVec;

type Spans = SmallVec<[Option<(usize, usize)>; 8]>;

/// Runs the anchored match and slices one value per capturing unit.
///
/// A unit's value runs from its own start up to the start of the unit that
/// follows it (when that one took part in the match), clipped to its own
/// span and stripped of surrounding slashes. Units that did not take part
/// yield no value.
pub(super) fn slice(pattern: &Pattern, path: &str) -> Option<Params> {
    let caps = pattern.regex.captures(path)?;

    let raw: Spans = (1..=pattern.names.len())
        .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
        .collect();

    let spans: Spans = raw
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let (start, end) = (*span)?;
            let end = match raw.get(i + 1) {
                Some(Some((next, _))) => end.min((*next).max(start)),
                _ => end,
            };
            Some(trim_slashes(path, start, end))
        })
        .collect();

    Some(Params::new(path, pattern.names.clone(), spans))
}

fn trim_slashes(path: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    let bytes = path.as_bytes();
    while start < end && bytes[start] == b'/' {
        start += 1;
    }
    while end > start && bytes[end - 1] == b'/' {
        end -= 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use crate::pattern::compile;

    fn values(template: &str, path: &str) -> Option<Vec<Option<String>>> {
        let params = compile(template).unwrap().matches(path)?;
        Some(params.values().map(|v| v.map(str::to_owned)).collect())
    }

    fn some(v: &[&str]) -> Option<Vec<Option<String>>> {
        Some(v.iter().map(|s| Some((*s).to_owned())).collect())
    }

    #[test]
    fn whole_path_only() {
        assert_eq!(values("/users/{id}", "/users/42"), some(&["42"]));
        assert_eq!(values("/users/{id}", "/users/42/extra"), None);
        assert_eq!(values("/users/{id}", "/users"), None);
        assert_eq!(values("/users/{id}", "/v1/users/42"), None);
    }

    #[test]
    fn adjacent_placeholders() {
        assert_eq!(values("/{a}-{b}", "/foo-bar"), some(&["foo", "bar"]));
        assert_eq!(values("/{a}-{b}", "/foo-bar-baz"), some(&["foo", "bar-baz"]));
        assert_eq!(values("/{a}{b}/x", "/abc/x"), some(&["", "abc"]));
        assert_eq!(values("/{a}-{b}", "/-bar"), some(&["", "bar"]));
    }

    #[test]
    fn empty_placeholder() {
        assert_eq!(values("/a/{x}/b", "/a//b"), some(&[""]));
        assert_eq!(values("/a/{x}/b", "/a/x/y/b"), None);
    }

    #[test]
    fn nested_optional_groups() {
        assert_eq!(
            values("/blog(/(\\d+)(/[a-z]+)?)?", "/blog/2024/hello"),
            some(&["", "2024", "hello"])
        );
        assert_eq!(
            values("/blog(/(\\d+)(/[a-z]+)?)?", "/blog/2024"),
            Some(vec![Some("".into()), Some("2024".into()), None])
        );
        assert_eq!(
            values("/blog(/(\\d+)(/[a-z]+)?)?", "/blog"),
            Some(vec![None, None, None])
        );
    }

    #[test]
    fn raw_group_crosses_segments() {
        assert_eq!(values("/files(/.*)", "/files/a/b/c"), some(&["a/b/c"]));
        assert_eq!(
            values(r"/(\d+)/plus/(\d+)", "/1/plus/22"),
            some(&["1", "22"])
        );
    }
}
