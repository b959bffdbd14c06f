use waypoint::{compile, Pattern, RouterError};

#[test]
fn named_and_positional() {
    let p = compile("/blog/{year}/{slug}").unwrap();
    assert_eq!(p.placeholders(), 2);
    assert_eq!(p.names().collect::<Vec<_>>(), [Some("year"), Some("slug")]);

    let params = p.matches("/blog/2024/hello-world").unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("year"), Some("2024"));
    assert_eq!(params.nth(1), Some("hello-world"));
    assert_eq!(params.parse::<u16>("year"), Some(Ok(2024)));
    assert!(params.parse::<u8>("year").unwrap().is_err());
    assert_eq!(params.get("missing"), None);
    assert_eq!(params.nth(2), None);

    let pairs: Vec<_> = params.iter().collect();
    assert_eq!(pairs, [(Some("year"), Some("2024")), (Some("slug"), Some("hello-world"))]);
    assert_eq!(params.iter().rev().next(), Some((Some("slug"), Some("hello-world"))));
}

#[test]
fn raw_groups_are_unnamed() {
    let p = compile(r"/(\d+)/plus/(\d+)").unwrap();
    assert_eq!(p.names().collect::<Vec<_>>(), [None, None]);

    let params = p.matches("/40/plus/2").unwrap();
    assert_eq!(params.values().collect::<Vec<_>>(), [Some("40"), Some("2")]);
    assert!(p.matches("/forty/plus/2").is_none());
}

#[test]
fn literals_are_escaped() {
    let p = compile("/files/{name}.txt").unwrap();
    assert_eq!(p.matches("/files/notes.txt").unwrap().get("name"), Some("notes"));
    assert!(!p.is_match("/files/notesxtxt"));

    let p = compile("/a+b").unwrap();
    assert!(p.is_match("/a+b"));
    assert!(!p.is_match("/aab"));
}

#[test]
fn no_placeholders() {
    let p = compile("/").unwrap();
    let params = p.matches("/").unwrap();
    assert!(params.is_empty());
    assert!(p.matches("/x").is_none());
}

#[test]
fn optional_group() {
    let p = compile("/docs(/[^/]+)?").unwrap();
    let params = p.matches("/docs").unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params.nth(0), None);

    let params = p.matches("/docs/intro").unwrap();
    assert_eq!(params.nth(0), Some("intro"));
}

#[test]
fn empty_placeholders() {
    let p = compile("/a/{x}/b").unwrap();
    assert_eq!(p.matches("/a//b").unwrap().get("x"), Some(""));

    let p = compile("/{a}-{b}").unwrap();
    let params = p.matches("/-bar").unwrap();
    assert_eq!(params.values().collect::<Vec<_>>(), [Some(""), Some("bar")]);

    let p = compile("/{a}{b}/x").unwrap();
    let params = p.matches("/abc/x").unwrap();
    assert_eq!(params.values().collect::<Vec<_>>(), [Some(""), Some("abc")]);
}

#[test]
fn parens_inside_classes() {
    let p = compile("/([)])").unwrap();
    assert_eq!(p.matches("/)").unwrap().nth(0), Some(")"));
    let p = compile("/([(])").unwrap();
    assert_eq!(p.matches("/(").unwrap().nth(0), Some("("));
}

#[test]
fn malformed_templates() {
    for template in ["/users/{id", "/users/{}", "/users/id}", "/a/{b{c}}", "/(x", "/x)"] {
        let err = Pattern::compile(template).unwrap_err();
        assert!(
            matches!(err, RouterError::MalformedTemplate { .. }),
            "{}: {:?}",
            template,
            err
        );
    }

    let err = compile("/([a-)").unwrap_err();
    assert!(matches!(err, RouterError::InvalidPattern { .. }));
}
