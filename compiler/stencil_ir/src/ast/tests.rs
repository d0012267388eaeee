use super::*;
use pretty_assertions::assert_eq;

fn reference(raw: &str) -> Reference {
    let len = u32::try_from(raw.len()).unwrap_or(u32::MAX);
    Reference::from_raw(raw, Span::new(0, len)).unwrap_or_else(|| panic!("not a ref: {raw}"))
}

#[test]
fn test_from_raw_plain() {
    let r = reference("$NAME");
    assert_eq!(r.name, "NAME");
    assert_eq!(r.escapes, 0);
    assert!(!r.braced);
    assert!(!r.quiet);
    assert!(r.path.is_empty());
}

#[test]
fn test_from_raw_braced_with_escapes() {
    let r = reference("\\\\${YEAR}");
    assert_eq!(r.escapes, 2);
    assert!(r.braced);
    assert_eq!(r.name, "YEAR");
    assert_eq!(r.unescaped(), "${YEAR}");
}

#[test]
fn test_from_raw_quiet_chain() {
    let r = reference("$!user.name.first");
    assert!(r.quiet);
    assert_eq!(r.name, "user");
    assert_eq!(r.path, vec!["name".to_string(), "first".to_string()]);
    assert!(r.is_well_formed());
}

#[test]
fn test_from_raw_rejects_non_reference() {
    assert!(Reference::from_raw("#set", Span::DUMMY).is_none());
    assert!(Reference::from_raw("\\x", Span::DUMMY).is_none());
}

#[test]
fn test_malformed_braces() {
    assert!(!reference("${a{b}").is_well_formed());
    assert!(!reference("${}").is_well_formed());
    assert!(reference("${a.b}").is_well_formed());
}

#[test]
fn test_node_span() {
    let node = Node::Include {
        path: "Header".into(),
        span: Span::new(3, 20),
    };
    assert_eq!(node.span(), Span::new(3, 20));
    assert_eq!(Node::Reference(reference("$x")).span(), Span::new(0, 2));
}
