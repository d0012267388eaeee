use super::*;
use pretty_assertions::assert_eq;

fn norm(raw: &str) -> Option<String> {
    normalize_reference(raw, false)
}

fn norm_escaped(raw: &str) -> Option<String> {
    normalize_reference(raw, true)
}

#[test]
fn test_plain_and_braced() {
    assert_eq!(norm("$NAME").as_deref(), Some("NAME"));
    assert_eq!(norm("${NAME}").as_deref(), Some("NAME"));
    assert_eq!(norm("$!NAME").as_deref(), Some("NAME"));
    assert_eq!(norm("$!{NAME}").as_deref(), Some("NAME"));
}

#[test]
fn test_unbraced_stops_at_dot_or_brace() {
    assert_eq!(norm("$foo.bar").as_deref(), Some("foo"));
    assert_eq!(norm("$foo}").as_deref(), Some("foo"));
    assert_eq!(norm("$foo{").as_deref(), Some("foo"));
}

#[test]
fn test_braced_malformed() {
    assert_eq!(norm("${a.b}"), None);
    assert_eq!(norm("${a{b}"), None);
    assert_eq!(norm("${abc"), None);
    assert_eq!(norm("${}"), None);
}

#[test]
fn test_single_backslash_is_escaped() {
    assert_eq!(norm("\\$X"), None);
    assert_eq!(norm_escaped("\\$X").as_deref(), Some("X"));
    assert_eq!(norm_escaped("\\${X}").as_deref(), Some("X"));
}

#[test]
fn test_backslash_pairs_collapse() {
    assert_eq!(norm("\\\\$X").as_deref(), Some("X"));
    assert_eq!(norm("\\\\\\\\$X").as_deref(), Some("X"));
    // Three backslashes: one pair plus an escape.
    assert_eq!(norm("\\\\\\$X"), None);
    assert_eq!(norm_escaped("\\\\\\$X").as_deref(), Some("X"));
}

#[test]
fn test_not_a_reference() {
    assert_eq!(norm("NAME"), None);
    assert_eq!(norm("$"), None);
    assert_eq!(norm("#set"), None);
    assert_eq!(norm_escaped("\\NAME"), None);
}

#[test]
fn test_idempotent_on_reference_form() {
    for raw in ["$a", "${Big_Name}", "\\\\$x.y", "$!{q}"] {
        let Some(name) = norm(raw) else {
            panic!("{raw} should normalize");
        };
        assert_eq!(norm(&format!("${name}")), Some(name.clone()));
        assert_eq!(norm(&format!("${{{name}}}")), Some(name));
    }
}

#[test]
fn test_ident_classes() {
    assert!(is_ident_start(b'a'));
    assert!(is_ident_start(b'_'));
    assert!(!is_ident_start(b'1'));
    assert!(is_ident_continue(b'1'));
    assert!(!is_ident_continue(b'-'));
    assert!(!is_ident_continue(0));
}
