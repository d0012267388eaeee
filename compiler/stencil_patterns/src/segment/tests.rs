use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_no_names() {
    assert_eq!(
        split_placeholders("a ${X} b", &[]),
        vec![Segment::Literal {
            text: "a ${X} b",
            offset: 0
        }]
    );
}

#[test]
fn test_empty_text() {
    assert_eq!(split_placeholders("", &["X"]), vec![]);
}

#[test]
fn test_first_capture_then_backrefs() {
    assert_eq!(
        split_placeholders("${X}-${X}/${X}", &["X"]),
        vec![
            Segment::Capture { name: "X", offset: 0 },
            Segment::Literal { text: "-", offset: 4 },
            Segment::Backref { name: "X" },
            Segment::Literal { text: "/", offset: 9 },
            Segment::Backref { name: "X" },
        ]
    );
}

#[test]
fn test_leftmost_occurrence_is_captured_regardless_of_name_order() {
    let segments = split_placeholders("${B} ${A} ${B}", &["A", "B"]);
    assert_eq!(
        segments,
        vec![
            Segment::Capture { name: "B", offset: 0 },
            Segment::Literal { text: " ", offset: 4 },
            Segment::Capture { name: "A", offset: 5 },
            Segment::Literal { text: " ", offset: 9 },
            Segment::Backref { name: "B" },
        ]
    );
}

#[test]
fn test_prefix_names_are_distinct() {
    let segments = split_placeholders("${NAME}${NAMESPACE}", &["NAME", "NAMESPACE"]);
    assert_eq!(
        segments,
        vec![
            Segment::Capture { name: "NAME", offset: 0 },
            Segment::Capture {
                name: "NAMESPACE",
                offset: 7
            },
        ]
    );
}

#[test]
fn test_unbraced_and_absent_names_stay_literal() {
    assert_eq!(
        split_placeholders("$X ${Y}", &["X", ""]),
        vec![Segment::Literal {
            text: "$X ${Y}",
            offset: 0
        }]
    );
}

#[test]
fn test_repeated_name_in_list() {
    assert_eq!(
        split_placeholders("${X}${X}", &["X", "X"]),
        vec![
            Segment::Capture { name: "X", offset: 0 },
            Segment::Backref { name: "X" },
        ]
    );
}
