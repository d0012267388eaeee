use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_single_line() {
    let source = "${NAME}";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 2), (1, 3));
}

#[test]
fn test_multi_line() {
    let source = "a\n#set($x\nc";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 2), (2, 1));
    assert_eq!(table.offset_to_line_col(source, 10), (3, 1));
    assert_eq!(table.line_text(source, 2), Some("#set($x"));
}

#[test]
fn test_column_counts_chars() {
    let source = "é$x";
    let table = LineOffsetTable::build(source);
    // 'é' is two bytes; `$` sits at byte 2, column 2.
    assert_eq!(table.offset_to_line_col(source, 2), (1, 2));
}

#[test]
fn test_offset_past_end() {
    let source = "ab";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 10), (1, 3));
}

#[test]
fn test_line_text_out_of_range() {
    let table = LineOffsetTable::build("x");
    assert_eq!(table.line_text("x", 0), None);
    assert_eq!(table.line_text("x", 2), None);
}

#[test]
fn test_crlf_line_text() {
    let source = "one\r\ntwo";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("one"));
    assert_eq!(table.line_text(source, 2), Some("two"));
}
