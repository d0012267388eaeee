use crate::parse;
use pretty_assertions::assert_eq;
use stencil_diagnostic::ErrorCode;
use stencil_ir::{ExprKind, Node, Reference, Span};

fn nodes(source: &str) -> Vec<Node> {
    parse(source).expect("template should parse").nodes
}

fn error_code(source: &str) -> ErrorCode {
    parse(source).expect_err("template should be rejected").code
}

fn literal(text: &str, start: u32) -> Node {
    let len = u32::try_from(text.len()).expect("test text fits in u32");
    Node::Literal {
        text: text.to_owned(),
        span: Span::new(start, start + len),
    }
}

fn reference(raw: &str, start: u32) -> Node {
    let len = u32::try_from(raw.len()).expect("test text fits in u32");
    Node::Reference(
        Reference::from_raw(raw, Span::new(start, start + len)).expect("raw reference"),
    )
}

// Text and references

#[test]
fn test_empty_template() {
    assert_eq!(nodes(""), vec![]);
}

#[test]
fn test_plain_text() {
    assert_eq!(nodes("hello"), vec![literal("hello", 0)]);
}

#[test]
fn test_reference_between_text() {
    assert_eq!(
        nodes("a $b c"),
        vec![literal("a ", 0), reference("$b", 2), literal(" c", 4)]
    );
}

#[test]
fn test_escaped_reference_keeps_backslashes() {
    let parsed = nodes("\\\\$x!");
    assert_eq!(parsed, vec![reference("\\\\$x", 0), literal("!", 4)]);
    let Node::Reference(r) = &parsed[0] else {
        panic!("expected a reference");
    };
    assert_eq!(r.escapes, 2);
    assert_eq!(r.name, "x");
}

#[test]
fn test_backslash_without_dollar_is_text() {
    assert_eq!(nodes("a\\nb"), vec![literal("a\\nb", 0)]);
    assert_eq!(nodes("trailing\\"), vec![literal("trailing\\", 0)]);
}

#[test]
fn test_dollar_without_identifier_is_text() {
    assert_eq!(nodes("cost: $5"), vec![literal("cost: $5", 0)]);
    assert_eq!(nodes("$"), vec![literal("$", 0)]);
    assert_eq!(nodes("${}"), vec![literal("${}", 0)]);
}

#[test]
fn test_braced_reference() {
    assert_eq!(
        nodes("${NAME}Impl"),
        vec![reference("${NAME}", 0), literal("Impl", 7)]
    );
}

#[test]
fn test_unterminated_braced_reference() {
    assert_eq!(error_code("x ${NAME"), ErrorCode::E0001);
    assert_eq!(error_code("${NAME\n}"), ErrorCode::E0001);
}

#[test]
fn test_property_chain_and_trailing_dot() {
    let parsed = nodes("$a.b.c $a.");
    let Node::Reference(chain) = &parsed[0] else {
        panic!("expected a reference");
    };
    assert_eq!(chain.name, "a");
    assert_eq!(chain.path, vec!["b".to_owned(), "c".to_owned()]);
    assert_eq!(parsed[2], reference("$a", 7));
    assert_eq!(parsed[3], literal(".", 9));
}

#[test]
fn test_quiet_reference() {
    let parsed = nodes("$!maybe");
    let Node::Reference(r) = &parsed[0] else {
        panic!("expected a reference");
    };
    assert!(r.quiet);
    assert_eq!(r.name, "maybe");
}

#[test]
fn test_hyphen_ends_identifier() {
    assert_eq!(
        nodes("$a-$b"),
        vec![reference("$a", 0), literal("-", 2), reference("$b", 3)]
    );
}

// Comments and unparsed blocks

#[test]
fn test_line_comment_swallows_newline() {
    assert_eq!(nodes("a## note\nb"), vec![literal("a", 0), literal("b", 9)]);
    assert_eq!(nodes("## only"), vec![]);
}

#[test]
fn test_block_comment() {
    assert_eq!(nodes("a#* $x *#b"), vec![literal("a", 0), literal("b", 9)]);
    assert_eq!(error_code("a#* open"), ErrorCode::E0003);
}

#[test]
fn test_unparsed_block_is_literal() {
    assert_eq!(nodes("#[[$x #if]]#"), vec![literal("$x #if", 3)]);
    assert_eq!(error_code("#[[ open"), ErrorCode::E0004);
}

#[test]
fn test_hash_text_is_not_a_directive() {
    assert_eq!(nodes("#include <stdio.h>"), vec![literal("#include <stdio.h>", 0)]);
    assert_eq!(nodes("color: #ff0000"), vec![literal("color: #ff0000", 0)]);
    assert_eq!(nodes("#endif"), vec![literal("#endif", 0)]);
    assert_eq!(nodes("# heading"), vec![literal("# heading", 0)]);
}

// Directives

#[test]
fn test_set_swallows_following_newline() {
    let parsed = nodes("#set($x = 'a')\nY");
    assert_eq!(parsed.len(), 2);
    let Node::Set { lhs, rhs, span } = &parsed[0] else {
        panic!("expected #set");
    };
    assert_eq!(lhs.name, "x");
    assert_eq!(rhs.kind, ExprKind::Str("a".to_owned()));
    assert_eq!(*span, Span::new(0, 14));
    assert_eq!(parsed[1], literal("Y", 15));
}

#[test]
fn test_set_swallows_crlf() {
    let parsed = nodes("#set($x = 1)\r\nY");
    assert_eq!(parsed[1], literal("Y", 14));
}

#[test]
fn test_set_errors() {
    assert_eq!(error_code("#set(x = 1)"), ErrorCode::E1006);
    assert_eq!(error_code("#set($x 1)"), ErrorCode::E1001);
    assert_eq!(error_code("#set($x = 1"), ErrorCode::E1003);
    assert_eq!(error_code("#set($x = )"), ErrorCode::E1002);
}

#[test]
fn test_parse_with_literal_path_is_include() {
    assert_eq!(
        nodes("#parse(\"File Header.java\")"),
        vec![Node::Include {
            path: "File Header.java".to_owned(),
            span: Span::new(0, 26),
        }]
    );
    assert!(matches!(
        nodes("#parse('header')")[0],
        Node::Include { ref path, .. } if path == "header"
    ));
}

#[test]
fn test_parse_with_dynamic_path_is_other() {
    let parsed = nodes("#parse($name)");
    let Node::Other { name, args, children, .. } = &parsed[0] else {
        panic!("expected an opaque directive");
    };
    assert_eq!(name, "parse");
    assert_eq!(args.len(), 1);
    assert!(children.is_empty());
}

#[test]
fn test_if_elseif_else() {
    let parsed = nodes("#if($a)A#elseif($b)B#else C#end!");
    assert_eq!(parsed.len(), 2);
    let Node::If { branches, otherwise, span } = &parsed[0] else {
        panic!("expected #if");
    };
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0].body, vec![literal("A", 7)]);
    assert_eq!(branches[1].body, vec![literal("B", 19)]);
    assert_eq!(otherwise.as_deref(), Some(&[literal(" C", 25)][..]));
    assert_eq!(*span, Span::new(0, 31));
    assert_eq!(parsed[1], literal("!", 31));
}

#[test]
fn test_braced_directives() {
    let parsed = nodes("#{if}($a)x#{else}y#{end}z");
    assert!(matches!(parsed[0], Node::If { otherwise: Some(_), .. }));
    assert_eq!(parsed[1], literal("z", 24));
}

#[test]
fn test_block_errors() {
    assert_eq!(error_code("#if($a) x"), ErrorCode::E1004);
    assert_eq!(error_code("#if($a) x #else y"), ErrorCode::E1004);
    assert_eq!(error_code("#end"), ErrorCode::E1005);
    assert_eq!(error_code("a #else b"), ErrorCode::E1005);
    assert_eq!(error_code("#elseif($a)"), ErrorCode::E1005);
    assert_eq!(error_code("#if($a"), ErrorCode::E1003);
    assert_eq!(error_code("#foreach($x in $y) #else #end"), ErrorCode::E1005);
}

#[test]
fn test_foreach() {
    let parsed = nodes("#foreach($item in $items)[$item]#end");
    let Node::Foreach { var, iterable, body, .. } = &parsed[0] else {
        panic!("expected #foreach");
    };
    assert_eq!(var.name, "item");
    assert!(matches!(&iterable.kind, ExprKind::Ref(r) if r.name == "items"));
    assert_eq!(body.len(), 3);
    assert_eq!(error_code("#foreach($x of $y)#end"), ErrorCode::E1001);
}

#[test]
fn test_macro_is_opaque_with_body() {
    let parsed = nodes("#macro(row $cell)<td>$cell</td>#end");
    let Node::Other { name, args, children, .. } = &parsed[0] else {
        panic!("expected #macro");
    };
    assert_eq!(name, "macro");
    assert_eq!(args[0].kind, ExprKind::Str("row".to_owned()));
    assert!(matches!(&args[1].kind, ExprKind::Ref(r) if r.name == "cell"));
    assert_eq!(children.len(), 3);
}

#[test]
fn test_break_and_stop_without_arguments() {
    let parsed = nodes("#foreach($i in [1..3])$i#break#end#stop");
    assert!(matches!(&parsed[1], Node::Other { name, args, .. } if name == "stop" && args.is_empty()));
    let Node::Foreach { body, .. } = &parsed[0] else {
        panic!("expected #foreach");
    };
    assert!(matches!(&body[1], Node::Other { name, .. } if name == "break"));
}

#[test]
fn test_interpolated_string_spans_are_absolute() {
    let parsed = nodes("#set($x = \"a$b\")");
    let Node::Set { rhs, .. } = &parsed[0] else {
        panic!("expected #set");
    };
    let ExprKind::Interpolated(parts) = &rhs.kind else {
        panic!("expected an interpolated string");
    };
    assert_eq!(parts, &vec![literal("a", 11), reference("$b", 12)]);
}

#[test]
fn test_nested_blocks() {
    let parsed = nodes("#if($a)#foreach($i in $l)#if($i)x#end#end#end");
    let Node::If { branches, .. } = &parsed[0] else {
        panic!("expected #if");
    };
    let Node::Foreach { body, .. } = &branches[0].body[0] else {
        panic!("expected #foreach");
    };
    assert!(matches!(body[0], Node::If { .. }));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 2_000;
    let source = format!("{}x{}", "#if(true)".repeat(depth), "#end".repeat(depth));
    assert!(parse(&source).is_ok());
}
