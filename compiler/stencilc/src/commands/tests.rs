use super::*;
use pretty_assertions::assert_eq;

use crate::commands::render::parse_properties;
use crate::Value;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|&arg| arg.to_owned()).collect()
}

#[test]
fn test_parse_args() {
    let args = CommandArgs::parse(&strings(&[
        "File.java.ft",
        "--include-dir",
        "includes",
        "--known=USER",
        "-k",
        "DATE",
        "--dummies",
        "-I",
        "more",
        "NAME=x",
    ]))
    .expect("arguments are valid");
    assert_eq!(
        args,
        CommandArgs {
            positional: strings(&["File.java.ft", "NAME=x"]),
            include_dirs: vec![PathBuf::from("includes"), PathBuf::from("more")],
            known: strings(&["USER", "DATE"]),
            dummies: true,
        }
    );
}

#[test]
fn test_parse_args_errors() {
    let missing = CommandArgs::parse(&strings(&["f", "--include-dir"]));
    assert!(matches!(missing, Err(CliError::Usage(message)) if message.contains("needs a value")));

    let unknown = CommandArgs::parse(&strings(&["--verbose"]));
    assert!(matches!(unknown, Err(CliError::Usage(message)) if message.contains("--verbose")));
}

#[test]
fn test_required_positional() {
    let args = CommandArgs::parse(&strings(&["a"])).expect("arguments are valid");
    assert_eq!(args.required(0, "file", "usage").ok(), Some("a"));
    let error = args.required(1, "document file", "stencil extract <t> <d>");
    assert!(matches!(error, Err(CliError::Usage(message)) if message.starts_with("missing document file")));
}

#[test]
fn test_template_from_file_name() {
    let template = template_from_file_name("Header.java.ft", "text".to_owned());
    assert_eq!(template.name, "Header");
    assert_eq!(template.extension, "java");
    assert_eq!(template.text, "text");

    let template = template_from_file_name("Header.ft", String::new());
    assert_eq!((template.name.as_str(), template.extension.as_str()), ("Header", ""));

    let template = template_from_file_name("Build.gradle.kts", String::new());
    assert_eq!(
        (template.name.as_str(), template.extension.as_str()),
        ("Build.gradle", "kts")
    );

    let template = template_from_file_name(".gitignore", String::new());
    assert_eq!(template.name, ".gitignore");
}

#[test]
fn test_parse_properties() {
    let properties =
        parse_properties(&strings(&["A=1", "B=x=y", "A=2", "C="])).expect("pairs are valid");
    assert_eq!(properties.get("A"), Some(&Value::from("2")));
    assert_eq!(properties.get("B"), Some(&Value::from("x=y")));
    assert_eq!(properties.get("C"), Some(&Value::from("")));

    assert!(parse_properties(&strings(&["novalue"])).is_err());
    assert!(parse_properties(&strings(&["=v"])).is_err());
}

#[test]
fn test_parse_code() {
    assert_eq!(parse_code("e1004").ok(), Some(ErrorCode::E1004));
    assert!(matches!(parse_code("E4242"), Err(CliError::UnknownCode(code)) if code == "E4242"));
}

#[test]
fn test_report_renders_source_snippet() {
    let text = "line\n${open";
    let error = crate::parse(text).expect_err("unterminated reference");
    let report = CliError::template("T.ft", text, error).report();
    assert!(report.starts_with("error[E0001]:"), "{report}");
    assert!(report.contains("--> T.ft:2:1"), "{report}");
    assert!(report.contains("2 | ${open"), "{report}");
}

#[test]
fn test_report_plain_errors() {
    let report = CliError::Usage("missing template file".to_owned()).report();
    assert_eq!(report, "error: missing template file\n");
}

#[test]
fn test_missing_file() {
    let error = read_file(Path::new("/definitely/not/here.ft")).expect_err("file is missing");
    assert!(matches!(error, CliError::Io { message } if message.starts_with("cannot find file")));
}
