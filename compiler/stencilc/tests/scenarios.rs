//! End-to-end scenarios: collect, merge and recognise through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;
use stencilc::{
    collect_attributes, DefaultProperties, EngineConfig, NoIncludes, PropertyMap, Template,
    TemplateEngine, TemplateRegistry, Value,
};

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|&(name, value)| (name.to_owned(), Value::from(value)))
        .collect()
}

fn names(text: &str, resolver: &dyn stencilc::TemplateResolver) -> Vec<String> {
    collect_attributes(text, &FxHashSet::default(), false, resolver)
        .expect("template parses")
        .into_iter()
        .collect()
}

#[test]
fn copyright_header() {
    let text = "Copyright (c) ${YEAR} by ${AUTHOR}.";
    assert_eq!(names(text, &NoIncludes), ["YEAR", "AUTHOR"]);

    let engine = TemplateEngine::new(&NoIncludes);
    let rendered = engine
        .merge(text, &props(&[("YEAR", "2024"), ("AUTHOR", "Ann")]))
        .expect("template renders");
    assert_eq!(rendered, "Copyright (c) 2024 by Ann.");

    let pattern = engine
        .derive_pattern(text, &["YEAR", "AUTHOR"])
        .expect("pattern compiles");
    assert_eq!(
        pattern.as_str(),
        r"(?s).*(Copyright \(c\) ([^\n]*) by ([^\n]*)\.).*"
    );
    let found = pattern
        .extract(&format!("// header\n{rendered}\nbody\n"))
        .expect("matching succeeds")
        .expect("header is present");
    assert_eq!(found.get("YEAR"), Some("2024"));
    assert_eq!(found.get("AUTHOR"), Some("Ann"));
}

#[test]
fn include_cycle_terminates() {
    let registry = TemplateRegistry::new()
        .with_include(Template::new("A", "", "$IN_A#parse(\"B\")"))
        .with_include(Template::new("B", "", "$IN_B#parse(\"A\")"));
    let a = registry.include("A").expect("registered");
    assert_eq!(names(&a.text, &registry), ["IN_A", "IN_B"]);
}

#[test]
fn escaping_through_merge() {
    let engine = TemplateEngine::new(&NoIncludes);
    let empty = PropertyMap::default();
    assert_eq!(engine.merge("\\$X", &empty).expect("renders"), "$X");
    assert_eq!(
        engine.merge("\\$X", &props(&[("X", "defined")])).expect("renders"),
        "$X"
    );
    assert_eq!(
        engine.merge("\\\\$X", &props(&[("X", "1")])).expect("renders"),
        "\\1"
    );
}

#[test]
fn repeated_placeholder() {
    let engine = TemplateEngine::new(&NoIncludes);
    let rendered = engine
        .merge("${X}-${X}", &props(&[("X", "abc")]))
        .expect("renders");
    assert_eq!(rendered, "abc-abc");

    let pattern = engine.derive_pattern("${X}-${X}", &["X"]).expect("pattern compiles");
    assert!(pattern.match_instance(&rendered).expect("matching succeeds").is_some());
    assert!(pattern.match_instance("abc-xyz").expect("matching succeeds").is_none());
}

#[test]
fn shell_script_template_keeps_its_variables() {
    let text = "#!/bin/sh\n# Created by ${USER}\necho \"\\$HOME/\\${TARGET}\"\n";
    let engine = TemplateEngine::new(&NoIncludes).with_config(
        EngineConfig::default()
            .with_default_properties(DefaultProperties::default().with_property("USER", "ann")),
    );
    assert_eq!(
        engine.merge(text, &PropertyMap::default()).expect("renders"),
        "#!/bin/sh\n# Created by ann\necho \"$HOME/${TARGET}\"\n"
    );
    assert_eq!(names(text, &NoIncludes), ["USER"]);
}

#[test]
fn class_template_with_header_include() {
    let registry = TemplateRegistry::new()
        .with_include(Template::new(
            "File Header",
            "java",
            "/**\n * Created by ${USER} on ${DATE}.\n */",
        ))
        .with_document(Template::new(
            "Class",
            "java",
            "#if (${PACKAGE_NAME} && ${PACKAGE_NAME} != \"\")package ${PACKAGE_NAME};#end\n\
             #parse(\"File Header.java\")\n\
             public class ${NAME} {\n}\n",
        ));
    let class = registry.document("Class").expect("registered");
    assert_eq!(names(&class.text, &registry), ["PACKAGE_NAME", "USER", "DATE", "NAME"]);

    let engine = TemplateEngine::new(&registry).with_config(
        EngineConfig::default().with_default_properties(
            DefaultProperties::default()
                .with_property("USER", "ann")
                .with_property("DATE", "3/7/24"),
        ),
    );
    let merged = engine
        .merge_template(class, &props(&[("NAME", "Foo"), ("PACKAGE_NAME", "com.acme")]))
        .expect("renders");
    let expected = "package com.acme;\n/**\n * Created by ann on 3/7/24.\n */\npublic class Foo {\n}\n";
    assert_eq!(merged.text, expected);

    let header = registry.include("File Header.java").expect("registered");
    let found = engine
        .header_pattern(header)
        .expect("pattern compiles")
        .extract(&merged.text)
        .expect("matching succeeds")
        .expect("header is present");
    assert_eq!(found.get("USER"), Some("ann"));
    assert_eq!(found.get("DATE"), Some("3/7/24"));
}
