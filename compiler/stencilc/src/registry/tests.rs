use super::*;
use pretty_assertions::assert_eq;

fn registry() -> TemplateRegistry {
    TemplateRegistry::new()
        .with_document(Template::new("Header", "java", "document header"))
        .with_include(Template::new("Header", "java", "include header"))
        .with_include(Template::new("License", "", "license"))
}

#[test]
fn test_documents_win_over_includes() {
    let registry = registry();
    let found = registry.resolve("Header.java").map(|t| t.text.as_str());
    assert_eq!(found, Some("document header"));
    assert_eq!(
        registry.include("Header.java").map(|t| t.text.as_str()),
        Some("include header")
    );
}

#[test]
fn test_bare_and_qualified_names() {
    let registry = registry();
    assert!(registry.resolve("Header").is_some());
    assert!(registry.resolve("Header.java").is_some());
    assert!(registry.resolve("Header.kt").is_none());
    assert_eq!(
        registry.resolve("License").map(|t| t.text.as_str()),
        Some("license")
    );
    assert!(registry.resolve("Missing").is_none());
}

#[test]
fn test_len() {
    assert!(TemplateRegistry::new().is_empty());
    assert_eq!(registry().len(), 3);
    assert_eq!(registry().documents().len(), 1);
    assert_eq!(registry().includes().len(), 2);
}
