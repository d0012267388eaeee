use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[test]
fn test_display() {
    assert_eq!(ErrorCode::E1004.to_string(), "E1004");
}

#[test]
fn test_from_code_round_trip() {
    for &code in ErrorCode::ALL {
        assert_eq!(ErrorCode::from_code(code.as_str()), Some(code));
    }
    assert_eq!(ErrorCode::from_code("e0001"), Some(ErrorCode::E0001));
    assert_eq!(ErrorCode::from_code("E4242"), None);
}

#[test]
fn test_no_duplicate_codes() {
    let unique: HashSet<_> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(unique.len(), ErrorCode::ALL.len());
}

#[test]
fn test_every_code_described() {
    for &code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code} has no description");
    }
}
