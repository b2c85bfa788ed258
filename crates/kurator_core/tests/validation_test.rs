//! Tests for input validation.

use kurator_core::{is_url, validate_platform_name, validate_title, validate_url};
use kurator_error::{KuratorErrorKind, ValidationErrorKind};

#[test]
fn test_url_shapes() {
    assert!(is_url("https://mangalib.me"));
    assert!(is_url("http://sub.domain.org/path?q=1"));
    assert!(is_url("https://манга.рф/title"));
    assert!(!is_url("ftp://example.com"));
    assert!(!is_url("https://localhost"));
    assert!(!is_url("example.com"));
}

#[test]
fn test_validate_url_trims() {
    assert_eq!(
        validate_url("  https://remanga.org/x  ").unwrap(),
        "https://remanga.org/x"
    );
}

#[test]
fn test_title_length() {
    assert!(validate_title(&"a".repeat(255)).is_ok());

    let err = validate_title(&"a".repeat(256)).unwrap_err();
    match err.kind() {
        KuratorErrorKind::Validation(e) => assert_eq!(
            e.kind,
            ValidationErrorKind::TooLong {
                field: "title",
                max: 255
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_platform_name_must_not_be_blank() {
    let err = validate_platform_name("   ").unwrap_err();
    assert!(matches!(err.kind(), KuratorErrorKind::Validation(_)));
    assert_eq!(validate_platform_name(" Remanga ").unwrap(), "Remanga");
}
