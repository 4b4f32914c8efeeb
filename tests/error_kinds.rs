//! Each failure kind surfaces as a distinct, inspectable error

mod common;

use common::{SHOPPING, shopping};
use rstest::rstest;
use std::io::Cursor;
use xmlpath::error::QueryError;
use xmlpath::model::CoercionError;
use xmlpath::{
    AcquisitionError, CompatibilityMode, EvaluationError, ParseError, XmlPath, XmlPathConfig,
    XmlPathError,
};

#[rstest]
#[case("<a><b></a>")]
#[case("")]
#[case("<a>unterminated")]
#[case("no markup at all")]
fn test_malformed_documents_fail_acquisition(#[case] text: &str) {
    let err = XmlPath::new(text).unwrap_err();
    assert!(err.is_acquisition_failure(), "{err}");
    assert!(err.to_string().starts_with("failed to parse the XML document"));
}

#[test]
fn test_missing_file_fails_acquisition() {
    let err = XmlPath::from_file("does/not/exist.xml", XmlPathConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        XmlPathError::Acquisition(AcquisitionError::Io { .. })
    ));
}

#[test]
fn test_remote_uris_are_not_fetched() {
    let err = XmlPath::from_uri("https://example.com/doc.xml", XmlPathConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        XmlPathError::Acquisition(AcquisitionError::UnsupportedUri { ref scheme }) if scheme == "https"
    ));
}

#[test]
fn test_file_uri_and_reader_sources() {
    let path = std::env::temp_dir().join(format!("xmlpath-uri-{}.xml", std::process::id()));
    std::fs::write(&path, SHOPPING).unwrap();
    let uri = url::Url::from_file_path(&path).unwrap();

    let from_uri = XmlPath::from_uri(uri.as_str(), XmlPathConfig::default()).unwrap();
    let from_file = XmlPath::from_file(&path, XmlPathConfig::default()).unwrap();
    let from_reader =
        XmlPath::from_reader(Cursor::new(SHOPPING.as_bytes()), XmlPathConfig::default()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(from_uri.get_root(), shopping().get_root());
    assert_eq!(from_file.get_root(), shopping().get_root());
    assert_eq!(from_reader.get_root(), shopping().get_root());
}

#[test]
fn test_byte_order_mark_is_skipped() {
    let bytes = b"\xEF\xBB\xBF<a><b>1</b></a>";
    let xml = XmlPath::from_bytes(bytes, XmlPathConfig::default()).unwrap();
    assert_eq!(xml.get_int("a.b").unwrap(), 1);

    let err = XmlPath::from_bytes(b"<a>\xFF</a>", XmlPathConfig::default()).unwrap_err();
    assert!(err.is_acquisition_failure());
}

#[test]
fn test_depth_limit() {
    let deep = "<a>".repeat(20) + &"</a>".repeat(20);
    let config = XmlPathConfig::default().with_max_depth(10);
    let err = XmlPath::with_config(&deep, config).unwrap_err();
    assert!(matches!(
        err,
        XmlPathError::Acquisition(AcquisitionError::TooDeep { max_depth: 10 })
    ));
    assert!(XmlPath::with_config(&deep, XmlPathConfig::default()).is_ok());
}

#[rstest]
#[case("shopping.category[", "unbalanced")]
#[case("shopping.category[-1]", "negative")]
#[case("shopping.size(1)", "arguments")]
#[case("shopping.category.find { }", "closure")]
#[case("shopping.category.find { it.@type }", "predicate")]
#[case("shopping..category", "unexpected")]
#[case("shopping.'category", "string")]
fn test_malformed_paths_fail_parsing(#[case] path: &str, #[case] _kind: &str) {
    let xml = shopping();
    let err = xml.get_value(path).unwrap_err();
    assert!(err.is_parse_failure(), "{path}: {err}");
    assert!(err.to_string().contains(path), "{err}");

    // the facade is still usable afterwards
    assert_eq!(xml.get_int("shopping.category.size()").unwrap(), 3);
}

#[test]
fn test_parse_error_details() {
    let err = shopping().get_value("shopping.size(1)").unwrap_err();
    match err {
        XmlPathError::Parse {
            source: ParseError::FunctionArguments { ref name, .. },
            ..
        } => assert_eq!(name, "size"),
        other => panic!("unexpected error: {other}"),
    }
}

fn evaluation_error(err: XmlPathError) -> EvaluationError {
    match err {
        XmlPathError::Query {
            source: QueryError::Evaluation(e),
            ..
        } => e,
        other => panic!("expected an evaluation failure, got {other}"),
    }
}

fn coercion_error(err: XmlPathError) -> CoercionError {
    match err {
        XmlPathError::Query {
            source: QueryError::Coercion(e),
            ..
        } => e,
        other => panic!("expected a coercion failure, got {other}"),
    }
}

#[test]
fn test_evaluation_failures() {
    let xml = shopping();

    assert_eq!(
        evaluation_error(xml.get_value("shopping.category[3]").unwrap_err()),
        EvaluationError::IndexOutOfBounds { index: 3, size: 3 }
    );
    assert_eq!(
        evaluation_error(xml.get_value("shopping.missing[0]").unwrap_err()),
        EvaluationError::IndexOutOfBounds { index: 0, size: 0 }
    );
    assert!(matches!(
        evaluation_error(xml.get_value("shopping.category[0].@type[0]").unwrap_err()),
        EvaluationError::InvalidIndexTarget { .. }
    ));
    assert_eq!(
        evaluation_error(xml.get_value("shopping.frobnicate()").unwrap_err()),
        EvaluationError::UnknownFunction {
            name: "frobnicate".to_string()
        }
    );
    assert_eq!(
        evaluation_error(
            xml.get_value("shopping.category.item.findAll { it.name > 3 }")
                .unwrap_err()
        ),
        EvaluationError::NonNumeric {
            value: "Chocolate".to_string()
        }
    );
    assert!(matches!(
        evaluation_error(xml.get_value("shopping.category[0].@type.item").unwrap_err()),
        EvaluationError::InvalidNavigation { .. }
    ));
    assert!(matches!(
        evaluation_error(
            xml.get_value("shopping.category.findAll { it.@type ==~ '[' }")
                .unwrap_err()
        ),
        EvaluationError::InvalidPattern { .. }
    ));
    assert!(matches!(
        evaluation_error(xml.get_value("shopping.category.item.name.toInteger()").unwrap_err()),
        EvaluationError::Function(_)
    ));
}

#[test]
fn test_coercion_failures() {
    let xml = shopping();

    assert!(matches!(
        coercion_error(xml.get_int("shopping.category.item.price").unwrap_err()),
        CoercionError::MultipleItems { count: 5, .. }
    ));
    assert!(matches!(
        coercion_error(xml.get_int("shopping.missing").unwrap_err()),
        CoercionError::EmptyValue { .. }
    ));
    assert!(matches!(
        coercion_error(xml.get_int("shopping.category[0].item[0].name").unwrap_err()),
        CoercionError::InvalidFormat { .. }
    ));
    assert!(matches!(
        coercion_error(xml.get_byte("shopping.category[2].item.price").unwrap_err()),
        CoercionError::OutOfRange { .. }
    ));
    assert!(matches!(
        coercion_error(xml.get_int("shopping.category[1].item[1].price").unwrap_err()),
        CoercionError::InvalidFormat { .. }
    ));
    assert!(
        xml.get_node("shopping.category.@type")
            .unwrap_err()
            .is_coercion_failure()
    );
    assert!(
        xml.get_char("shopping.category[0].@type")
            .unwrap_err()
            .is_coercion_failure()
    );
}

#[test]
fn test_strict_mode_name_reported_in_message() {
    let err = XmlPath::with_mode(CompatibilityMode::Xml, "<a><b></a>").unwrap_err();
    assert!(err.to_string().contains("XML"), "{err}");
}
