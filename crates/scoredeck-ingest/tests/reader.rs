//! Integration tests for JSON file loading.

use scoredeck_ingest::read_json_file;
use scoredeck_model::ConvertError;

#[test]
fn reads_valid_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rating_list_response.json");
    std::fs::write(&path, r#"{"body": {"rating": {"leaders": [{"id": 1}]}}}"#)
        .expect("write fixture");

    let value = read_json_file(&path).expect("read json");
    assert_eq!(value["body"]["rating"]["leaders"][0]["id"], 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = read_json_file(&dir.path().join("absent.json")).expect_err("must fail");
    assert!(matches!(error, ConvertError::Io(_)));
}

#[test]
fn malformed_document_is_a_json_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"body\": ").expect("write fixture");

    let error = read_json_file(&path).expect_err("must fail");
    assert!(matches!(error, ConvertError::Json(_)));
}

#[test]
fn object_key_order_is_preserved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ordered.json");
    std::fs::write(&path, r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).expect("write fixture");

    let value = read_json_file(&path).expect("read json");
    let keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}
