//! Integration tests for walking trees along structured paths.

use yamlgrab::document::node::{Kind, Value};
use yamlgrab::document::normalize::normalize;
use yamlgrab::document::parser::{parse_json, parse_yaml_documents};
use yamlgrab::yamlpath::{grab, grab_ref, GrabError, Node, Path, PathSegment};

fn json(text: &str) -> Value {
    parse_json(text, false).unwrap()
}

fn key(name: &str) -> PathSegment {
    PathSegment::key(name)
}

#[test]
fn test_empty_path_returns_root() {
    let root = json(r#"{"b": [1, 2], "a": {"c": true}}"#);
    let result = grab(&root, &Path::default()).unwrap();
    assert_eq!(result, normalize(&root));
}

#[test]
fn test_map_traversal() {
    let root = json(r#"{"a": {"b": 5}}"#);
    let result = grab(&root, &Path::new(vec![key("a"), key("b")])).unwrap();
    assert_eq!(result, Value::from(5));
}

#[test]
fn test_record_selection() {
    let root = json(r#"{"items": [{"name": "x", "v": 1}, {"name": "y", "v": 2}]}"#);
    let path = Path::new(vec![key("items"), PathSegment::record("name", "y"), key("v")]);
    assert_eq!(grab(&root, &path).unwrap(), Value::from(2));
}

#[test]
fn test_ambiguous_record() {
    let root = json(r#"{"items": [{"name": "x"}, {"name": "x"}]}"#);
    let path = Path::new(vec![key("items"), PathSegment::record("name", "x")]);

    match grab(&root, &path) {
        Err(GrabError::RecordAmbiguous {
            field,
            value,
            count,
            path,
        }) => {
            assert_eq!(field, "name");
            assert_eq!(value, "x");
            assert_eq!(count, 2);
            assert_eq!(path.to_string(), "/items");
        }
        other => panic!("Expected RecordAmbiguous, got {:?}", other),
    }
}

#[test]
fn test_record_not_found() {
    let root = json(r#"{"items": [{"name": "x"}, {"name": "y"}]}"#);
    let path = Path::new(vec![key("items"), PathSegment::record("name", "z")]);

    let err = grab(&root, &path).unwrap_err();
    assert!(matches!(err, GrabError::RecordNotFound { .. }));
    assert_eq!(err.to_string(), "there is no entry name=z in the list at /items");
}

#[test]
fn test_index_out_of_range() {
    let root = json(r#"{"items": [1, 2, 3]}"#);
    let path = Path::new(vec![key("items"), PathSegment::index(5)]);

    let err = grab(&root, &path).unwrap_err();
    assert!(matches!(
        err,
        GrabError::IndexOutOfRange {
            index: 5,
            len: 3,
            ..
        }
    ));
    assert!(err.to_string().contains("0..2"));
}

#[test]
fn test_index_into_empty_list() {
    let root = json(r#"{"items": []}"#);
    let path = Path::new(vec![key("items"), PathSegment::index(0)]);

    let err = grab(&root, &path).unwrap_err();
    assert!(err.to_string().contains("0..-1"));
}

#[test]
fn test_type_mismatch() {
    let root = json(r#"{"a": [1, 2]}"#);
    let path = Path::new(vec![key("a"), key("b")]);

    match grab(&root, &path) {
        Err(GrabError::TypeMismatch {
            expected,
            found,
            path,
        }) => {
            assert_eq!(expected, Kind::Mapping);
            assert_eq!(found, Kind::SimpleList);
            assert_eq!(path.to_string(), "/a");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_index_on_mapping_is_type_mismatch() {
    let root = json(r#"{"a": {"b": 1}}"#);
    let path = Path::new(vec![key("a"), PathSegment::index(0)]);

    match grab(&root, &path) {
        Err(GrabError::TypeMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, Kind::SimpleList);
            assert_eq!(found, Kind::Mapping);
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_key_not_found_names_key_and_path() {
    let root = json(r#"{"a": {"b": 1, "c": 2}}"#);
    let path = Path::new(vec![key("a"), key("d")]);

    match grab(&root, &path) {
        Err(GrabError::KeyNotFound {
            key,
            available,
            path,
        }) => {
            assert_eq!(key, "d");
            assert_eq!(available, vec!["b", "c"]);
            assert_eq!(path.to_string(), "/a");
        }
        other => panic!("Expected KeyNotFound, got {:?}", other),
    }
}

/// Records lacking the identifier field are skipped rather than rejected.
#[test]
fn test_record_without_identifier_field_does_not_match() {
    let root = json(r#"{"items": [{"v": 0}, {"name": "y", "v": 2}]}"#);

    let path = Path::new(vec![key("items"), PathSegment::record("name", "y"), key("v")]);
    assert_eq!(grab(&root, &path).unwrap(), Value::from(2));

    let path = Path::new(vec![key("items"), PathSegment::record("name", "x")]);
    assert!(matches!(
        grab(&root, &path),
        Err(GrabError::RecordNotFound { .. })
    ));
}

#[test]
fn test_record_match_on_numeric_identifier() {
    let docs = parse_yaml_documents("users:\n- id: 1\n  login: root\n- id: 2\n  login: ci\n").unwrap();
    let path = Path::new(vec![key("users"), PathSegment::record("id", "2"), key("login")]);
    assert_eq!(grab(&docs[0], &path).unwrap(), Value::from("ci"));
}

#[test]
fn test_first_failure_reports_document_index() {
    let docs = parse_yaml_documents("---\na: 1\n---\na: {b: [x]}\n").unwrap();
    let path = Path::new(vec![key("a"), key("b"), key("c")]).with_document(1);

    let err = grab(&docs[1], &path).unwrap_err();
    assert_eq!(err.path().to_string(), "#1/a/b");
    assert_eq!(
        err.to_string(),
        "failed to traverse tree, expected a mapping but found type simple list at #1/a/b"
    );
}

#[test]
fn test_grabbed_mappings_are_ordered() {
    let root = json(r#"{"outer": {"z": {"q": 1, "p": 2}, "a": [{"k": 1}]}}"#);
    let result = grab(&root, &Path::new(vec![key("outer")])).unwrap();

    match &result {
        Value::Mapping(map) => {
            assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "z"]);
            assert!(matches!(map["a"], Value::Records(_)));
            assert!(matches!(map["z"], Value::Mapping(_)));
        }
        other => panic!("Expected mapping, got {:?}", other),
    }
}

#[test]
fn test_grab_ref_borrows_source() {
    let root = json(r#"{"a": {"b": 5}}"#);
    let node = grab_ref(&root, &Path::new(vec![key("a")])).unwrap();

    match node {
        Node::Value(Value::Unordered(map)) => assert_eq!(map.len(), 1),
        other => panic!("Expected unnormalized mapping, got {:?}", other),
    }
}

#[test]
fn test_grab_does_not_mutate_input() {
    let root = json(r#"{"items": [{"name": "x"}]}"#);
    let before = root.clone();

    let path = Path::new(vec![key("items"), PathSegment::record("name", "x")]);
    grab(&root, &path).unwrap();

    assert_eq!(root, before);
}

#[test]
fn test_concurrent_grabs_share_one_tree() {
    let root = json(r#"{"items": [{"name": "x", "v": 1}, {"name": "y", "v": 2}]}"#);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["x", "y"]
            .into_iter()
            .map(|name| {
                let root = &root;
                scope.spawn(move || {
                    let path =
                        Path::new(vec![key("items"), PathSegment::record("name", name), key("v")]);
                    grab(root, &path).unwrap()
                })
            })
            .collect();

        let results: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![Value::from(1), Value::from(2)]);
    });
}

#[test]
fn test_record_match_on_unsigned_identifier_beyond_i64() {
    let root = json(r#"{"users": [{"id": 18446744073709551615, "login": "max"}, {"id": 1, "login": "one"}]}"#);
    let path = Path::new(vec![
        key("users"),
        PathSegment::record("id", "18446744073709551615"),
        key("login"),
    ]);
    assert_eq!(grab(&root, &path).unwrap(), Value::from("max"));
}

#[test]
fn test_record_match_on_whole_float() {
    let docs = parse_yaml_documents("versions:\n- v: 1.0\n  tag: a\n- v: 1.5\n  tag: b\n").unwrap();

    let path = Path::new(vec![key("versions"), PathSegment::record("v", "1.0"), key("tag")]);
    assert_eq!(grab(&docs[0], &path).unwrap(), Value::from("a"));

    let path = Path::new(vec![key("versions"), PathSegment::record("v", "1")]);
    assert!(matches!(
        grab(&docs[0], &path),
        Err(GrabError::RecordNotFound { .. })
    ));
}
