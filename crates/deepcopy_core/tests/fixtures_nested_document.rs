#![allow(missing_docs)]

use deepcopy::reflect::{CopyOptions, JsonDocument, ReflectError, TypeTable, Value, copy_with, deep_equal, to_json, try_copy};
use deepcopy_testkit::{fixture_path, read_fixture_json};

#[test]
fn nested_fixture_copy_smoke() {
	assert_fixture_copy("nested.json");
}

#[test]
fn nested_zstd_fixture_copy_smoke() {
	assert_fixture_copy("nested.json.zst");
}

#[test]
fn nested_fixture_depth_limit() {
	let doc = JsonDocument::open(fixture_path("nested.json")).expect("fixture opens");
	let mut types = TypeTable::new();
	let (_, value) = doc.to_value(&mut types).expect("decode");

	copy_with(&types, &value, &CopyOptions::bounded(32)).expect("roomy limit");
	let err = copy_with(&types, &value, &CopyOptions::bounded(3)).expect_err("tight limit");
	assert!(matches!(err, ReflectError::DepthExceeded { max_depth: 3 }));
}

fn assert_fixture_copy(name: &str) {
	let doc = JsonDocument::open(fixture_path(name)).expect("fixture opens");
	let mut types = TypeTable::new();
	let (json_types, value) = doc.to_value(&mut types).expect("decode");
	let copied = try_copy(&types, &value).expect("copy succeeds");

	assert_eq!(copied.ty(), Some(json_types.object));
	assert!(deep_equal(&value, &copied));
	assert_eq!(to_json(&types, &copied).expect("encode"), read_fixture_json("nested.json"));

	let map = copied.value().and_then(Value::as_map).expect("object");
	let empty = map.get(&Value::string("empty_list")).and_then(Value::as_boxed).expect("empty_list");
	assert!(matches!(empty.value(), Value::Slice(Some(items)) if items.is_empty()), "empty array stays present");
	let nickname = map.get(&Value::string("nickname")).expect("nickname");
	assert!(matches!(nickname, Value::Interface(None)));
}
