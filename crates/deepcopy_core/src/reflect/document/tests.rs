mod fixtures_documents {

	use deepcopy_testkit::fixture_path;

	use crate::reflect::{Compression, JsonDocument, TypeTable, to_json};

	#[test]
	fn raw_fixture_opens() {
		let doc = JsonDocument::open(fixture_path("nested.json")).expect("fixture opens");
		assert_eq!(doc.compression, Compression::None);
		assert!(doc.json.is_object());
	}

	#[test]
	fn compressed_fixture_matches_raw() {
		let raw = JsonDocument::open(fixture_path("nested.json")).expect("raw fixture opens");
		let packed = JsonDocument::open(fixture_path("nested.json.zst")).expect("zstd fixture opens");

		assert_eq!(packed.compression, Compression::Zstd);
		assert_eq!(packed.json, raw.json);
	}

	#[test]
	fn document_decodes_into_values() {
		let doc = JsonDocument::open(fixture_path("nested.json")).expect("fixture opens");
		let mut types = TypeTable::new();
		let (json_types, value) = doc.to_value(&mut types).expect("decode");

		assert_eq!(value.ty(), Some(json_types.object));
		assert_eq!(to_json(&types, &value).expect("encode"), doc.json);
	}
}

mod compression {

	use crate::reflect::{Compression, JsonDocument, ReflectError, ZSTD_MAGIC, decode_bytes};

	#[test]
	fn zstd_frames_are_detected() {
		let packed = zstd::encode_all(&br#"{"a":[1,2,3]}"#[..], 3).expect("compress");
		assert!(packed.starts_with(&ZSTD_MAGIC));

		let (mode, bytes) = decode_bytes(packed).expect("decode");
		assert_eq!(mode, Compression::Zstd);
		assert_eq!(mode.as_str(), "zstd");
		assert_eq!(bytes, br#"{"a":[1,2,3]}"#);
	}

	#[test]
	fn plain_bytes_pass_through() {
		let doc = JsonDocument::from_bytes(b"[null]".to_vec()).expect("parse");
		assert_eq!(doc.compression, Compression::None);
		assert_eq!(doc.json, serde_json::json!([null]));
	}

	#[test]
	fn malformed_json_is_reported() {
		let err = JsonDocument::from_bytes(b"{\"a\":".to_vec()).expect_err("truncated json");
		assert!(matches!(err, ReflectError::Json(_)));
	}
}
