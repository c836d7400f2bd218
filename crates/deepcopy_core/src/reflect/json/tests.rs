mod decode {

	use serde_json::json;

	use crate::reflect::{JsonTypes, TypeId, TypeTable, Value, from_json};

	#[test]
	fn objects_arrays_and_numbers() {
		let mut types = TypeTable::new();
		let json_types = JsonTypes::register(&mut types).expect("register");

		assert_eq!(types.type_name(json_types.object), "map[string]interface {}");
		assert_eq!(types.type_name(json_types.array), "[]interface {}");

		let value = from_json(&json_types, &json!({"n": 3, "list": [true, null, "x"]})).expect("decode");
		assert_eq!(value.ty(), Some(json_types.object));

		let map = value.value().and_then(Value::as_map).expect("object map");
		let n = map.get(&Value::string("n")).and_then(Value::as_boxed).expect("boxed number");
		assert_eq!(n.ty(), TypeId::FLOAT64);
		assert!(matches!(n.value(), Value::F64(v) if *v == 3.0));

		let list = map.get(&Value::string("list")).and_then(Value::as_boxed).expect("boxed list");
		assert_eq!(list.ty(), json_types.array);
		let items = list.value().items().expect("items");
		assert_eq!(items.len(), 3);
		assert!(matches!(items[1], Value::Interface(None)), "nested null is an empty box");
	}

	#[test]
	fn root_null_is_nil_handle() {
		let mut types = TypeTable::new();
		let json_types = JsonTypes::register(&mut types).expect("register");

		assert!(from_json(&json_types, &serde_json::Value::Null).expect("decode").is_nil());
		assert_eq!(JsonTypes::register(&mut types).expect("register again"), json_types);
	}
}

mod encode {

	use chrono::{TimeZone, Utc};
	use serde_json::json;

	use crate::reflect::{
		Any, ChanHandle, Field, JsonTypes, MapValue, Node, ReflectError, TypeId, TypeTable, Value, copy, from_json, to_json,
	};

	#[test]
	fn decoded_documents_round_trip_through_copy() {
		let mut types = TypeTable::new();
		let json_types = JsonTypes::register(&mut types).expect("register");
		let doc = json!({"name": "gopher", "tags": ["a", "b"], "nested": {"deep": [1.5, null]}, "none": null});

		let value = from_json(&json_types, &doc).expect("decode");
		let copied = copy(&types, &value);
		assert_eq!(to_json(&types, &copied).expect("encode"), doc);
	}

	#[test]
	fn records_write_exported_fields_only() {
		let mut types = TypeTable::new();
		let ptr_int = types.ptr_to(TypeId::INT).expect("ptr");
		let by_id = types.map_of(TypeId::INT, TypeId::STRING).expect("map");
		let record = types
			.structure(
				"main.Doc",
				vec![
					Field::exported("Title", TypeId::STRING),
					Field::unexported("secret", TypeId::STRING),
					Field::exported("Count", ptr_int),
					Field::exported("When", TypeId::TIME),
					Field::exported("Names", by_id),
					Field::exported("Empty", ptr_int),
				],
			)
			.expect("record");

		let mut names = MapValue::new();
		names.insert(Value::I64(7), Value::string("seven")).expect("insert");
		let when = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid instant");
		let value = Value::Struct(vec![
			Value::string("doc"),
			Value::string("hidden"),
			Value::ptr(Value::I64(2)),
			Value::Time(when),
			Value::map(names),
			Value::Ptr(None),
		]);
		let node = Node::new(&types, record, value).expect("node");

		let json = to_json(&types, &Any::new(node)).expect("encode");
		assert_eq!(
			json,
			json!({"Title": "doc", "Count": 2, "When": "2024-01-02T03:04:05Z", "Names": {"7": "seven"}, "Empty": null})
		);
	}

	#[test]
	fn floats_follow_go_formatting() {
		let types = TypeTable::new();
		let encode = |ty, value| to_json(&types, &Any::new(Node::from_parts(ty, value))).expect("encode");

		assert_eq!(encode(TypeId::FLOAT32, Value::F32(0.1)), json!(0.1));
		assert_eq!(encode(TypeId::FLOAT64, Value::F64(100.0)), json!(100));
		assert_eq!(encode(TypeId::FLOAT64, Value::F64(2.5)), json!(2.5));

		let neg = encode(TypeId::FLOAT64, Value::F64(-0.0));
		assert!(neg.as_f64().is_some_and(|v| v == 0.0 && v.is_sign_negative()), "negative zero keeps its sign: {neg}");
	}

	#[test]
	fn unencodable_values_are_reported() {
		let mut types = TypeTable::new();
		let chan = types.chan_of(TypeId::INT).expect("chan");

		let cases = [
			Node::from_parts(chan, Value::Chan(Some(ChanHandle::new(1)))),
			Node::from_parts(TypeId::COMPLEX128, Value::Complex(1.0, 2.0)),
			Node::from_parts(TypeId::UNSAFE_POINTER, Value::Addr(1)),
			Node::from_parts(TypeId::FLOAT64, Value::F64(f64::NAN)),
		];
		for node in cases {
			let err = to_json(&types, &Any::new(node)).expect_err("no json encoding");
			assert!(matches!(err, ReflectError::JsonUnsupported { .. }), "unexpected error: {err}");
		}

		assert_eq!(to_json(&types, &Any::nil()).expect("nil"), serde_json::Value::Null);
	}
}
