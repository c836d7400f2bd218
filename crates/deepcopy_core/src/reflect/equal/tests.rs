mod deep_equality {

	use crate::reflect::{Any, ChanHandle, FuncHandle, MapValue, Node, TypeId, Value, deep_equal, deep_equal_values};

	#[test]
	fn nil_handles_and_types() {
		let int = Any::new(Node::from_parts(TypeId::INT, Value::I64(1)));
		let int64 = Any::new(Node::from_parts(TypeId::INT64, Value::I64(1)));

		assert!(deep_equal(&Any::nil(), &Any::nil()));
		assert!(!deep_equal(&Any::nil(), &int));
		assert!(!deep_equal(&int, &int64), "same payload under different types");
		assert!(deep_equal(&int, &int.clone()));
	}

	#[test]
	fn nil_and_empty_collections_differ() {
		assert!(!deep_equal_values(&Value::Slice(None), &Value::slice(Vec::new())));
		assert!(!deep_equal_values(&Value::Map(None), &Value::map(MapValue::new())));
		assert!(deep_equal_values(&Value::Slice(None), &Value::Slice(None)));
		assert!(deep_equal_values(&Value::map(MapValue::new()), &Value::map(MapValue::new())));
	}

	#[test]
	fn pointers_compare_pointees() {
		let a = Value::ptr(Value::string("x"));
		let b = Value::ptr(Value::string("x"));
		let c = Value::ptr(Value::string("y"));

		assert!(deep_equal_values(&a, &a.clone()));
		assert!(deep_equal_values(&a, &b));
		assert!(!deep_equal_values(&a, &c));
		assert!(!deep_equal_values(&a, &Value::Ptr(None)));
	}

	#[test]
	fn functions_equal_only_when_nil() {
		let func = FuncHandle::new(|_: &[Node]| Vec::new());

		assert!(deep_equal_values(&Value::Func(None), &Value::Func(None)));
		assert!(!deep_equal_values(&Value::Func(Some(func.clone())), &Value::Func(Some(func))));
	}

	#[test]
	fn channels_compare_by_identity() {
		let chan = ChanHandle::new(1);

		assert!(deep_equal_values(&Value::Chan(Some(chan.clone())), &Value::Chan(Some(chan))));
		assert!(!deep_equal_values(&Value::Chan(Some(ChanHandle::new(1))), &Value::Chan(Some(ChanHandle::new(1)))));
	}

	#[test]
	fn nan_is_not_equal_to_itself() {
		assert!(!deep_equal_values(&Value::F64(f64::NAN), &Value::F64(f64::NAN)));
		assert!(deep_equal_values(&Value::F64(-0.0), &Value::F64(0.0)));
	}

	#[test]
	fn maps_compare_entries() {
		let mut a = MapValue::new();
		a.insert(Value::string("k"), Value::slice(vec![Value::I64(1)])).expect("insert");
		let mut b = MapValue::new();
		b.insert(Value::string("k"), Value::slice(vec![Value::I64(1)])).expect("insert");
		let mut c = MapValue::new();
		c.insert(Value::string("other"), Value::slice(vec![Value::I64(1)])).expect("insert");

		assert!(deep_equal_values(&Value::map(a.clone()), &Value::map(b)));
		assert!(!deep_equal_values(&Value::map(a), &Value::map(c)));
	}

	#[test]
	fn boxes_compare_concrete_type() {
		let int = Value::boxed(Node::from_parts(TypeId::INT, Value::I64(2)));
		let uint = Value::boxed(Node::from_parts(TypeId::INT8, Value::I64(2)));

		assert!(deep_equal_values(&int, &int.clone()));
		assert!(!deep_equal_values(&int, &uint));
		assert!(!deep_equal_values(&int, &Value::Interface(None)));
	}
}
