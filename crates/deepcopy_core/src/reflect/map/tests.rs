mod key_equality {

	use crate::reflect::{ChanHandle, FuncHandle, MapKey, MapValue, Node, Pointer, ReflectError, TypeId, Value};

	#[test]
	fn string_keys_replace_on_insert() {
		let mut map = MapValue::new();

		assert!(map.insert(Value::string("a"), Value::I64(1)).expect("insert").is_none());
		let old = map.insert(Value::string("a"), Value::I64(2)).expect("insert");

		assert!(matches!(old, Some(Value::I64(1))));
		assert_eq!(map.len(), 1);
		assert!(matches!(map.get(&Value::string("a")), Some(Value::I64(2))));
		assert!(map.get(&Value::string("b")).is_none());
	}

	#[test]
	fn negative_zero_matches_positive_zero() {
		let mut map = MapValue::new();
		map.insert(Value::F64(0.0), Value::string("zero")).expect("insert");

		assert!(map.get(&Value::F64(-0.0)).is_some());
		assert_eq!(MapKey::new(Value::F32(-0.0)).expect("key"), MapKey::new(Value::F32(0.0)).expect("key"));
	}

	#[test]
	fn pointer_keys_compare_by_identity() {
		let a = Pointer::new(Value::I64(1));
		let b = Pointer::new(Value::I64(1));

		let mut map = MapValue::new();
		map.insert(Value::Ptr(Some(a.clone())), Value::string("a")).expect("insert");
		map.insert(Value::Ptr(Some(b.clone())), Value::string("b")).expect("insert");

		assert_eq!(map.len(), 2, "equal pointees do not merge keys");
		assert_eq!(map.get(&Value::Ptr(Some(a))).and_then(Value::as_str), Some("a"));
		assert_eq!(map.get(&Value::Ptr(Some(b))).and_then(Value::as_str), Some("b"));
	}

	#[test]
	fn channel_keys_compare_by_identity() {
		let chan = ChanHandle::new(1);
		let alias = chan.clone();

		assert_eq!(MapKey::new(Value::Chan(Some(chan.clone()))).expect("key"), MapKey::new(Value::Chan(Some(alias))).expect("key"));
		assert_ne!(MapKey::new(Value::Chan(Some(chan))).expect("key"), MapKey::new(Value::Chan(Some(ChanHandle::new(1)))).expect("key"));
	}

	#[test]
	fn record_keys_compare_field_by_field() {
		let mut map = MapValue::new();
		let key = |x: i64, y: i64| Value::Struct(vec![Value::I64(x), Value::I64(y)]);

		map.insert(key(1, 2), Value::Bool(true)).expect("insert");
		map.insert(key(1, 2), Value::Bool(false)).expect("insert");
		map.insert(key(2, 1), Value::Bool(true)).expect("insert");

		assert_eq!(map.len(), 2);
		assert!(matches!(map.get(&key(1, 2)), Some(Value::Bool(false))));
	}

	#[test]
	fn interface_keys_include_the_concrete_type() {
		let as_int = Value::boxed(Node::from_parts(TypeId::INT, Value::I64(7)));
		let as_int64 = Value::boxed(Node::from_parts(TypeId::INT64, Value::I64(7)));

		let mut map = MapValue::new();
		map.insert(as_int.clone(), Value::string("int")).expect("insert");
		map.insert(as_int64, Value::string("int64")).expect("insert");
		map.insert(Value::Interface(None), Value::string("nil")).expect("insert");

		assert_eq!(map.len(), 3);
		assert_eq!(map.get(&as_int).and_then(Value::as_str), Some("int"));
		assert_eq!(map.get(&Value::Interface(None)).and_then(Value::as_str), Some("nil"));
	}

	#[test]
	fn non_comparable_keys_are_rejected() {
		let mut map = MapValue::new();

		let err = map.insert(Value::slice(Vec::new()), Value::I64(1)).expect_err("slice key");
		assert!(matches!(err, ReflectError::NotComparable { .. }));

		assert!(map.insert(Value::Map(None), Value::I64(1)).is_err());
		assert!(map.insert(Value::Func(Some(FuncHandle::new(|_: &[Node]| Vec::new()))), Value::I64(1)).is_err());

		let boxed_slice = Value::boxed(Node::from_parts(TypeId::ANY, Value::Slice(None)));
		assert!(map.insert(boxed_slice, Value::I64(1)).is_err(), "box holding a slice");
		assert!(map.is_empty());
	}

	#[test]
	fn remove_and_mutate_entries() {
		let mut map = MapValue::new();
		map.insert(Value::U64(1), Value::I64(10)).expect("insert");
		map.insert(Value::U64(2), Value::I64(20)).expect("insert");

		if let Some(value) = map.get_mut(&Value::U64(1)) {
			*value = Value::I64(11);
		}
		for (_, value) in map.iter_mut() {
			if let Value::I64(n) = value {
				*n += 1;
			}
		}

		assert!(matches!(map.remove(&Value::U64(1)), Some(Value::I64(12))));
		assert!(map.remove(&Value::U64(1)).is_none());
		assert!(matches!(map.get(&Value::U64(2)), Some(Value::I64(21))));
	}
}
