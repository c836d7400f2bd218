use crate::reflect::{Any, Value};

/// Structural equality of two handles.
///
/// Both nil, or same type with deep-equal payloads. Mirrors
/// `reflect.DeepEqual`: nil and empty slices/maps differ, functions are equal
/// only when both are nil, pointers are equal when they address the same cell
/// or their pointees are deep-equal, `NaN` is unequal to itself.
pub fn deep_equal(a: &Any, b: &Any) -> bool {
	match (a.node(), b.node()) {
		(None, None) => true,
		(Some(a), Some(b)) => a.ty() == b.ty() && deep_equal_values(a.value(), b.value()),
		_ => false,
	}
}

/// Structural equality of two payloads already known to share a type.
pub fn deep_equal_values(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Bool(x), Value::Bool(y)) => x == y,
		(Value::I64(x), Value::I64(y)) => x == y,
		(Value::U64(x), Value::U64(y)) => x == y,
		(Value::F32(x), Value::F32(y)) => x == y,
		(Value::F64(x), Value::F64(y)) => x == y,
		(Value::Complex(xr, xi), Value::Complex(yr, yi)) => xr == yr && xi == yi,
		(Value::String(x), Value::String(y)) => x == y,
		(Value::Addr(x), Value::Addr(y)) => x == y,
		(Value::Time(x), Value::Time(y)) => x == y,
		(Value::Func(x), Value::Func(y)) => x.is_none() && y.is_none(),
		(Value::Chan(x), Value::Chan(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => x.same(y),
			_ => false,
		},
		(Value::Ptr(x), Value::Ptr(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => x.same(y) || x.with(|x| y.with(|y| deep_equal_values(x, y))),
			_ => false,
		},
		(Value::Interface(x), Value::Interface(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => x.ty() == y.ty() && deep_equal_values(x.value(), y.value()),
			_ => false,
		},
		(Value::Array(x), Value::Array(y)) | (Value::Struct(x), Value::Struct(y)) => items_equal(x, y),
		(Value::Slice(x), Value::Slice(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => items_equal(x, y),
			_ => false,
		},
		(Value::Map(x), Value::Map(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => {
				x.len() == y.len()
					&& x.iter().all(|(key, value)| match y.get(key) {
						Some(other) => deep_equal_values(value, other),
						None => false,
					})
			}
			_ => false,
		},
		_ => false,
	}
}

fn items_equal(x: &[Value], y: &[Value]) -> bool {
	x.len() == y.len() && x.iter().zip(y).all(|(x, y)| deep_equal_values(x, y))
}

#[cfg(test)]
mod tests;
