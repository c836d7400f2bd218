use chrono::SecondsFormat;
use serde_json::{Map, Number, Value as Json};

use crate::reflect::{Any, Kind, MapValue, Node, ReflectError, Result, TypeId, TypeTable, Value};

const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Container types that decoded JSON documents are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonTypes {
	/// `map[string]interface {}`.
	pub object: TypeId,
	/// `[]interface {}`.
	pub array: TypeId,
}

impl JsonTypes {
	/// Intern the JSON container types in `types`.
	pub fn register(types: &mut TypeTable) -> Result<Self> {
		Ok(Self {
			object: types.map_of(TypeId::STRING, TypeId::ANY)?,
			array: types.slice_of(TypeId::ANY)?,
		})
	}
}

/// Decode JSON into dynamic values the way `encoding/json` fills an `interface{}`.
///
/// Objects become `map[string]interface {}`, arrays `[]interface {}`, numbers
/// `float64`. A root `null` yields the nil handle; nested nulls become empty boxes.
pub fn from_json(types: &JsonTypes, json: &Json) -> Result<Any> {
	Ok(match decode_node(types, json)? {
		Some(node) => Any::new(node),
		None => Any::nil(),
	})
}

/// Encode a value with `encoding/json` rules.
///
/// Only exported record fields are written. Nil pointers, boxes, slices and
/// maps encode as `null`; time instants as RFC 3339 strings; integer map keys
/// as decimal strings. Functions, channels, complex numbers, raw pointers and
/// non-finite floats have no encoding.
pub fn to_json(types: &TypeTable, value: &Any) -> Result<Json> {
	match value.node() {
		None => Ok(Json::Null),
		Some(node) => encode(types, node.ty(), node.value()),
	}
}

fn decode_node(types: &JsonTypes, json: &Json) -> Result<Option<Node>> {
	let node = match json {
		Json::Null => return Ok(None),
		Json::Bool(value) => Node::from_parts(TypeId::BOOL, Value::Bool(*value)),
		Json::Number(number) => {
			let value = number.as_f64().ok_or_else(|| ReflectError::JsonUnsupported {
				type_name: format!("number {number}"),
			})?;
			Node::from_parts(TypeId::FLOAT64, Value::F64(value))
		}
		Json::String(text) => Node::from_parts(TypeId::STRING, Value::string(text)),
		Json::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(boxed(decode_node(types, item)?));
			}
			Node::from_parts(types.array, Value::slice(out))
		}
		Json::Object(entries) => {
			let mut map = MapValue::with_capacity(entries.len());
			for (key, item) in entries {
				map.insert(Value::string(key), boxed(decode_node(types, item)?))?;
			}
			Node::from_parts(types.object, Value::map(map))
		}
	};
	Ok(Some(node))
}

fn boxed(node: Option<Node>) -> Value {
	Value::Interface(node.map(Box::new))
}

fn encode(types: &TypeTable, ty: TypeId, value: &Value) -> Result<Json> {
	let json = match (types.kind(ty)?, value) {
		(_, Value::Bool(value)) => Json::Bool(*value),
		(_, Value::I64(value)) => Json::from(*value),
		(_, Value::U64(value)) => Json::from(*value),
		(Kind::Uintptr, Value::Addr(value)) => Json::from(*value as u64),
		(_, Value::F32(value)) => encode_float(widen_f32(*value))?,
		(_, Value::F64(value)) => encode_float(*value)?,
		(_, Value::String(text)) => Json::String(text.to_string()),
		(_, Value::Time(value)) => Json::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
		(_, Value::Ptr(None) | Value::Interface(None) | Value::Slice(None) | Value::Map(None)) => Json::Null,
		(Kind::Ptr(elem), Value::Ptr(Some(ptr))) => ptr.with(|target| encode(types, *elem, target))?,
		(_, Value::Interface(Some(node))) => encode(types, node.ty(), node.value())?,
		(Kind::Array { elem, .. }, Value::Array(items)) | (Kind::Slice(elem), Value::Slice(Some(items))) => {
			Json::Array(items.iter().map(|item| encode(types, *elem, item)).collect::<Result<Vec<_>>>()?)
		}
		(Kind::Map { key, value: elem }, Value::Map(Some(map))) => {
			let mut out = Map::new();
			for (k, v) in map.iter() {
				out.insert(encode_key(types, *key, k)?, encode(types, *elem, v)?);
			}
			Json::Object(out)
		}
		(Kind::Struct(fields), Value::Struct(items)) => {
			let mut out = Map::new();
			for (field, item) in fields.iter().zip(items).filter(|(field, _)| field.exported) {
				out.insert(field.name.to_string(), encode(types, field.ty, item)?);
			}
			Json::Object(out)
		}
		_ => {
			return Err(ReflectError::JsonUnsupported {
				type_name: types.type_name(ty),
			});
		}
	};
	Ok(json)
}

fn encode_float(value: f64) -> Result<Json> {
	// integral floats print without a fraction, as `strconv.FormatFloat` does; -0 keeps its sign
	if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT_INT && !(value == 0.0 && value.is_sign_negative()) {
		return Ok(Json::from(value as i64));
	}
	Number::from_f64(value).map(Json::Number).ok_or_else(|| ReflectError::JsonUnsupported {
		type_name: format!("value {value}"),
	})
}

/// Widen through the shortest decimal form of `value`, so `0.1f32` encodes as `0.1`.
fn widen_f32(value: f32) -> f64 {
	value.to_string().parse().unwrap_or(f64::from(value))
}

fn encode_key(types: &TypeTable, ty: TypeId, key: &Value) -> Result<String> {
	match key {
		Value::String(text) => Ok(text.to_string()),
		Value::I64(value) => Ok(value.to_string()),
		Value::U64(value) => Ok(value.to_string()),
		_ => Err(ReflectError::JsonUnsupported {
			type_name: format!("map key {}", types.type_name(ty)),
		}),
	}
}

#[cfg(test)]
mod tests;
