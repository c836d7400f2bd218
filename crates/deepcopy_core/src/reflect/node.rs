use crate::reflect::{Result, TypeId, TypeTable, Value};

/// A value paired with its runtime type.
#[derive(Debug, Clone)]
pub struct Node {
	ty: TypeId,
	value: Value,
}

impl Node {
	/// Build a node after checking that `value` conforms to `ty`.
	pub fn new(types: &TypeTable, ty: TypeId, value: Value) -> Result<Self> {
		types.check(ty, &value)?;
		Ok(Self { ty, value })
	}

	/// Build a node without a conformance check.
	pub fn from_parts(ty: TypeId, value: Value) -> Self {
		Self { ty, value }
	}

	/// Runtime type.
	pub fn ty(&self) -> TypeId {
		self.ty
	}

	/// Payload.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Mutable payload. The caller keeps it conforming to [`Node::ty`].
	pub fn value_mut(&mut self) -> &mut Value {
		&mut self.value
	}
}

/// Universal handle to a value of any type, or to nothing.
///
/// The nil handle is what a caller passes when it has no value at all; copying
/// it is an error rather than a no-op.
#[derive(Debug, Clone, Default)]
pub struct Any(Option<Node>);

impl Any {
	/// Handle carrying no value.
	pub fn nil() -> Self {
		Self(None)
	}

	/// Handle carrying `node`.
	pub fn new(node: Node) -> Self {
		Self(Some(node))
	}

	/// Whether no value is carried.
	pub fn is_nil(&self) -> bool {
		self.0.is_none()
	}

	/// Carried node.
	pub fn node(&self) -> Option<&Node> {
		self.0.as_ref()
	}

	/// Runtime type of the carried node.
	pub fn ty(&self) -> Option<TypeId> {
		self.0.as_ref().map(Node::ty)
	}

	/// Payload of the carried node.
	pub fn value(&self) -> Option<&Value> {
		self.0.as_ref().map(Node::value)
	}

	/// Take the carried node.
	pub fn into_node(self) -> Option<Node> {
		self.0
	}
}

impl From<Node> for Any {
	fn from(node: Node) -> Self {
		Self::new(node)
	}
}
