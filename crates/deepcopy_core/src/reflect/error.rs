use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Errors produced while building types, copying values, and bridging documents.
#[derive(Debug, Error)]
pub enum ReflectError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON syntax or encoding failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Generic handle carried no value.
	#[error("invalid value")]
	InvalidValue,
	/// Value kind has no duplication semantics.
	#[error("unsupported type: {type_name} (kind={kind})")]
	UnsupportedShape {
		/// Rendered type name.
		type_name: String,
		/// Kind label of the rejected type.
		kind: &'static str,
	},
	/// Copy recursion depth exceeded configured limit.
	#[error("copy depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Value variant does not match the kind of its declared type.
	#[error("value does not conform to {type_name}: expected {expected}, got {got}")]
	KindMismatch {
		/// Rendered type name.
		type_name: String,
		/// Kind label required by the type.
		expected: &'static str,
		/// Kind label of the offending value.
		got: &'static str,
	},
	/// Array value length differs from its type's fixed length.
	#[error("array length mismatch for {type_name}: expected {expected}, got {got}")]
	ArrayLenMismatch {
		/// Rendered type name.
		type_name: String,
		/// Declared length.
		expected: usize,
		/// Actual element count.
		got: usize,
	},
	/// Record value field count differs from its type's field list.
	#[error("field count mismatch for {type_name}: expected {expected}, got {got}")]
	FieldCountMismatch {
		/// Rendered type name.
		type_name: String,
		/// Declared field count.
		expected: usize,
		/// Actual value count.
		got: usize,
	},
	/// Type id does not exist in the table.
	#[error("type index out of range: idx={idx}, max={max}")]
	TypeIndexOutOfRange {
		/// Offending index value.
		idx: u32,
		/// Maximum valid index.
		max: u32,
	},
	/// Named type registered twice.
	#[error("duplicate type name {name}")]
	DuplicateTypeName {
		/// Conflicting name.
		name: String,
	},
	/// Declared record type received a second definition.
	#[error("type already defined: {name}")]
	TypeAlreadyDefined {
		/// Record type name.
		name: String,
	},
	/// Declared record type was used before being defined.
	#[error("type declared but not defined: {name}")]
	TypeNotDefined {
		/// Record type name.
		name: String,
	},
	/// Record type contains itself by value.
	#[error("invalid recursive type {name}")]
	InvalidRecursiveType {
		/// Record type name.
		name: String,
	},
	/// Type or value cannot be used as a map key.
	#[error("not comparable: {type_name}")]
	NotComparable {
		/// Rendered type name or value kind.
		type_name: String,
	},
	/// Value has no JSON representation.
	#[error("json: unsupported {type_name}")]
	JsonUnsupported {
		/// Rendered type name or value description.
		type_name: String,
	},
	/// Copy verification found the copy diverging from its source.
	#[error("copy verification failed: {reason}")]
	VerifyFailed {
		/// Which check failed.
		reason: &'static str,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}
