mod copy;
mod document;
mod equal;
mod error;
mod handle;
mod json;
mod map;
mod node;
mod shape;
mod types;
mod value;

/// Deep copy entry points and options.
pub use copy::{CopyOptions, copy, copy_node, copy_with, try_copy};
/// Input document loading and compression detection.
pub use document::{Compression, JsonDocument, ZSTD_MAGIC, decode_bytes};
/// Structural deep equality.
pub use equal::{deep_equal, deep_equal_values};
/// Error and result aliases.
pub use error::{ReflectError, Result};
/// Shared function and channel handles.
pub use handle::{ChanHandle, FuncHandle};
/// JSON bridge types and entry points.
pub use json::{JsonTypes, from_json, to_json};
/// Map storage with Go-style key equality.
pub use map::{MapKey, MapValue};
/// Typed value handles.
pub use node::{Any, Node};
/// Shape classification.
pub use shape::Shape;
/// Runtime type descriptors.
pub use types::{Field, Kind, TypeDesc, TypeId, TypeTable};
/// Dynamic value tree.
pub use value::{Pointer, Value};
