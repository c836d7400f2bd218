use std::io::Read;
use std::path::Path;

use crate::reflect::{Any, JsonTypes, ReflectError, Result, TypeTable, from_json};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic used by compressed documents.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

/// Parsed JSON document with the compression it was stored in.
#[derive(Debug, Clone)]
pub struct JsonDocument {
	/// Compression of the source bytes.
	pub compression: Compression,
	/// Parsed document.
	pub json: serde_json::Value,
}

impl JsonDocument {
	/// Read and parse a document from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = std::fs::read(path)?;
		Self::from_bytes(raw)
	}

	/// Parse a document from raw or zstd-compressed bytes.
	pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let json = serde_json::from_slice(&bytes)?;
		Ok(Self { compression, json })
	}

	/// Decode the document into dynamic values, registering the JSON container types.
	pub fn to_value(&self, types: &mut TypeTable) -> Result<(JsonTypes, Any)> {
		let json_types = JsonTypes::register(types)?;
		let value = from_json(&json_types, &self.json)?;
		Ok((json_types, value))
	}
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(ReflectError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

#[cfg(test)]
mod tests;
