// Copyright 2019-2021 Parity Technologies (UK) Ltd.
// This file is part of substrate-desub.
//
// substrate-desub is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. //
// substrate-desub is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with substrate-desub.  If not, see <http://www.gnu.org/licenses/>.


use crate::Error;
use codec::{Decode, Encode};
use desub_call_types::util::decode_hex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::{convert::TryFrom, fmt};

/// Identifies a function of the runtime: the index of its module (section)
/// followed by the index of the function within that module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct CallIndex([u8; 2]);

impl CallIndex {
	pub const fn new(section: u8, method: u8) -> Self {
		Self([section, method])
	}

	pub fn section_index(&self) -> u8 {
		self.0[0]
	}

	pub fn method_index(&self) -> u8 {
		self.0[1]
	}

	pub fn as_bytes(&self) -> &[u8; 2] {
		&self.0
	}

	/// Parse a `0x` prefixed hex string of exactly 2 bytes.
	pub fn from_hex(s: &str) -> Result<Self, Error> {
		let bytes = decode_hex(s).ok_or_else(|| Error::DecodeShape(format!("`{}` (not hex)", s)))?;
		Self::try_from(bytes.as_slice())
	}

	/// A call index from JSON, either hex (`"0x0400"`) or bytes (`[4, 0]`).
	pub fn from_json(value: &Value) -> Result<Self, Error> {
		match value {
			Value::String(s) => Self::from_hex(s),
			Value::Array(arr) => {
				let bytes = arr
					.iter()
					.map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
					.collect::<Option<Vec<u8>>>()
					.ok_or_else(|| Error::DecodeShape(value.to_string()))?;
				Self::try_from(bytes.as_slice())
			}
			_ => Err(Error::DecodeShape(value.to_string())),
		}
	}
}

impl TryFrom<&[u8]> for CallIndex {
	type Error = Error;

	fn try_from(bytes: &[u8]) -> Result<Self, Error> {
		match bytes {
			[section, method] => Ok(Self::new(*section, *method)),
			_ => Err(Error::MalformedCallIndex(bytes.len())),
		}
	}
}

impl From<[u8; 2]> for CallIndex {
	fn from(bytes: [u8; 2]) -> Self {
		Self(bytes)
	}
}

impl From<CallIndex> for [u8; 2] {
	fn from(index: CallIndex) -> Self {
		index.0
	}
}

impl fmt::Display for CallIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl Serialize for CallIndex {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_only_accept_two_bytes() {
		assert_eq!(CallIndex::try_from(&[4u8, 0][..]).unwrap(), CallIndex::new(4, 0));
		assert!(matches!(CallIndex::try_from(&[4u8][..]), Err(Error::MalformedCallIndex(1))));
		assert!(matches!(CallIndex::try_from(&[4u8, 0, 1][..]), Err(Error::MalformedCallIndex(3))));
	}

	#[test]
	fn should_parse_hex_and_json() {
		assert_eq!(CallIndex::from_hex("0x0603").unwrap(), CallIndex::new(6, 3));
		assert!(matches!(CallIndex::from_hex("0603"), Err(Error::DecodeShape(_))));
		assert!(matches!(CallIndex::from_hex("0x060300"), Err(Error::MalformedCallIndex(3))));

		assert_eq!(CallIndex::from_json(&serde_json::json!([5, 1])).unwrap(), CallIndex::new(5, 1));
		assert_eq!(CallIndex::from_json(&serde_json::json!("0x0501")).unwrap(), CallIndex::new(5, 1));
		assert!(matches!(CallIndex::from_json(&serde_json::json!([5, 300])), Err(Error::DecodeShape(_))));
		assert!(matches!(CallIndex::from_json(&serde_json::json!(5)), Err(Error::DecodeShape(_))));
	}

	#[test]
	fn should_display_and_encode_raw_bytes() {
		let index = CallIndex::new(4, 0);
		assert_eq!(index.to_string(), "0x0400");
		assert_eq!(index.encode(), vec![4, 0]);
		assert_eq!(serde_json::to_string(&index).unwrap(), "\"0x0400\"");
		assert_eq!(CallIndex::decode(&mut &[4u8, 0, 9][..]).unwrap(), index);
	}
}
