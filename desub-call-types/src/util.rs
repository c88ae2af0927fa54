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


//! Serialization helpers for decoded values.

use crate::{FieldValue, SubstrateType};
use serde::{
	ser::{SerializeMap, SerializeSeq},
	Serializer,
};
use sp_core::crypto::{AccountId32, Ss58Codec};

/// Serialize anything byte-like as a `0x` prefixed hex string.
pub fn bytes_as_hex<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_str(&format!("0x{}", hex::encode(bytes.as_ref())))
}

// If the elements are all u8's, serialize as hex
pub fn as_hex<S: Serializer>(elements: &[SubstrateType], serializer: S) -> Result<S::Ok, S::Error> {
	match to_bytes(elements) {
		Some(bytes) => bytes_as_hex(&bytes, serializer),
		None => {
			let mut seq = serializer.serialize_seq(Some(elements.len()))?;
			for e in elements.iter() {
				seq.serialize_element(e)?;
			}
			seq.end()
		}
	}
}

/// Serialize an account id as an ss58 address.
pub fn as_ss58<S: Serializer>(account: &AccountId32, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_str(&account.to_ss58check())
}

/// Serialize struct fields as a map of field name to value.
pub fn fields_as_map<S: Serializer>(fields: &[FieldValue], serializer: S) -> Result<S::Ok, S::Error> {
	let mut map = serializer.serialize_map(Some(fields.len()))?;
	for field in fields.iter() {
		map.serialize_entry(&field.name, &field.value)?;
	}
	map.end()
}

/// The bytes of a sequence of `u8` values, `None` if any element is not a `u8`.
pub fn to_bytes(elements: &[SubstrateType]) -> Option<Vec<u8>> {
	elements
		.iter()
		.map(|v| match v {
			SubstrateType::U8(byte) => Some(*byte),
			_ => None,
		})
		.collect()
}

/// Strip a `0x` prefix and decode the rest as hex.
pub fn decode_hex(s: &str) -> Option<Vec<u8>> {
	let s = s.strip_prefix("0x")?;
	hex::decode(s).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_only_decode_prefixed_hex() {
		assert_eq!(decode_hex("0x0400"), Some(vec![4, 0]));
		assert_eq!(decode_hex("0400"), None);
		assert_eq!(decode_hex("0xzz"), None);
		assert_eq!(decode_hex("0x"), Some(vec![]));
	}

	#[test]
	fn should_serialize_byte_sequences_as_hex() {
		let value = SubstrateType::Composite(vec![1u8.into(), 2u8.into(), 255u8.into()]);
		assert_eq!(serde_json::to_string(&value).unwrap(), "\"0x0102ff\"");

		let value = SubstrateType::Sequence(vec![1u32.into(), 2u32.into()]);
		assert_eq!(serde_json::to_string(&value).unwrap(), "[1,2]");
	}
}
