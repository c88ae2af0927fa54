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


use crate::{args_def, resolve_args_def, util, ArgsDef, CallIndex, FunctionMetadata};
use codec::{Encode, Output};
use desub_call_types::{util::fields_as_map, FieldValue, SubstrateType};
use serde::{ser::SerializeStruct, Serialize, Serializer};
use std::{fmt, sync::Arc};

/// A decoded call: its index, its arguments in declaration order and the
/// metadata of the function it calls, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericCall {
	call_index: CallIndex,
	args: Vec<FieldValue>,
	meta: Option<Arc<FunctionMetadata>>,
}

impl GenericCall {
	pub fn new(call_index: CallIndex, args: Vec<FieldValue>, meta: Option<Arc<FunctionMetadata>>) -> Self {
		Self { call_index, args, meta }
	}

	/// Values of the arguments, without their names.
	pub fn args(&self) -> Vec<&SubstrateType> {
		self.args.iter().map(|a| &a.value).collect()
	}

	pub fn arguments(&self) -> &[FieldValue] {
		&self.args
	}

	/// Value of the argument called `name`.
	pub fn arg(&self, name: &str) -> Option<&SubstrateType> {
		self.args.iter().find(|a| a.name == name).map(|a| &a.value)
	}

	/// Types of the arguments, resolved from the metadata.
	pub fn args_def(&self) -> ArgsDef {
		resolve_args_def(self.meta.as_deref())
	}

	pub fn call_index(&self) -> &CallIndex {
		&self.call_index
	}

	/// SCALE encoding of the arguments, without the call index.
	pub fn data(&self) -> Vec<u8> {
		let mut data = Vec::new();
		self.args.iter().for_each(|a| a.value.encode_to(&mut data));
		data
	}

	/// Whether the first argument of the function is its `Origin`.
	pub fn has_origin(&self) -> bool {
		self.meta.as_ref().and_then(|m| m.arguments().first()).map(args_def::is_origin).unwrap_or(false)
	}

	pub fn meta(&self) -> Option<&Arc<FunctionMetadata>> {
		self.meta.as_ref()
	}

	pub fn raw_type(&self) -> &'static str {
		"Method"
	}

	/// Section of the call, empty when the function is unknown.
	pub fn section(&self) -> &str {
		self.meta.as_ref().map(|m| m.section()).unwrap_or_default()
	}

	/// Method of the call, empty when the function is unknown.
	pub fn method(&self) -> String {
		self.meta.as_ref().map(|m| util::method_name(m.name())).unwrap_or_default()
	}

	pub fn into_parts(self) -> (CallIndex, Vec<FieldValue>, Option<Arc<FunctionMetadata>>) {
		(self.call_index, self.args, self.meta)
	}
}

impl Encode for GenericCall {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		dest.write(self.call_index.as_bytes());
		self.args.iter().for_each(|a| a.value.encode_to(dest));
	}
}

impl fmt::Display for GenericCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let args = self.args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
		if self.meta.is_some() {
			write!(f, "{}.{}({})", self.section(), self.method(), args.join(", "))
		} else {
			write!(f, "{}({})", self.call_index, args.join(", "))
		}
	}
}

struct ArgsMap<'a>(&'a [FieldValue]);

impl Serialize for ArgsMap<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		fields_as_map(self.0, serializer)
	}
}

impl Serialize for GenericCall {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("GenericCall", 4)?;
		state.serialize_field("callIndex", &self.call_index)?;
		state.serialize_field("section", self.section())?;
		state.serialize_field("method", &self.method())?;
		state.serialize_field("args", &ArgsMap(&self.args))?;
		state.end()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::FunctionArgumentMetadata;
	use serde_json::json;

	fn remark() -> GenericCall {
		let meta = FunctionMetadata::new(
			"remark_with_event",
			"system",
			vec![FunctionArgumentMetadata::new("origin", "Origin"), FunctionArgumentMetadata::new("remark", "Bytes")],
		);
		let args = vec![FieldValue::new("remark", SubstrateType::Bytes(vec![0xaa, 0xbb]))];
		GenericCall::new(CallIndex::new(0, 7), args, Some(Arc::new(meta)))
	}

	#[test]
	fn should_expose_call_parts() {
		let call = remark();
		assert_eq!(call.section(), "system");
		assert_eq!(call.method(), "remarkWithEvent");
		assert_eq!(call.raw_type(), "Method");
		assert!(call.has_origin());
		assert_eq!(call.args_def().names().collect::<Vec<_>>(), vec!["remark"]);
		assert_eq!(call.arg("remark"), Some(&SubstrateType::Bytes(vec![0xaa, 0xbb])));
		assert_eq!(call.arg("origin"), None);
	}

	#[test]
	fn should_encode_index_and_data() {
		let call = remark();
		assert_eq!(call.data(), vec![8, 0xaa, 0xbb]);
		assert_eq!(call.encode(), vec![0, 7, 8, 0xaa, 0xbb]);
	}

	#[test]
	fn should_display_and_serialize() {
		let call = remark();
		assert_eq!(call.to_string(), "system.remarkWithEvent(remark: 0xaabb)");
		assert_eq!(
			serde_json::to_value(&call).unwrap(),
			json!({ "callIndex": "0x0007", "section": "system", "method": "remarkWithEvent", "args": { "remark": "0xaabb" } })
		);

		let unknown = GenericCall::new(CallIndex::new(9, 9), Vec::new(), None);
		assert_eq!(unknown.to_string(), "0x0909()");
		assert!(!unknown.has_origin());
	}
}
