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


use crate::{FunctionArgumentMetadata, FunctionMetadata};
use desub_call_types::{regex, RustTypeMarker};

/// Type of the dispatch origin. It is never part of the encoded arguments.
const ORIGIN: &str = "Origin";

/// Argument names of a function with the types to decode them as, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsDef {
	entries: Vec<(String, RustTypeMarker)>,
}

impl ArgsDef {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an argument. If `name` exists its type is replaced but it keeps its position.
	pub fn insert<S: Into<String>>(&mut self, name: S, ty: RustTypeMarker) {
		let name = name.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = ty,
			None => self.entries.push((name, ty)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&RustTypeMarker> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, ty)| ty)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &RustTypeMarker)> {
		self.entries.iter().map(|(n, ty)| (n.as_str(), ty))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(n, _)| n.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Arguments of `meta` without those of type `Origin`. Empty without metadata.
pub fn filter_origin(meta: Option<&FunctionMetadata>) -> Vec<&FunctionArgumentMetadata> {
	meta.map(|m| m.arguments().iter().filter(|arg| !is_origin(arg)).collect()).unwrap_or_default()
}

/// The decode plan of a function: its arguments, without `Origin`, with parsed types.
pub fn resolve_args_def(meta: Option<&FunctionMetadata>) -> ArgsDef {
	let mut def = ArgsDef::new();
	for arg in filter_origin(meta).into_iter() {
		let ty = regex::parse(&arg.ty).unwrap_or_else(|| RustTypeMarker::TypePointer(arg.ty.clone()));
		def.insert(arg.name.as_str(), ty);
	}
	def
}

pub(crate) fn is_origin(arg: &FunctionArgumentMetadata) -> bool {
	arg.ty == ORIGIN
}

#[cfg(test)]
mod tests {
	use super::*;
	use desub_call_types::CommonTypes;

	fn meta(args: &[(&str, &str)]) -> FunctionMetadata {
		let args = args.iter().map(|(n, t)| FunctionArgumentMetadata::new(*n, *t)).collect();
		FunctionMetadata::new("test", "test", args)
	}

	#[test]
	fn should_filter_origin() {
		let meta = meta(&[("origin", "Origin"), ("dest", "AccountId"), ("value", "Balance")]);
		let filtered = filter_origin(Some(&meta)).into_iter().map(|a| a.name.as_str()).collect::<Vec<_>>();
		assert_eq!(filtered, vec!["dest", "value"]);
		assert!(filter_origin(None).is_empty());
	}

	#[test]
	fn should_resolve_in_declaration_order() {
		let meta = meta(&[("origin", "Origin"), ("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")]);
		let def = resolve_args_def(Some(&meta));
		assert_eq!(def.names().collect::<Vec<_>>(), vec!["dest", "value"]);
		assert_eq!(def.get("dest"), Some(&RustTypeMarker::TypePointer("LookupSource".into())));
		assert_eq!(
			def.get("value"),
			Some(&RustTypeMarker::Std(CommonTypes::Compact(Box::new(RustTypeMarker::TypePointer("Balance".into())))))
		);
		assert_eq!(resolve_args_def(Some(&meta)), def);
		assert!(resolve_args_def(None).is_empty());
	}

	#[test]
	fn should_overwrite_duplicates_in_place() {
		let meta = meta(&[("a", "u8"), ("b", "u16"), ("a", "u32")]);
		let def = resolve_args_def(Some(&meta));
		assert_eq!(def.iter().collect::<Vec<_>>(), vec![("a", &RustTypeMarker::U32), ("b", &RustTypeMarker::U16)]);
	}
}
