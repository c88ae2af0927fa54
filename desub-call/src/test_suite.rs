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


//! Fixtures shared by the unit tests.

use crate::{CallFunction, CallIndex, FunctionArgumentMetadata, FunctionMetadata, Methods, ModulesWithMethods};
use desub_call_types::{CommonTypes, EnumField, RustTypeMarker, SetField, StructField, TypeDetective};
use std::collections::HashMap;

/// Type definitions that ignore the module, with a fallback for `Judgement`
/// and a `Loop` that points to itself.
#[derive(Debug, Clone)]
pub struct TestTypes {
	types: HashMap<String, RustTypeMarker>,
	fallbacks: HashMap<String, RustTypeMarker>,
}

impl TestTypes {
	pub fn new() -> Self {
		let mut types = HashMap::new();
		types.insert("Balance".to_string(), RustTypeMarker::U128);
		types.insert("BlockNumber".to_string(), RustTypeMarker::U32);
		types.insert("LookupSource".to_string(), RustTypeMarker::pointer("MultiAddress"));
		types.insert("Hash".to_string(), RustTypeMarker::pointer("H256"));
		types.insert("Perbill".to_string(), RustTypeMarker::U32);
		types.insert(
			"Status".to_string(),
			RustTypeMarker::Enum(vec![EnumField::new("Free", None), EnumField::new("Reserved", None)]),
		);
		types.insert(
			"Timepoint".to_string(),
			RustTypeMarker::Struct(vec![
				StructField::new("height", RustTypeMarker::pointer("BlockNumber")),
				StructField::new("index", RustTypeMarker::U32),
			]),
		);
		types.insert(
			"WithdrawReasons".to_string(),
			RustTypeMarker::Set(vec![
				SetField::new("TransactionPayment", 1),
				SetField::new("Transfer", 2),
				SetField::new("Reserve", 4),
				SetField::new("Fee", 8),
				SetField::new("Tip", 16),
			]),
		);
		types.insert(
			"Weights".to_string(),
			RustTypeMarker::Std(CommonTypes::Vec(Box::new(RustTypeMarker::pointer("Perbill")))),
		);
		types.insert("Judgement".to_string(), RustTypeMarker::U64);
		types.insert("Loop".to_string(), RustTypeMarker::pointer("Loop"));

		let mut fallbacks = HashMap::new();
		fallbacks.insert("Judgement".to_string(), RustTypeMarker::U8);
		Self { types, fallbacks }
	}
}

impl TypeDetective for TestTypes {
	fn get(&self, _module: &str, ty: &str) -> Option<&RustTypeMarker> {
		self.types.get(ty)
	}

	fn try_fallback(&self, _module: &str, ty: &str) -> Option<&RustTypeMarker> {
		self.fallbacks.get(ty)
	}
}

fn function(section: &str, call_index: CallIndex, name: &str, args: &[(&str, &str)]) -> (String, CallFunction) {
	let args = args.iter().map(|(n, t)| FunctionArgumentMetadata::new(*n, *t)).collect();
	let meta = FunctionMetadata::new(name, section, args);
	(name.to_string(), CallFunction::from_meta(call_index, meta))
}

/// `balances` at module index 4.
pub fn balances_module() -> ModulesWithMethods {
	let methods: Methods = vec![
		function(
			"balances",
			CallIndex::new(4, 0),
			"transfer",
			&[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")],
		),
		function(
			"balances",
			CallIndex::new(4, 1),
			"set_balance",
			&[
				("who", "<T::Lookup as StaticLookup>::Source"),
				("new_free", "Compact<T::Balance>"),
				("new_reserved", "Compact<T::Balance>"),
			],
		),
	]
	.into_iter()
	.collect();
	let mut modules = HashMap::new();
	modules.insert("Balances".to_string(), methods);
	modules
}

/// `system` at 0, `balances` at 4 and `sudo` at 5.
pub fn all_modules() -> ModulesWithMethods {
	let mut modules = balances_module();
	let system: Methods = vec![
		function("system", CallIndex::new(0, 0), "set_heap_pages", &[("origin", "Origin"), ("pages", "u64")]),
		function("system", CallIndex::new(0, 1), "remark", &[("remark", "Bytes")]),
	]
	.into_iter()
	.collect();
	let sudo: Methods = vec![function("sudo", CallIndex::new(5, 0), "sudo", &[("call", "Box<<T as Trait>::Call>")])]
		.into_iter()
		.collect();
	modules.insert("System".to_string(), system);
	modules.insert("Sudo".to_string(), sudo);
	modules
}
