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


use crate::error::Error;
use desub_call_types::{regex, EnumField, RustTypeMarker, SetField, StructField};
use serde::{
	de::{self, Deserializer, MapAccess, Visitor},
	Deserialize,
};
use serde_json::{map::Map, Value};
use std::{collections::HashMap, fmt};

/// Type definitions of each runtime module.
///
/// The `runtime` module holds types shared by all modules.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Modules {
	/// module name -> Type Map of module
	modules: HashMap<String, ModuleTypes>,
}

impl Modules {
	/// Construct this struct from JSON
	pub fn new(raw_json: &str) -> Result<Self, Error> {
		let modules: Modules = serde_json::from_str(raw_json)?;
		Ok(modules)
	}

	pub fn get(&self, module: &str) -> Option<&ModuleTypes> {
		self.modules.get(module)
	}

	pub fn get_type(&self, module: &str, ty: &str) -> Option<&RustTypeMarker> {
		self.modules.get(module)?.get(ty)
	}

	pub fn try_fallback(&self, module: &str, ty: &str) -> Option<&RustTypeMarker> {
		self.modules.get(module)?.try_fallback(ty)
	}

	/// Iterate over all the types in each module
	pub fn iter_types(&self) -> impl Iterator<Item = (&String, &RustTypeMarker)> {
		self.modules.values().flat_map(|v| v.types.iter())
	}

	/// Layer `other` over these definitions.
	/// Types in `other` take priority if a module declares the same name twice.
	pub fn extend(&mut self, other: Modules) {
		for (name, types) in other.modules.into_iter() {
			let merged = match self.modules.get(&name) {
				Some(existing) => existing.merge(&types),
				None => types,
			};
			self.modules.insert(name, merged);
		}
	}
}

/// Map of types to their Type Markers
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ModuleTypes {
	/// Type Name -> Type
	types: HashMap<String, RustTypeMarker>,
	fallbacks: HashMap<String, RustTypeMarker>,
}

impl ModuleTypes {
	pub fn get(&self, ty: &str) -> Option<&RustTypeMarker> {
		self.types.get(ty)
	}

	pub fn try_fallback(&self, ty: &str) -> Option<&RustTypeMarker> {
		self.fallbacks.get(ty)
	}

	/// Merges a ModuleTypes struct with another, to create a new HashMap
	/// The `other` struct takes priority if there are type conflicts
	pub fn merge(&self, other: &ModuleTypes) -> ModuleTypes {
		let (mut types, mut fallbacks) = (self.types.clone(), self.fallbacks.clone());
		types.extend(other.types.clone());
		fallbacks.extend(other.fallbacks.clone());

		ModuleTypes { types, fallbacks }
	}
}

impl<'de> Deserialize<'de> for Modules {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct ModulesVisitor;

		impl<'de> Visitor<'de> for ModulesVisitor {
			type Value = Modules;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("map of module names to types")
			}

			fn visit_map<V>(self, mut map: V) -> Result<Modules, V::Error>
			where
				V: MapAccess<'de>,
			{
				let mut modules: HashMap<String, ModuleTypes> = HashMap::new();
				while let Some(key) = map.next_key::<String>()? {
					let val: ModuleTypes = map.next_value()?;
					modules.insert(key.to_ascii_lowercase(), val);
				}
				Ok(Modules { modules })
			}
		}
		deserializer.deserialize_map(ModulesVisitor)
	}
}

impl<'de> Deserialize<'de> for ModuleTypes {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(ModuleTypeVisitor)
	}
}

struct ModuleTypeVisitor;

impl<'de> Visitor<'de> for ModuleTypeVisitor {
	type Value = ModuleTypes;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("Map or string")
	}

	fn visit_map<V>(self, mut map: V) -> Result<ModuleTypes, V::Error>
	where
		V: MapAccess<'de>,
	{
		let mut types: TypeMap = HashMap::new();
		let mut fallbacks: TypeMap = HashMap::new();

		while let Some(key) = map.next_key::<String>()? {
			let mut val: Value = map.next_value()?;
			match key.as_str() {
				// "types" wraps the definitions of a module
				"types" => {
					let obj = val.as_object_mut().ok_or_else(|| de::Error::custom("Types must refer to an object"))?;
					for (key, val) in obj.iter_mut() {
						parse_mod_types(&mut types, &mut fallbacks, key, val).map_err(de::Error::custom)?;
					}
				}
				m => parse_mod_types(&mut types, &mut fallbacks, m, &mut val).map_err(de::Error::custom)?,
			}
		}
		Ok(ModuleTypes { types, fallbacks })
	}
}

type TypeMap = HashMap<String, RustTypeMarker>;

/// In Polkadot-JS Definitions, an _object_ can be:
/// - Struct (no identifier),
/// - Enum (`_enum` identifier)
/// - Set (`_set`)
///
/// This function decides which is what and dispatches a call
/// to the appropriate parse fn.
fn parse_mod_types(module_types: &mut TypeMap, fallbacks: &mut TypeMap, key: &str, val: &mut Value) -> Result<(), Error> {
	match val {
		Value::String(s) => {
			module_types.insert(key.to_string(), parse_type(s)?);
		}
		Value::Object(ref mut obj) => {
			if obj.len() == 1 && obj.keys().any(|k| k == "_enum" || k == "_set") {
				let ty = match obj.iter().next() {
					Some((k, v)) if k == "_enum" => parse_enum(v)?,
					Some((_, Value::Object(set))) => parse_set(set)?,
					Some((k, v)) => return Err(Error::UnexpectedType(format!("{}: {}", k, v))),
					None => return Err(Error::UnexpectedType(key.to_string())),
				};
				module_types.insert(key.to_string(), ty);
			} else {
				if let Some(fallback) = clean_struct(obj)? {
					fallbacks.insert(key.to_string(), fallback);
				}
				let ty = parse_struct(obj)?;
				module_types.insert(key.to_string(), ty);
			}
		}
		Value::Array(a) => {
			module_types.insert(key.to_string(), parse_tuple(a)?);
		}
		Value::Null => {
			module_types.insert(key.to_string(), RustTypeMarker::Null);
		}
		v => return Err(Error::UnexpectedType(v.to_string())),
	}
	Ok(())
}

fn parse_type(s: &str) -> Result<RustTypeMarker, Error> {
	regex::parse(s).ok_or_else(|| Error::from(s))
}

// Removes unsupported/unnecessary keys from struct,
// and returns fallback value if it exists.
fn clean_struct(map: &mut Map<String, Value>) -> Result<Option<RustTypeMarker>, Error> {
	map.remove("_alias"); // aliases only rename fields

	if let Some(fallback) = map.remove("_fallback") {
		let ty = match fallback {
			Value::String(s) => parse_type(&s)?,
			Value::Object(o) => parse_struct(&o)?,
			Value::Array(a) => parse_tuple(&a)?,
			Value::Null => RustTypeMarker::Null,
			v => return Err(Error::UnexpectedType(v.to_string())),
		};
		Ok(Some(ty))
	} else {
		Ok(None)
	}
}

fn parse_set(obj: &Map<String, Value>) -> Result<RustTypeMarker, Error> {
	let mut set_vec = Vec::new();
	for (key, value) in obj.iter() {
		let num: u8 = serde_json::from_value(value.clone())?;
		set_vec.push(SetField::new(key, num));
	}
	Ok(RustTypeMarker::Set(set_vec))
}

/// Process the enum and return the representation as a Rust Type
fn parse_enum(value: &Value) -> Result<RustTypeMarker, Error> {
	match value {
		Value::Array(arr) => {
			let rust_enum = arr
				.iter()
				.map(|u| {
					u.as_str()
						.map(|name| EnumField::new(name, None))
						.ok_or_else(|| Error::UnexpectedType(u.to_string()))
				})
				.collect::<Result<Vec<_>, Error>>()?;
			Ok(RustTypeMarker::Enum(rust_enum))
		}
		// If all the values are numbers they are the indices of the variants.
		// Gaps are filled with placeholder variants so a variant's position stays its index.
		Value::Object(obj) if obj.values().all(|v| v.is_u64()) => {
			let mut indexed = obj
				.iter()
				.map(|(k, v)| (v.as_u64().unwrap_or_default(), k.as_str()))
				.collect::<Vec<(u64, &str)>>();
			indexed.sort_by_key(|(num, _)| *num);
			let mut rust_enum = Vec::new();
			for (index, name) in indexed.into_iter() {
				while (rust_enum.len() as u64) < index {
					rust_enum.push(EnumField::new(format!("__Unused{}", rust_enum.len()), None));
				}
				rust_enum.push(EnumField::new(name, None));
			}
			Ok(RustTypeMarker::Enum(rust_enum))
		}
		Value::Object(obj) => {
			let mut rust_enum = Vec::new();
			for (key, value) in obj.iter() {
				let field = match value {
					Value::Null => None,
					Value::String(s) => Some(parse_type(s)?),
					Value::Object(o) => Some(parse_struct(o)?),
					Value::Array(a) => Some(parse_tuple(a)?),
					v => return Err(Error::UnexpectedType(v.to_string())),
				};
				rust_enum.push(EnumField::new(key, field));
			}
			Ok(RustTypeMarker::Enum(rust_enum))
		}
		v => Err(Error::UnexpectedType(v.to_string())),
	}
}

/// Parses a rust struct representation from a JSON Map.
fn parse_struct(rust_struct: &Map<String, Value>) -> Result<RustTypeMarker, Error> {
	let mut fields = Vec::new();
	for (key, value) in rust_struct.iter() {
		let ty = match value {
			Value::Null => RustTypeMarker::Null,
			// points to some other type
			Value::String(s) => parse_type(s)?,
			// struct-within-a-struct
			Value::Object(o) => parse_struct(o)?,
			Value::Array(a) => parse_tuple(a)?,
			v => return Err(Error::UnexpectedType(v.to_string())),
		};
		fields.push(StructField::new(key, ty));
	}
	Ok(RustTypeMarker::Struct(fields))
}

fn parse_tuple(json_tuple: &[Value]) -> Result<RustTypeMarker, Error> {
	let mut tuple = Vec::new();
	for value in json_tuple.iter() {
		match value {
			Value::Null => tuple.push(RustTypeMarker::Null),
			Value::String(s) => tuple.push(parse_type(s)?),
			v => return Err(Error::UnexpectedType(v.to_string())),
		}
	}
	Ok(RustTypeMarker::Tuple(tuple))
}

#[cfg(test)]
mod tests {
	use super::*;
	use desub_call_types::CommonTypes;

	const RAW_JSON: &str = r#"
{
	"runtime": {
		"types": {
			"BlockNumber": "u64",
			"Timepoint": {
				"height": "BlockNumber",
				"index": "u32"
			},
			"MultiSignature": {
				"_enum": {
					"Ed25519": "H512",
					"Sr25519": "H512",
					"Ecdsa": "[u8; 65]"
				}
			},
			"Reasons": {
				"_enum": [
					"Fee",
					"Misc",
					"All"
				]
			},
			"ProxyType": {
				"_enum": {
					"Any": 0,
					"Staking": 2
				}
			},
			"WithdrawReasons": {
				"_set": {
					"TransactionPayment": 1,
					"Transfer": 2,
					"Reserve": 4
				}
			},
			"KeyValue": ["StorageKey", "StorageData"],
			"Judgement": {
				"index": "Compact<u32>",
				"_fallback": "u32",
				"_alias": { "index": "idx" }
			}
		}
	},
	"Balances": {
		"Status": { "_enum": ["Free", "Reserved"] }
	}
}
"#;

	#[test]
	fn should_deserialize_modules() -> Result<(), Error> {
		let modules = Modules::new(RAW_JSON)?;
		assert_eq!(modules.get_type("runtime", "BlockNumber"), Some(&RustTypeMarker::U64));
		assert_eq!(
			modules.get_type("runtime", "Timepoint"),
			Some(&RustTypeMarker::Struct(vec![
				StructField::new("height", RustTypeMarker::TypePointer("BlockNumber".into())),
				StructField::new("index", RustTypeMarker::U32),
			]))
		);
		assert_eq!(
			modules.get_type("runtime", "MultiSignature"),
			Some(&RustTypeMarker::Enum(vec![
				EnumField::new("Ed25519", Some(RustTypeMarker::TypePointer("H512".into()))),
				EnumField::new("Sr25519", Some(RustTypeMarker::TypePointer("H512".into()))),
				EnumField::new("Ecdsa", Some(RustTypeMarker::Array { size: 65, ty: Box::new(RustTypeMarker::U8) })),
			]))
		);
		assert_eq!(
			modules.get_type("runtime", "WithdrawReasons"),
			Some(&RustTypeMarker::Set(vec![
				SetField::new("TransactionPayment", 1),
				SetField::new("Transfer", 2),
				SetField::new("Reserve", 4),
			]))
		);
		assert_eq!(
			modules.get_type("runtime", "KeyValue"),
			Some(&RustTypeMarker::Tuple(vec![
				RustTypeMarker::TypePointer("StorageKey".into()),
				RustTypeMarker::TypePointer("StorageData".into()),
			]))
		);
		// module names are case insensitive and `types` is optional
		assert_eq!(
			modules.get_type("balances", "Status"),
			Some(&RustTypeMarker::Enum(vec![EnumField::new("Free", None), EnumField::new("Reserved", None)]))
		);
		Ok(())
	}

	#[test]
	fn should_keep_enum_indices_with_gaps() -> Result<(), Error> {
		let modules = Modules::new(RAW_JSON)?;
		let proxy = modules.get_type("runtime", "ProxyType").unwrap();
		match proxy {
			RustTypeMarker::Enum(variants) => {
				assert_eq!(variants.len(), 3);
				assert_eq!(variants[0].name, "Any");
				assert_eq!(variants[2].name, "Staking");
			}
			other => panic!("expected enum, got {}", other),
		}
		Ok(())
	}

	#[test]
	fn should_register_fallbacks_and_drop_aliases() -> Result<(), Error> {
		let modules = Modules::new(RAW_JSON)?;
		assert_eq!(
			modules.get_type("runtime", "Judgement"),
			Some(&RustTypeMarker::Struct(vec![StructField::new(
				"index",
				RustTypeMarker::Std(CommonTypes::Compact(Box::new(RustTypeMarker::U32)))
			)]))
		);
		assert_eq!(modules.try_fallback("runtime", "Judgement"), Some(&RustTypeMarker::U32));
		Ok(())
	}

	#[test]
	fn should_extend_with_priority_to_newer_definitions() -> Result<(), Error> {
		let mut modules = Modules::new(RAW_JSON)?;
		modules.extend(Modules::new(r#"{ "runtime": { "types": { "BlockNumber": "u32", "Extra": "bool" } } }"#)?);
		assert_eq!(modules.get_type("runtime", "BlockNumber"), Some(&RustTypeMarker::U32));
		assert_eq!(modules.get_type("runtime", "Extra"), Some(&RustTypeMarker::Bool));
		assert!(modules.get_type("runtime", "Timepoint").is_some());
		Ok(())
	}

	#[test]
	fn should_reject_unexpected_values() {
		assert!(Modules::new(r#"{ "runtime": { "types": { "Foo": 1 } } }"#).is_err());
		assert!(Modules::new(r#"{ "runtime": { "types": { "Foo": { "_enum": 5 } } } }"#).is_err());
	}
}
