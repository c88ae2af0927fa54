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


//! Resolves types based on the JSON

use crate::{Modules, Result};
use desub_call_types::{regex, RustTypeMarker, TypeDetective};

#[cfg(feature = "default_definitions")]
mod default {
	pub const DEFINITIONS: &str = include_str!("./definitions/definitions.json");
}

#[derive(Debug, Clone)]
pub struct Builder {
	mods: Modules,
}

impl Builder {
	/// Replace all definitions.
	pub fn modules(mut self, modules: Modules) -> Self {
		self.mods = modules;
		self
	}

	/// Replace all definitions with those in `modules`.
	pub fn modules_from_json(mut self, modules: &str) -> Result<Self> {
		self.mods = Modules::new(modules)?;
		Ok(self)
	}

	/// Layer the definitions in `modules` over the current ones.
	pub fn extend_from_json(mut self, modules: &str) -> Result<Self> {
		self.mods.extend(Modules::new(modules)?);
		Ok(self)
	}

	pub fn build(self) -> TypeResolver {
		TypeResolver { mods: self.mods }
	}
}

impl Default for Builder {
	fn default() -> Self {
		Self { mods: default_modules() }
	}
}

#[cfg(feature = "default_definitions")]
fn default_modules() -> Modules {
	Modules::new(default::DEFINITIONS).expect("Included definitions should not panic")
}

#[cfg(not(feature = "default_definitions"))]
fn default_modules() -> Modules {
	Modules::default()
}

impl Default for TypeResolver {
	fn default() -> Self {
		Builder::default().build()
	}
}

#[derive(Debug, Clone)]
pub struct TypeResolver {
	mods: Modules,
}

impl TypeResolver {
	/// Build the builder for `TypeResolver`
	pub fn builder() -> Builder {
		Builder::default()
	}

	pub fn new(modules: Modules) -> Self {
		Self { mods: modules }
	}

	/// Try to resolve a type.
	///
	/// The module the type is used in is checked first, then `runtime`,
	/// then every other module.
	///
	/// # Return
	/// returns None if the type cannot be resolved
	pub fn get(&self, module: &str, ty: &str) -> Option<&RustTypeMarker> {
		log::trace!("Helper resolving {}, {}", module, ty);

		if let Some(t) = self.mods.get_type(module, ty) {
			log::trace!("Type {} found in module {}", ty, module);
			Some(t)
		} else if let Some(t) = self.mods.get_type("runtime", ty) {
			log::trace!("Type not found in {}, trying `runtime` for type {}", module, ty);
			Some(t)
		} else {
			log::trace!("trying other modules");
			self.check_other_modules(ty)
		}
	}

	pub fn try_fallback(&self, module: &str, ty: &str) -> Option<&RustTypeMarker> {
		self.mods.try_fallback(module, ty).or_else(|| self.mods.try_fallback("runtime", ty))
	}

	/// Checks all modules for the types
	fn check_other_modules(&self, ty: &str) -> Option<&RustTypeMarker> {
		self.mods.iter_types().find(|(n, _)| n.as_str() == ty).map(|(_, t)| t)
	}
}

impl TypeDetective for TypeResolver {
	fn get(&self, module: &str, ty: &str) -> Option<&RustTypeMarker> {
		log::trace!("Getting type {}", ty);
		let ty = regex::sanitize_ty(ty)?;
		let module = module.to_ascii_lowercase();
		TypeResolver::get(self, &module, &ty)
	}

	fn try_fallback(&self, module: &str, ty: &str) -> Option<&RustTypeMarker> {
		let ty = regex::sanitize_ty(ty)?;
		let module = module.to_ascii_lowercase();
		TypeResolver::try_fallback(self, &module, &ty)
	}
}

#[cfg(all(test, feature = "default_definitions"))]
mod tests {
	use super::*;
	use desub_call_types::{CommonTypes, EnumField, StructField};

	#[test]
	fn should_deserialize_definitions() -> Result<()> {
		let types = Modules::new(default::DEFINITIONS)?;
		assert!(types.get("runtime").is_some());
		Ok(())
	}

	#[test]
	fn should_resolve_runtime_types() {
		let types = TypeResolver::default();
		assert_eq!(TypeDetective::get(&types, "balances", "Balance"), Some(&RustTypeMarker::U128));
		assert_eq!(TypeDetective::get(&types, "Balances", "T::Balance"), Some(&RustTypeMarker::U128));
		assert_eq!(
			TypeDetective::get(&types, "balances", "<T::Lookup as StaticLookup>::Source"),
			Some(&RustTypeMarker::TypePointer("MultiAddress".to_string()))
		);
	}

	#[test]
	fn should_prefer_module_types() {
		let types = TypeResolver::default();
		let status = TypeResolver::get(&types, "balances", "Status").unwrap();
		assert_eq!(status, &RustTypeMarker::Enum(vec![EnumField::new("Free", None), EnumField::new("Reserved", None)]));
		// found by searching the other modules
		assert_eq!(TypeResolver::get(&types, "system", "Status"), Some(status));
	}

	#[test]
	fn should_resolve_structs() {
		let types = TypeResolver::default();
		let prefs = TypeResolver::get(&types, "staking", "ValidatorPrefs").unwrap();
		assert_eq!(
			prefs,
			&RustTypeMarker::Struct(vec![StructField::new(
				"commission",
				RustTypeMarker::Std(CommonTypes::Compact(Box::new(RustTypeMarker::TypePointer("Perbill".into()))))
			)])
		);
	}

	#[test]
	fn should_layer_custom_definitions() -> Result<()> {
		let types = TypeResolver::builder()
			.extend_from_json(r#"{ "runtime": { "types": { "Balance": "u64", "Custom": "Vec<Balance>" } } }"#)?
			.build();
		assert_eq!(TypeDetective::get(&types, "balances", "Balance"), Some(&RustTypeMarker::U64));
		assert!(TypeDetective::get(&types, "balances", "Custom").is_some());
		assert_eq!(TypeDetective::get(&types, "balances", "BlockNumber"), Some(&RustTypeMarker::U32));

		let types = TypeResolver::builder().modules_from_json(r#"{ "runtime": { "Balance": "u64" } }"#)?.build();
		assert_eq!(TypeDetective::get(&types, "balances", "BlockNumber"), None);
		Ok(())
	}
}
