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


//! Naming conventions of sections and methods.

/// The section name of a module: the module name with a lower-case first letter.
/// `ElectionsPhragmen` becomes `electionsPhragmen`.
pub fn section_name(module: &str) -> String {
	let mut chars = module.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// The method name of a function, in lower camel case.
/// `transfer_keep_alive` becomes `transferKeepAlive`.
pub fn method_name(function: &str) -> String {
	let mut parts = function.split('_').filter(|p| !p.is_empty());
	let mut name = parts.next().map(section_name).unwrap_or_default();
	for part in parts {
		let mut chars = part.chars();
		if let Some(first) = chars.next() {
			name.extend(first.to_uppercase());
			name.push_str(chars.as_str());
		}
	}
	name
}
