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


//! Parse declared type names (`Vec<(AccountId, Compact<Balance>)>`,
//! `<T::Lookup as StaticLookup>::Source`, `[u8; 32]`, ...) into [`RustTypeMarker`]s.

use crate::{CommonTypes, RustTypeMarker};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegexSet {
	Array,
	BitSize,
	Tuple,
	Vec,
	Option,
	Result,
	Compact,
	Box,
	Map,
	Set,
	Generic,
}

impl RegexSet {
	/// Checks if string matches any of the patterns defined
	/// Returns none if it does not match
	fn get_type(s: &str) -> Option<RegexSet> {
		if rust_array_decl().is_match(s) {
			Some(RegexSet::Array)
		} else if rust_bit_size().is_match(s) {
			Some(RegexSet::BitSize)
		} else if rust_tuple_decl().is_match(s) {
			Some(RegexSet::Tuple)
		} else if rust_vec_decl().is_match(s) {
			Some(RegexSet::Vec)
		} else if rust_option_decl().is_match(s) {
			Some(RegexSet::Option)
		} else if rust_result_decl().is_match(s) {
			Some(RegexSet::Result)
		} else if rust_compact_decl().is_match(s) {
			Some(RegexSet::Compact)
		} else if rust_box_decl().is_match(s) {
			Some(RegexSet::Box)
		} else if rust_map_decl().is_match(s) {
			Some(RegexSet::Map)
		} else if rust_set_decl().is_match(s) {
			Some(RegexSet::Set)
		} else if rust_generic_decl().is_match(s) {
			Some(RegexSet::Generic)
		} else {
			None
		}
	}

	fn parse_type(&self, s: &str) -> Option<RustTypeMarker> {
		match self {
			RegexSet::Array => parse_array(s),
			RegexSet::BitSize => parse_bit_size(s),
			RegexSet::Tuple => parse_tuple(s),
			RegexSet::Vec => parse_wrapped(rust_vec_decl(), s).map(|t| RustTypeMarker::Std(CommonTypes::Vec(t))),
			RegexSet::Option => parse_wrapped(rust_option_decl(), s).map(|t| RustTypeMarker::Std(CommonTypes::Option(t))),
			RegexSet::Result => parse_result(s),
			RegexSet::Compact => {
				parse_wrapped(rust_compact_decl(), s).map(|t| RustTypeMarker::Std(CommonTypes::Compact(t)))
			}
			RegexSet::Box => parse_wrapped(rust_box_decl(), s).map(|t| *t),
			RegexSet::Map => parse_map(s),
			RegexSet::Set => parse_wrapped(rust_set_decl(), s).map(|t| RustTypeMarker::Std(CommonTypes::Vec(t))),
			RegexSet::Generic => parse_generic(s),
		}
	}
}

/// Matches arrays like `[u8; 32]`, `[Vec<Foo>; 10]` or `[u8; 20; H160]`.
/// Extra type information after the size is discarded.
fn rust_array_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^\[\s*(?P<type>.+?)\s*;\s*(?P<size>\d+)\s*(?:;\s*[\w:]*\s*)?\]$")
			.expect("Regex expression should be infallible; qed")
	})
}

/// Matches fixed-width integers declared like `UInt<64, Balance>`
fn rust_bit_size() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^(?P<sign>Int|UInt)<\s*(?P<bits>\d+)\s*,\s*[\w:]+\s*>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_tuple_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^\((?P<type>.*)\)$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_vec_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^Vec<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_option_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^Option<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_result_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^Result<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_compact_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^Compact<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_box_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^Box<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_map_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^(?:BTreeMap|HashMap)<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

fn rust_set_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^(?:BTreeSet|HashSet)<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

/// Any other `Outer<Inner>`. Vec/Option/Result/Compact/Box are matched before this.
fn rust_generic_decl() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^(?P<outer>[\w:]+)<(?P<type>.+)>$").expect("Regex expression should be infallible; qed")
	})
}

/// Parse a type name into a [`RustTypeMarker`].
///
/// Names without any structure are returned as a
/// [`RustTypeMarker::TypePointer`] of their sanitized form, so this only
/// returns `None` for an empty name.
pub fn parse(s: &str) -> Option<RustTypeMarker> {
	let s = s.trim();
	if s.is_empty() {
		return None;
	}

	if let Some(primitive) = parse_primitive(s) {
		return Some(primitive);
	}

	RegexSet::get_type(s)
		.and_then(|set| set.parse_type(s))
		.or_else(|| sanitize_ty(s).map(RustTypeMarker::TypePointer))
}

fn parse_primitive(s: &str) -> Option<RustTypeMarker> {
	let ty = match s {
		"u8" => RustTypeMarker::U8,
		"u16" => RustTypeMarker::U16,
		"u32" => RustTypeMarker::U32,
		"u64" => RustTypeMarker::U64,
		"u128" => RustTypeMarker::U128,
		"i8" => RustTypeMarker::I8,
		"i16" => RustTypeMarker::I16,
		"i32" => RustTypeMarker::I32,
		"i64" => RustTypeMarker::I64,
		"i128" => RustTypeMarker::I128,
		"bool" => RustTypeMarker::Bool,
		"Null" => RustTypeMarker::Null,
		_ => return None,
	};
	Some(ty)
}

fn parse_wrapped(re: &Regex, s: &str) -> Option<Box<RustTypeMarker>> {
	let caps = re.captures(s)?;
	parse(caps.name("type")?.as_str()).map(Box::new)
}

fn parse_array(s: &str) -> Option<RustTypeMarker> {
	let caps = rust_array_decl().captures(s)?;
	let ty = parse(caps.name("type")?.as_str())?;
	let size = caps.name("size")?.as_str().parse::<usize>().ok()?;
	Some(RustTypeMarker::Array { size, ty: Box::new(ty) })
}

fn parse_bit_size(s: &str) -> Option<RustTypeMarker> {
	let caps = rust_bit_size().captures(s)?;
	let signed = caps.name("sign")?.as_str() == "Int";
	let ty = match (signed, caps.name("bits")?.as_str()) {
		(false, "8") => RustTypeMarker::U8,
		(false, "16") => RustTypeMarker::U16,
		(false, "32") => RustTypeMarker::U32,
		(false, "64") => RustTypeMarker::U64,
		(false, "128") => RustTypeMarker::U128,
		(true, "8") => RustTypeMarker::I8,
		(true, "16") => RustTypeMarker::I16,
		(true, "32") => RustTypeMarker::I32,
		(true, "64") => RustTypeMarker::I64,
		(true, "128") => RustTypeMarker::I128,
		_ => return None,
	};
	Some(ty)
}

fn parse_tuple(s: &str) -> Option<RustTypeMarker> {
	let caps = rust_tuple_decl().captures(s)?;
	let mut types = split_top_level(caps.name("type")?.as_str())
		.into_iter()
		.map(parse)
		.collect::<Option<Vec<_>>>()?;
	match types.len() {
		0 => Some(RustTypeMarker::Null),
		1 => types.pop(),
		_ => Some(RustTypeMarker::Tuple(types)),
	}
}

fn parse_result(s: &str) -> Option<RustTypeMarker> {
	let caps = rust_result_decl().captures(s)?;
	let parts = split_top_level(caps.name("type")?.as_str());
	match parts.as_slice() {
		[ok, err] => Some(RustTypeMarker::Std(CommonTypes::Result(Box::new(parse(ok)?), Box::new(parse(err)?)))),
		_ => None,
	}
}

// maps are encoded as a vector of key-value tuples
fn parse_map(s: &str) -> Option<RustTypeMarker> {
	let caps = rust_map_decl().captures(s)?;
	let parts = split_top_level(caps.name("type")?.as_str());
	match parts.as_slice() {
		[key, value] => {
			let pair = RustTypeMarker::Tuple(vec![parse(key)?, parse(value)?]);
			Some(RustTypeMarker::Std(CommonTypes::Vec(Box::new(pair))))
		}
		_ => None,
	}
}

fn parse_generic(s: &str) -> Option<RustTypeMarker> {
	let caps = rust_generic_decl().captures(s)?;
	let outer = sanitize_ty(caps.name("outer")?.as_str())?;
	let mut inner =
		split_top_level(caps.name("type")?.as_str()).into_iter().map(parse).collect::<Option<Vec<_>>>()?;
	let inner = match inner.len() {
		0 => return None,
		1 => inner.pop()?,
		_ => RustTypeMarker::Tuple(inner),
	};
	Some(RustTypeMarker::Generic(Box::new(RustTypeMarker::TypePointer(outer)), Box::new(inner)))
}

/// Split a list of types on the commas that are not nested inside
/// another type. Empty entries (from a trailing comma) are dropped.
pub fn split_top_level(s: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth: usize = 0;
	let mut start = 0;
	for (i, c) in s.char_indices() {
		match c {
			'<' | '(' | '[' => depth += 1,
			'>' | ')' | ']' => depth = depth.saturating_sub(1),
			',' if depth == 0 => {
				parts.push(s[start..i].trim());
				start = i + 1;
			}
			_ => (),
		}
	}
	parts.push(s[start..].trim());
	parts.retain(|p| !p.is_empty());
	parts
}

/// Transforms the lookup of an account (`<T::Lookup as StaticLookup>::Source`)
/// into the name it is known by in type definitions.
pub fn remove_lookup<S: AsRef<str>>(s: S) -> Option<String> {
	static RE: OnceLock<Regex> = OnceLock::new();
	let re = RE.get_or_init(|| {
		Regex::new(r"^<\s*T::Lookup\s+as\s+StaticLookup\s*>::Source$")
			.expect("Regex expression should be infallible; qed")
	});
	re.is_match(s.as_ref()).then(|| "LookupSource".to_string())
}

/// Removes the trait preceding the type.
/// I.E Removes `<T as Trait>::` from `<T as Trait>::Call`
pub fn remove_trait<S: AsRef<str>>(s: S) -> Option<String> {
	static RE: OnceLock<Regex> = OnceLock::new();
	let re = RE.get_or_init(|| {
		Regex::new(r"^<\s*T\s+as\s+[\w:]+(?:<[\w:]+>)?\s*>::(?P<type>\w+)$")
			.expect("Regex expression should be infallible; qed")
	});
	let caps = re.captures(s.as_ref())?;
	caps.name("type").map(|m| m.as_str().to_string())
}

/// Transforms a prefixed type (EX: T::Moment, frame_system::Config::Hash)
/// into a non-prefixed type (Moment, Hash)
pub fn remove_prefix<S: AsRef<str>>(s: S) -> Option<String> {
	static RE: OnceLock<Regex> = OnceLock::new();
	let re = RE.get_or_init(|| Regex::new(r"^(?:\w+::)+(?P<type>\w+)$").expect("Regex expression should be infallible; qed"));
	let caps = re.captures(s.as_ref())?;
	caps.name("type").map(|m| m.as_str().to_string())
}

/// Sanitizes a type name into the form it would have in type definitions
pub fn sanitize_ty(ty: &str) -> Option<String> {
	log::trace!("sanitizing ty {}", ty);
	let ty = ty.trim();
	let ty = remove_lookup(ty).or_else(|| remove_trait(ty)).unwrap_or_else(|| ty.to_string());
	let ty = remove_prefix(&ty).unwrap_or(ty);
	log::trace!("Possibly sanitized type: {}", ty);
	if ty.is_empty() {
		None
	} else {
		Some(ty)
	}
}
