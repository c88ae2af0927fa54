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


//! Decode runtime calls (`section.method(args)`) whose argument types are only
//! known from metadata supplied at runtime.
//!
//! A [`CallRegistry`] is filled from a metadata [`catalog`]. The [`CallDecoder`]
//! accepts a call as hex, raw bytes or an already structured value, looks up
//! the function in the registry and decodes the arguments with the help of a
//! [`TypeDetective`](desub_call_types::TypeDetective) into a [`GenericCall`].

#![forbid(unsafe_code)]

mod args_def;
mod call;
mod call_index;
pub mod catalog;
mod decoder;
mod error;
mod metadata;
mod registry;
#[cfg(test)]
mod test_suite;
pub mod util;

pub use self::args_def::{filter_origin, resolve_args_def, ArgsDef};
pub use self::call::GenericCall;
pub use self::call_index::CallIndex;
pub use self::catalog::MetadataError;
pub use self::decoder::{CallDecoder, CallInput, DecodedMethod, RawArgs};
pub use self::error::Error;
pub use self::metadata::{CallFunction, FunctionArgumentMetadata, FunctionMetadata, Methods, ModulesWithMethods};
pub use self::registry::CallRegistry;

pub use desub_call_types::{self as types, FieldValue, RustTypeMarker, SubstrateType, TypeDetective};
#[cfg(feature = "json-resolver")]
pub use desub_call_json_resolver::{self as json_resolver, TypeResolver};
