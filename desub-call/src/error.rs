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


use crate::CallIndex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("{0} cannot be decoded into a call")]
	DecodeShape(String),
	#[error("A call index is exactly 2 bytes, found {0}")]
	MalformedCallIndex(usize),
	#[error(transparent)]
	Codec(#[from] codec::Error),
	#[error("Name Resolution Failure: module={module}, ty={ty}")]
	NameResolution { module: String, ty: String },
	#[error("Variant index {index} does not exist in {ty}")]
	InvalidVariant { index: u8, ty: String },
	#[error("Argument `{0}` is missing from the call")]
	MissingArgument(String),
	#[error("Cannot convert {value} into {ty}")]
	Json { ty: String, value: String },
	#[error("Nested call {0} is not in the registry")]
	UnknownNestedCall(CallIndex),
	#[error("Decoding nests deeper than {0} levels")]
	DepthLimit(usize),
	#[error("Sequence of {len} {ty} takes up no input")]
	SequenceLength { len: usize, ty: String },
	#[error("error: {0}")]
	Fail(String),
}

impl From<&str> for Error {
	fn from(e: &str) -> Error {
		Error::Fail(e.to_string())
	}
}

impl From<String> for Error {
	fn from(e: String) -> Error {
		Error::Fail(e)
	}
}
