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


use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	#[error("Could not parse type `{0}`")]
	InvalidType(String),
	#[error("Unexpected type encountered: {0}")]
	UnexpectedType(String),
}

impl From<&str> for Error {
	fn from(e: &str) -> Error {
		Error::InvalidType(e.to_string())
	}
}

impl From<String> for Error {
	fn from(e: String) -> Error {
		Error::InvalidType(e)
	}
}
