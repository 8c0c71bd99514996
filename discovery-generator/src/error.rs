// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

/// The errors returned by the generator.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Reading the Discovery document or writing the generated code failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Discovery document is not valid JSON, or does not have the
    /// expected shape.
    #[error("cannot parse the Discovery document: {0}")]
    Json(#[from] serde_json::Error),

    /// A schema uses a construct the generator does not support.
    #[error("unsupported schema `{schema}`: {reason}")]
    Schema { schema: String, reason: String },

    /// A method description is incomplete or conflicts with another method.
    #[error("invalid method `{method}`: {reason}")]
    Method { method: String, reason: String },

    /// Writing into the in-memory code buffer failed.
    #[error("cannot format the generated code: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// The pattern that extracts path template variables did not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema<S: Into<String>, R: Into<String>>(schema: S, reason: R) -> Self {
        Error::Schema {
            schema: schema.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn method<S: Into<String>, R: Into<String>>(method: S, reason: R) -> Self {
        Error::Method {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized [Result][std::result::Result] for the generator.
pub type Result<T> = std::result::Result<T, Error>;
