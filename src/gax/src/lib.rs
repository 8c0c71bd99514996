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

//! Google APIs helpers.
//!
//! This crate contains the types and functions used by the data types
//! generated from Google API Discovery documents, such as the Discovery
//! Engine API.
//!
//! <div class="warning">
//! The types in the <code>internal</code> module are <b>not</b> intended for
//! general use. They exist to support the code generator and may change at
//! any time.
//! </div>

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types.
pub mod error;

/// The trait implemented by all the generated messages.
pub mod message;

/// Describes REST methods and expands their path templates.
pub mod path_template;

#[doc(hidden)]
pub mod internal;
