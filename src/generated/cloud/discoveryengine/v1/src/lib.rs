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

//! Google Cloud Client Libraries for Rust - Discovery Engine API
//!
//! This crate contains the data types of the [Discovery Engine API], also
//! known as Vertex AI Search. The types are generated at build time from the
//! API's Discovery document.
//!
//! * [model]: one struct per schema in the Discovery document. All fields are
//!   optional. The types serialize to and from the JSON wire format using
//!   [serde].
//! * [methods]: the service endpoints and a static description of each REST
//!   method.
//!
//! This crate does not send requests. Use the descriptors in [methods] to
//! build the request URLs, and [gax::error::Error::from_http_response] to turn
//! failed responses into errors.
//!
//! [Discovery Engine API]: https://cloud.google.com/generative-ai-app-builder/docs/

pub use gax::Result;
pub use gax::error::Error;

/// The data types of the Discovery Engine API.
#[allow(rustdoc::bare_urls)]
#[allow(rustdoc::broken_intra_doc_links)]
#[allow(rustdoc::invalid_html_tags)]
pub mod model {
    include!(concat!(env!("OUT_DIR"), "/model.rs"));
}

/// The REST methods of the Discovery Engine API.
#[allow(rustdoc::bare_urls)]
#[allow(rustdoc::broken_intra_doc_links)]
pub mod methods {
    include!(concat!(env!("OUT_DIR"), "/methods.rs"));
}
