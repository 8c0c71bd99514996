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

//! Generates Rust data types from a Discovery document.
//!
//! The generator reads a [Discovery document] and produces two files:
//!
//! * `model.rs`: one struct per object schema, with builder-style setters and
//!   an implementation of the `Message` trait.
//! * `methods.rs`: the service endpoints and one constant per REST method.
//!
//! The generated code is meant to be included in a crate using `include!`,
//! typically from a build script:
//!
//! ```no_run
//! # fn main() -> Result<(), google_cloud_discovery_generator::Error> {
//! let options = google_cloud_discovery_generator::Options::default();
//! google_cloud_discovery_generator::generate_files(
//!     "discovery/discoveryengine-v1.json",
//!     "target/generated",
//!     &options,
//! )?;
//! # Ok(()) }
//! ```
//!
//! [Discovery document]: https://developers.google.com/discovery/v1/reference/apis

pub mod codegen;
mod error;
pub mod methods;
pub mod model;
pub mod schema;
pub mod util;

pub use error::{Error, Result};

use std::path::Path;

/// Configure the code generation.
#[derive(Clone, Debug)]
pub struct Options {
    /// The name of the runtime support crate, as seen from the generated code.
    pub gax_crate: String,
    /// If false, `methods.rs` is not generated.
    pub methods: bool,
    /// Replaces the license text at the top of each generated file.
    pub header: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            gax_crate: "gax".to_string(),
            methods: true,
            header: None,
        }
    }
}

/// The generated code.
#[derive(Clone, Debug, Default)]
pub struct Generated {
    /// The contents of `model.rs`.
    pub model: String,
    /// The contents of `methods.rs`, if requested.
    pub methods: Option<String>,
}

/// Parses a Discovery document.
pub fn parse_document(contents: &[u8]) -> Result<model::Document> {
    let doc = serde_json::from_slice::<model::Document>(contents)?;
    tracing::info!(
        "parsed Discovery document {} with {} schemas",
        doc.id,
        doc.schemas.len()
    );
    Ok(doc)
}

/// Generates the code for `doc`.
pub fn generate(doc: &model::Document, options: &Options) -> Result<Generated> {
    let structs = schema::schema_structs(&doc.schemas)?;
    let model = codegen::model(doc, &structs, options)?;
    let methods = if options.methods {
        let descriptors = methods::collect(doc)?;
        Some(codegen::methods(doc, &descriptors, options)?)
    } else {
        None
    };
    Ok(Generated { model, methods })
}

/// Reads the Discovery document in `input` and writes the generated files
/// into the `output` directory.
///
/// The output directory is created if needed.
pub fn generate_files<I, O>(input: I, output: O, options: &Options) -> Result<()>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();
    let contents = std::fs::read(input).map_err(|e| Error::io(input, e))?;
    let generated = generate(&parse_document(&contents)?, options)?;
    std::fs::create_dir_all(output).map_err(|e| Error::io(output, e))?;
    write_file(&output.join("model.rs"), &generated.model)?;
    if let Some(methods) = &generated.methods {
        write_file(&output.join("methods.rs"), methods)?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}
