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

use anyhow::{Context, Result};
use google_cloud_discovery_generator::{Options, generate_files};
use std::path::PathBuf;

const DOCUMENT: &str = "discovery/discoveryengine-v1.json";

fn main() -> Result<()> {
    println!("cargo::rerun-if-changed={DOCUMENT}");
    println!("cargo::rerun-if-changed=build.rs");
    let output = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR is not set")?);
    generate_files(DOCUMENT, &output, &Options::default())
        .with_context(|| format!("generating code from {DOCUMENT}"))?;
    Ok(())
}
