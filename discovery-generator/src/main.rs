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
use clap::Parser;
use google_cloud_discovery_generator::{Options, generate, generate_files, parse_document};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "discogen", about = "Generates Rust data types from a Discovery document")]
struct Opt {
    /// Input discovery document file to generate sources from.
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory which contains generated sources, stdout if not present
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The name of the runtime support crate used by the generated code.
    #[arg(long, default_value = "gax")]
    gax_crate: String,

    /// Do not generate the method catalog.
    #[arg(long)]
    skip_methods: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();
    let options = Options {
        gax_crate: opt.gax_crate,
        methods: !opt.skip_methods,
        ..Default::default()
    };
    match opt.output {
        Some(output) => generate_files(&opt.input, &output, &options)
            .with_context(|| format!("generating code for {}", opt.input.display()))?,
        None => {
            let contents = std::fs::read(&opt.input)
                .with_context(|| format!("reading {}", opt.input.display()))?;
            let generated = generate(&parse_document(&contents)?, &options)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(generated.model.as_bytes())?;
            if let Some(methods) = generated.methods {
                stdout.write_all(methods.as_bytes())?;
            }
        }
    }
    Ok(())
}
