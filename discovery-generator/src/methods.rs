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

//! Collects the methods in a Discovery document.

use crate::error::{Error, Result};
use crate::model::{Document, Method, Resource};
use crate::util::to_screaming_snake;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// A method, ready to be emitted as a constant in the method catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDescriptor {
    pub id: String,
    /// The name of the generated constant.
    pub const_name: String,
    pub http_method: String,
    pub path: String,
    pub flat_path: Option<String>,
    pub parameter_order: Vec<String>,
    /// The schema id of the request body.
    pub request: Option<String>,
    /// The schema id of the response body.
    pub response: Option<String>,
    pub scopes: Vec<String>,
    pub description: Option<String>,
}

/// Returns all the methods in `doc`, including the methods of nested
/// resources, sorted by id.
pub fn collect(doc: &Document) -> Result<Vec<MethodDescriptor>> {
    let variables = Regex::new(r"\{\+?([A-Za-z0-9_]+)\}")?;
    let mut collector = Collector {
        prefix: format!("{}.", doc.name),
        variables,
        names: BTreeMap::new(),
        output: Vec::new(),
    };
    collector.methods(&doc.methods)?;
    collector.resources(&doc.resources)?;
    let mut output = collector.output;
    output.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(output)
}

struct Collector {
    prefix: String,
    variables: Regex,
    /// The constant names already in use, and the method that uses them.
    names: BTreeMap<String, String>,
    output: Vec<MethodDescriptor>,
}

impl Collector {
    fn resources(&mut self, resources: &BTreeMap<String, Resource>) -> Result<()> {
        for resource in resources.values() {
            self.methods(&resource.methods)?;
            self.resources(&resource.resources)?;
        }
        Ok(())
    }

    fn methods(&mut self, methods: &BTreeMap<String, Method>) -> Result<()> {
        for (key, method) in methods {
            let descriptor = self.descriptor(key, method)?;
            tracing::debug!("collected method {}", descriptor.id);
            if let Some(previous) = self
                .names
                .insert(descriptor.const_name.clone(), descriptor.id.clone())
            {
                return Err(Error::method(
                    &descriptor.id,
                    format!(
                        "the constant name `{}` is also used by `{previous}`",
                        descriptor.const_name
                    ),
                ));
            }
            self.output.push(descriptor);
        }
        Ok(())
    }

    fn descriptor(&self, key: &str, method: &Method) -> Result<MethodDescriptor> {
        let id = method
            .id
            .clone()
            .ok_or_else(|| Error::method(key, "missing `id`"))?;
        let path = method
            .path
            .clone()
            .ok_or_else(|| Error::method(&id, "missing `path`"))?;
        let http_method = method
            .http_method
            .clone()
            .ok_or_else(|| Error::method(&id, "missing `httpMethod`"))?;
        for captures in self.variables.captures_iter(&path) {
            let name = &captures[1];
            match method.parameters.get(name) {
                Some(p) if p.location == "path" => {}
                Some(p) => {
                    return Err(Error::method(
                        &id,
                        format!("the path variable `{name}` is a `{}` parameter", p.location),
                    ));
                }
                None => {
                    return Err(Error::method(
                        &id,
                        format!("the path variable `{name}` is not a parameter"),
                    ));
                }
            }
        }
        let declared = method.parameters.keys().collect::<BTreeSet<_>>();
        if let Some(p) = method
            .parameter_order
            .iter()
            .find(|p| !declared.contains(p))
        {
            return Err(Error::method(
                &id,
                format!("`parameterOrder` names the unknown parameter `{p}`"),
            ));
        }
        let suffix = id.strip_prefix(&self.prefix).unwrap_or(&id);
        Ok(MethodDescriptor {
            const_name: to_screaming_snake(suffix),
            http_method,
            path,
            flat_path: method.flat_path.clone(),
            parameter_order: method.parameter_order.clone(),
            request: method.request.as_ref().and_then(|s| s.schema_ref.clone()),
            response: method.response.as_ref().and_then(|s| s.schema_ref.clone()),
            scopes: method.scopes.clone(),
            description: method.description.clone(),
            id,
        })
    }
}
