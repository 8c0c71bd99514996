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

//! This module contains the mappings for a JSON Discovery document.
//!
//! Only the keys used by the generator are mapped, all others are ignored.
//! Most keys are optional in practice, so they default to empty values.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub version: String,
    pub title: String,
    pub description: String,
    pub root_url: String,
    pub mtls_root_url: String,
    pub service_path: String,
    pub base_path: String,
    pub documentation_link: String,
    pub revision: String,
    pub auth: Auth,
    pub methods: BTreeMap<String, Method>,
    pub schemas: BTreeMap<String, Schema>,
    pub resources: BTreeMap<String, Resource>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Auth {
    pub oauth2: OAuth2,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OAuth2 {
    pub scopes: BTreeMap<String, ScopeDesc>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScopeDesc {
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Method {
    pub id: Option<String>,
    pub path: Option<String>,
    pub flat_path: Option<String>,
    pub http_method: Option<String>,
    pub description: Option<String>,
    pub parameters: BTreeMap<String, Parameter>,
    pub parameter_order: Vec<String>,
    pub request: Option<Schema>,
    pub response: Option<Schema>,
    pub scopes: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(flatten)]
    pub schema: Schema,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default)]
    pub location: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,
    pub properties: BTreeMap<String, Schema>,
    pub items: Option<Box<Schema>>,
    pub additional_properties: Option<Box<Schema>>,
    #[serde(rename = "$ref")]
    pub schema_ref: Option<String>,
    pub pattern: Option<String>,
    #[serde(rename = "enum")]
    pub schema_enum: Vec<String>,
    #[serde(rename = "enumDescriptions")]
    pub schema_enum_desc: Vec<String>,
    pub read_only: bool,
    pub deprecated: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    pub methods: BTreeMap<String, Method>,
    pub resources: BTreeMap<String, Resource>,
}
