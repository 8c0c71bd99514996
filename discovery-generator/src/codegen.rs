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

//! Emits the Rust code for the data types and the method catalog.
//!
//! The output is meant to be `include!`-ed into a module, so it cannot
//! contain inner attributes.

use crate::Options;
use crate::error::Result;
use crate::methods::MethodDescriptor;
use crate::model::Document;
use crate::schema::{FieldType, StructField, StructSchema, StructSchemas, TypeAlias};
use crate::util::{as_comment, unraw};
use std::fmt::Write;

const LICENSE: &str = "Copyright 2024 Google LLC

Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    https://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.";

/// Generates the data types.
pub fn model(doc: &Document, structs: &StructSchemas, options: &Options) -> Result<String> {
    let mut generator = Generator::new(options);
    generator.header(doc)?;
    for alias in structs.aliases().values() {
        generator.alias(alias)?;
    }
    for schema in structs.structs().values() {
        generator.schema(schema)?;
    }
    tracing::info!(
        "generated {} structs and {} aliases for {}",
        structs.structs().len(),
        structs.aliases().len(),
        doc.id
    );
    Ok(generator.b)
}

/// Generates the method catalog.
pub fn methods(doc: &Document, methods: &[MethodDescriptor], options: &Options) -> Result<String> {
    let mut generator = Generator::new(options);
    generator.header(doc)?;
    generator.endpoints(doc)?;
    for method in methods {
        generator.method(method)?;
    }
    generator.all(methods)?;
    tracing::info!("generated {} methods for {}", methods.len(), doc.id);
    Ok(generator.b)
}

struct Generator<'a> {
    /// An in memory buffer of the code to write out.
    b: String,
    options: &'a Options,
}

impl<'a> Generator<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            b: String::new(),
            options,
        }
    }

    fn gax(&self) -> &'a str {
        &self.options.gax_crate
    }

    fn header(&mut self, doc: &Document) -> Result<()> {
        let text = self.options.header.as_deref().unwrap_or(LICENSE);
        for line in text.lines() {
            if line.is_empty() {
                writeln!(&mut self.b, "//")?;
            } else {
                writeln!(&mut self.b, "// {line}")?;
            }
        }
        writeln!(&mut self.b)?;
        writeln!(
            &mut self.b,
            "// Code generated by discogen from {} {} (revision {}). DO NOT EDIT.",
            doc.name, doc.version, doc.revision
        )?;
        Ok(())
    }

    fn alias(&mut self, alias: &TypeAlias) -> Result<()> {
        tracing::debug!("generating alias {}", alias.name);
        writeln!(&mut self.b)?;
        self.doc("", alias.doc.as_deref());
        writeln!(
            &mut self.b,
            "pub type {} = {};",
            alias.name,
            alias.target.rust_type()
        )?;
        Ok(())
    }

    fn schema(&mut self, schema: &StructSchema) -> Result<()> {
        tracing::debug!("generating struct {}", schema.name);
        self.definition(schema)?;
        self.setters(schema)?;
        self.message(schema)?;
        self.debug(schema)?;
        Ok(())
    }

    fn definition(&mut self, schema: &StructSchema) -> Result<()> {
        writeln!(&mut self.b)?;
        self.doc("", schema.doc.as_deref());
        write!(
            &mut self.b,
            "#[serde_with::serde_as]
#[derive(Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = \"camelCase\")]
#[non_exhaustive]
pub struct {} {{
",
            schema.name
        )?;
        for field in &schema.fields {
            self.field(field)?;
        }
        write!(
            &mut self.b,
            "    #[serde(flatten, skip_serializing_if = \"serde_json::Map::is_empty\")]
    _unknown_fields: serde_json::Map<std::string::String, serde_json::Value>,
}}
"
        )?;
        Ok(())
    }

    fn field(&mut self, field: &StructField) -> Result<()> {
        self.doc("    ", field.doc.as_deref());
        if let Some(wire_name) = field.rename() {
            writeln!(&mut self.b, "    #[serde(rename = {wire_name:?})]")?;
        }
        writeln!(
            &mut self.b,
            "    #[serde(skip_serializing_if = \"std::option::Option::is_none\")]"
        )?;
        if let Some(adapter) = field.field_type.serde_as(self.gax()) {
            writeln!(
                &mut self.b,
                "    #[serde_as(as = \"std::option::Option<{adapter}>\")]"
            )?;
        }
        writeln!(
            &mut self.b,
            "    pub {}: std::option::Option<{}>,\n",
            field.name,
            field_type(field)
        )?;
        Ok(())
    }

    fn setters(&mut self, schema: &StructSchema) -> Result<()> {
        write!(
            &mut self.b,
            "
impl {} {{
    pub fn new() -> Self {{
        std::default::Default::default()
    }}
",
            schema.name
        )?;
        for field in &schema.fields {
            match &field.field_type {
                FieldType::Vec(element) => self.vec_setter(field, element)?,
                FieldType::Map(value) => self.map_setter(field, value)?,
                _ => self.setter(field)?,
            }
            self.set_or_clear(field)?;
        }
        writeln!(&mut self.b, "}}")?;
        Ok(())
    }

    fn setter(&mut self, field: &StructField) -> Result<()> {
        let value = if field.boxed {
            "std::boxed::Box::new(v.into())"
        } else {
            "v.into()"
        };
        write!(
            &mut self.b,
            "
    /// Sets the value of [{short}][Self::{name}].
    pub fn set_{short}<T>(mut self, v: T) -> Self
    where
        T: std::convert::Into<{rust_type}>,
    {{
        self.{name} = std::option::Option::Some({value});
        self
    }}
",
            short = unraw(&field.name),
            name = field.name,
            rust_type = field.field_type.rust_type(),
        )?;
        Ok(())
    }

    fn vec_setter(&mut self, field: &StructField, element: &FieldType) -> Result<()> {
        write!(
            &mut self.b,
            "
    /// Sets the value of [{short}][Self::{name}].
    pub fn set_{short}<T, V>(mut self, v: T) -> Self
    where
        T: std::iter::IntoIterator<Item = V>,
        V: std::convert::Into<{element}>,
    {{
        self.{name} = std::option::Option::Some(v.into_iter().map(|i| i.into()).collect());
        self
    }}
",
            short = unraw(&field.name),
            name = field.name,
            element = element.rust_type(),
        )?;
        Ok(())
    }

    fn map_setter(&mut self, field: &StructField, value: &FieldType) -> Result<()> {
        write!(
            &mut self.b,
            "
    /// Sets the value of [{short}][Self::{name}].
    pub fn set_{short}<T, K, V>(mut self, v: T) -> Self
    where
        T: std::iter::IntoIterator<Item = (K, V)>,
        K: std::convert::Into<std::string::String>,
        V: std::convert::Into<{value}>,
    {{
        self.{name} = std::option::Option::Some(
            v.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        );
        self
    }}
",
            short = unraw(&field.name),
            name = field.name,
            value = value.rust_type(),
        )?;
        Ok(())
    }

    fn set_or_clear(&mut self, field: &StructField) -> Result<()> {
        let value = if field.boxed {
            "v.map(|x| std::boxed::Box::new(x.into()))"
        } else {
            "v.map(|x| x.into())"
        };
        write!(
            &mut self.b,
            "
    /// Sets or clears the value of [{short}][Self::{name}].
    pub fn set_or_clear_{short}<T>(mut self, v: std::option::Option<T>) -> Self
    where
        T: std::convert::Into<{rust_type}>,
    {{
        self.{name} = {value};
        self
    }}
",
            short = unraw(&field.name),
            name = field.name,
            rust_type = field.field_type.rust_type(),
        )?;
        Ok(())
    }

    fn message(&mut self, schema: &StructSchema) -> Result<()> {
        let gax = self.gax();
        write!(
            &mut self.b,
            "
impl {gax}::message::Message for {name} {{
    fn typename() -> &'static str {{
        {typename:?}
    }}

    fn merge(&mut self, other: Self) {{
",
            name = schema.name,
            typename = schema.typename,
        )?;
        for field in &schema.fields {
            write!(
                &mut self.b,
                "        if other.{name}.is_some() {{
            self.{name} = other.{name};
        }}
",
                name = field.name
            )?;
        }
        write!(
            &mut self.b,
            "        self._unknown_fields.extend(other._unknown_fields);
    }}
}}
"
        )?;
        Ok(())
    }

    fn debug(&mut self, schema: &StructSchema) -> Result<()> {
        write!(
            &mut self.b,
            "
impl std::fmt::Debug for {name} {{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{
        let mut debug_struct = f.debug_struct({name:?});
",
            name = schema.name
        )?;
        for field in &schema.fields {
            writeln!(
                &mut self.b,
                "        debug_struct.field({:?}, &self.{});",
                unraw(&field.name),
                field.name
            )?;
        }
        write!(
            &mut self.b,
            "        if !self._unknown_fields.is_empty() {{
            debug_struct.field(\"_unknown_fields\", &self._unknown_fields);
        }}
        debug_struct.finish()
    }}
}}
"
        )?;
        Ok(())
    }

    fn endpoints(&mut self, doc: &Document) -> Result<()> {
        let scopes = doc
            .auth
            .oauth2
            .scopes
            .keys()
            .map(|s| format!("{s:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            &mut self.b,
            "
/// The root URL of the service.
pub const ROOT_URL: &str = {root:?};

/// The root URL of the service, using mutual TLS.
pub const MTLS_ROOT_URL: &str = {mtls:?};

/// The path of the service, relative to the root URL.
pub const SERVICE_PATH: &str = {service:?};

/// The base URL for the method paths.
pub const BASE_URL: &str = {base:?};

/// The OAuth2 scopes used by the service.
pub const DEFAULT_SCOPES: &[&str] = &[{scopes}];
",
            root = doc.root_url,
            mtls = doc.mtls_root_url,
            service = doc.service_path,
            base = format!("{}{}", doc.root_url, doc.service_path),
        )?;
        Ok(())
    }

    fn method(&mut self, method: &MethodDescriptor) -> Result<()> {
        tracing::debug!("generating method {}", method.id);
        writeln!(&mut self.b)?;
        self.doc("", method.description.as_deref());
        let flat_path = match &method.flat_path {
            Some(p) => format!("std::option::Option::Some({p:?})"),
            None => "std::option::Option::None".to_string(),
        };
        let gax = self.gax();
        write!(
            &mut self.b,
            "pub const {name}: {gax}::path_template::Method = {gax}::path_template::Method {{
    id: {id:?},
    http_method: {http_method:?},
    path: {path:?},
    flat_path: {flat_path},
    parameter_order: &[{parameter_order}],
    request: {request},
    response: {response},
    scopes: &[{scopes}],
}};
",
            name = method.const_name,
            id = method.id,
            http_method = method.http_method,
            path = method.path,
            parameter_order = quoted_list(&method.parameter_order),
            request = optional(method.request.as_deref()),
            response = optional(method.response.as_deref()),
            scopes = quoted_list(&method.scopes),
        )?;
        Ok(())
    }

    fn all(&mut self, methods: &[MethodDescriptor]) -> Result<()> {
        let gax = self.gax();
        write!(
            &mut self.b,
            "
/// All the methods in the service, sorted by id.
pub const ALL: &[{gax}::path_template::Method] = &[\n"
        )?;
        for method in methods {
            writeln!(&mut self.b, "    {},", method.const_name)?;
        }
        writeln!(&mut self.b, "];")?;
        Ok(())
    }

    fn doc(&mut self, prefix: &str, doc: Option<&str>) {
        if let Some(doc) = doc {
            self.b.push_str(&as_comment(prefix, doc));
        }
    }
}

fn field_type(field: &StructField) -> String {
    let rust_type = field.field_type.rust_type();
    if field.boxed {
        format!("std::boxed::Box<{rust_type}>")
    } else {
        rust_type
    }
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn optional(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("std::option::Option::Some({v:?})"),
        None => "std::option::Option::None".to_string(),
    }
}
