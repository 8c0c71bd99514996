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

//! This module is used to build up the Discovery schema structs.
//!
//! The Discovery schemas are converted into an intermediate representation
//! that is easier to generate code from:
//!
//! * Each `object` schema with properties becomes a [StructSchema]. Objects
//!   defined inline in a property also become a [StructSchema], named after
//!   the containing struct and the property.
//! * Other top-level schemas become a [TypeAlias].
//! * Fields that would make a struct contain itself by value are boxed.

use crate::error::{Error, Result};
use crate::model::Schema;
use crate::util::{rust_field_name, serde_camel_case, to_pascal};
use std::collections::{BTreeMap, BTreeSet};

/// The Rust representation of a field, or of the element of a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// A `format: byte` string, base64-encoded on the wire.
    Bytes,
    Int32,
    UInt32,
    /// A `format: int64` value, a decimal string on the wire.
    Int64,
    /// A `format: uint64` value, a decimal string on the wire.
    UInt64,
    Float32,
    Float64,
    Bool,
    /// Any JSON value.
    Any,
    /// One of the generated structs.
    Message(String),
    Vec(Box<FieldType>),
    /// A map with string keys.
    Map(Box<FieldType>),
}

impl FieldType {
    /// The Rust type for this field, without the `Option<>` wrapper.
    pub fn rust_type(&self) -> String {
        match self {
            FieldType::String => "std::string::String".to_string(),
            FieldType::Bytes => "bytes::Bytes".to_string(),
            FieldType::Int32 => "i32".to_string(),
            FieldType::UInt32 => "u32".to_string(),
            FieldType::Int64 => "i64".to_string(),
            FieldType::UInt64 => "u64".to_string(),
            FieldType::Float32 => "f32".to_string(),
            FieldType::Float64 => "f64".to_string(),
            FieldType::Bool => "bool".to_string(),
            FieldType::Any => "serde_json::Value".to_string(),
            FieldType::Message(name) => name.clone(),
            FieldType::Vec(t) => format!("std::vec::Vec<{}>", t.rust_type()),
            FieldType::Map(t) => format!(
                "std::collections::HashMap<std::string::String, {}>",
                t.rust_type()
            ),
        }
    }

    /// The `serde_with` adapter for this type, if it needs one.
    ///
    /// `gax` is the path of the runtime support crate in the generated code.
    pub fn serde_as(&self, gax: &str) -> Option<String> {
        match self {
            FieldType::Int64 => Some(format!("{gax}::internal::I64")),
            FieldType::UInt64 => Some(format!("{gax}::internal::U64")),
            FieldType::Bytes => Some(format!("{gax}::internal::Base64")),
            FieldType::Vec(t) => t.serde_as(gax).map(|a| format!("std::vec::Vec<{a}>")),
            FieldType::Map(t) => t
                .serde_as(gax)
                .map(|a| format!("std::collections::HashMap<_, {a}>")),
            _ => None,
        }
    }

    /// The name of the struct contained by value, if any.
    ///
    /// Structs inside a `Vec` or a `HashMap` are heap allocated and do not
    /// count.
    pub fn direct_message(&self) -> Option<&str> {
        match self {
            FieldType::Message(name) => Some(name),
            _ => None,
        }
    }
}

/// Represents a request/response struct and all of its fields.
#[derive(Clone, Debug, Default)]
pub struct StructSchema {
    /// The Rust name of the struct.
    pub name: String,
    /// The value returned by `Message::typename()`.
    pub typename: String,
    pub doc: Option<String>,
    /// The fields, sorted by their JSON name.
    pub fields: Vec<StructField>,
}

/// Represents the fields of a request/response struct.
#[derive(Clone, Debug)]
pub struct StructField {
    /// The Rust identifier, possibly a raw identifier such as `r#type`.
    pub name: String,
    /// The JSON property name.
    pub wire_name: String,
    pub field_type: FieldType,
    pub doc: Option<String>,
    /// If true, the field type is `Option<Box<T>>` instead of `Option<T>`.
    pub boxed: bool,
}

impl StructField {
    /// The explicit `#[serde(rename)]` needed for this field, if any.
    ///
    /// Most fields round-trip through serde's `camelCase` rule, those that do
    /// not need an explicit rename.
    pub fn rename(&self) -> Option<&str> {
        if serde_camel_case(&self.name) == self.wire_name {
            None
        } else {
            Some(&self.wire_name)
        }
    }
}

/// A top-level schema that is not an object, e.g. a string with an `enum`.
#[derive(Clone, Debug)]
pub struct TypeAlias {
    pub name: String,
    pub doc: Option<String>,
    pub target: FieldType,
}

/// Represents a mapping of all the types needed to represent the API
/// messages.
#[derive(Debug, Default)]
pub struct StructSchemas {
    pub structs: BTreeMap<String, StructSchema>,
    pub aliases: BTreeMap<String, TypeAlias>,
}

impl StructSchemas {
    /// Getter for structs.
    pub fn structs(&self) -> &BTreeMap<String, StructSchema> {
        &self.structs
    }

    /// Getter for aliases.
    pub fn aliases(&self) -> &BTreeMap<String, TypeAlias> {
        &self.aliases
    }
}

/// Processes all the schemas to build up a mapping of the structs that will
/// need to be generated to represent them.
pub fn schema_structs(schemas: &BTreeMap<String, Schema>) -> Result<StructSchemas> {
    let mut builder = Builder {
        schemas,
        reserved: schemas.keys().map(|k| type_name(k)).collect(),
        typenames: BTreeMap::new(),
        aliases: BTreeMap::new(),
        resolving: BTreeSet::new(),
        output: StructSchemas::default(),
    };
    for (id, schema) in schemas {
        if is_struct(schema) {
            tracing::debug!("processing schema {id}");
            builder.add_struct(&type_name(id), id, schema)?;
        } else {
            tracing::debug!("processing alias {id}");
            let target = builder.resolve_alias(id)?;
            let name = type_name(id);
            builder.output.aliases.insert(
                name.clone(),
                TypeAlias {
                    name,
                    doc: field_doc(schema),
                    target,
                },
            );
        }
    }
    let mut output = builder.output;
    box_cycles(&mut output);
    Ok(output)
}

struct Builder<'a> {
    schemas: &'a BTreeMap<String, Schema>,
    /// Names already taken by a struct or an alias.
    reserved: BTreeSet<String>,
    typenames: BTreeMap<String, String>,
    aliases: BTreeMap<String, FieldType>,
    /// Aliases being resolved, to detect loops.
    resolving: BTreeSet<String>,
    output: StructSchemas,
}

impl Builder<'_> {
    fn add_struct(&mut self, name: &str, typename: &str, schema: &Schema) -> Result<()> {
        self.typenames
            .insert(name.to_string(), typename.to_string());
        let mut used = BTreeSet::from(["_unknown_fields".to_string()]);
        let mut fields = Vec::with_capacity(schema.properties.len());
        for (wire_name, prop) in &schema.properties {
            let mut field_name = rust_field_name(wire_name);
            while !used.insert(field_name.clone()) {
                field_name.push('_');
            }
            let field_type = self.field_type(name, wire_name, prop)?;
            fields.push(StructField {
                name: field_name,
                wire_name: wire_name.clone(),
                field_type,
                doc: field_doc(prop),
                boxed: false,
            });
        }
        self.output.structs.insert(
            name.to_string(),
            StructSchema {
                name: name.to_string(),
                typename: typename.to_string(),
                doc: schema.description.clone(),
                fields,
            },
        );
        Ok(())
    }

    fn field_type(&mut self, parent: &str, prop: &str, schema: &Schema) -> Result<FieldType> {
        let context = || format!("{parent}.{prop}");
        if let Some(r) = &schema.schema_ref {
            return self.resolve_ref(&context(), r);
        }
        let Some(schema_type) = schema.schema_type.as_deref() else {
            if !schema.properties.is_empty() {
                return self.nested(parent, prop, schema);
            }
            return Err(Error::schema(context(), "neither `type` nor `$ref` are set"));
        };
        let format = schema.format.as_deref();
        let field_type = match (schema_type, format) {
            ("string", Some("byte")) => FieldType::Bytes,
            ("string", Some("int64")) => FieldType::Int64,
            ("string", Some("uint64")) => FieldType::UInt64,
            ("string", None) => FieldType::String,
            ("string", Some(f)) if STRING_FORMATS.contains(&f) => FieldType::String,
            ("integer", None | Some("int32")) => FieldType::Int32,
            ("integer", Some("uint32")) => FieldType::UInt32,
            ("integer", Some("int64")) => FieldType::Int64,
            ("integer", Some("uint64")) => FieldType::UInt64,
            ("number", None | Some("double")) => FieldType::Float64,
            ("number", Some("float")) => FieldType::Float32,
            ("boolean", _) => FieldType::Bool,
            ("any", _) => FieldType::Any,
            ("array", _) => {
                let items = schema
                    .items
                    .as_deref()
                    .ok_or_else(|| Error::schema(context(), "array without `items`"))?;
                FieldType::Vec(Box::new(self.field_type(parent, prop, items)?))
            }
            ("object", _) if !schema.properties.is_empty() => {
                return self.nested(parent, prop, schema);
            }
            ("object", _) => match schema.additional_properties.as_deref() {
                Some(value) => FieldType::Map(Box::new(self.field_type(parent, prop, value)?)),
                None => FieldType::Map(Box::new(FieldType::Any)),
            },
            ("string", Some(f)) => {
                tracing::warn!("unknown string format `{f}` in {}, using String", context());
                FieldType::String
            }
            ("integer", Some(f)) => {
                tracing::warn!("unknown integer format `{f}` in {}, using i32", context());
                FieldType::Int32
            }
            ("number", Some(f)) => {
                tracing::warn!("unknown number format `{f}` in {}, using f64", context());
                FieldType::Float64
            }
            (t, _) => {
                return Err(Error::schema(context(), format!("unknown type `{t}`")));
            }
        };
        Ok(field_type)
    }

    fn nested(&mut self, parent: &str, prop: &str, schema: &Schema) -> Result<FieldType> {
        let mut name = format!("{parent}{}", to_pascal(prop));
        while self.reserved.contains(&name) {
            name.push_str("Nested");
        }
        self.reserved.insert(name.clone());
        let parent_typename = self
            .typenames
            .get(parent)
            .cloned()
            .unwrap_or_else(|| parent.to_string());
        let typename = format!("{parent_typename}.{prop}");
        tracing::debug!("processing inline schema {typename} as {name}");
        self.add_struct(&name, &typename, schema)?;
        Ok(FieldType::Message(name))
    }

    fn resolve_ref(&mut self, context: &str, reference: &str) -> Result<FieldType> {
        let Some(target) = self.schemas.get(reference) else {
            return Err(Error::schema(
                context,
                format!("reference to unknown schema `{reference}`"),
            ));
        };
        if is_struct(target) {
            return Ok(FieldType::Message(type_name(reference)));
        }
        // Use the aliased type directly, the wire encoding depends on it.
        self.resolve_alias(reference)
    }

    fn resolve_alias(&mut self, id: &str) -> Result<FieldType> {
        if let Some(t) = self.aliases.get(id) {
            return Ok(t.clone());
        }
        let Some(schema) = self.schemas.get(id) else {
            return Err(Error::schema(id, "reference to unknown schema"));
        };
        if !self.resolving.insert(id.to_string()) {
            return Err(Error::schema(id, "the schema is defined in terms of itself"));
        }
        let resolved = self.field_type(&type_name(id), "Item", schema);
        self.resolving.remove(id);
        let resolved = resolved?;
        self.aliases.insert(id.to_string(), resolved.clone());
        Ok(resolved)
    }
}

/// The formats for string fields that are kept as `String`.
const STRING_FORMATS: &[&str] = &[
    "date-time",
    "google-datetime",
    "google-duration",
    "google-fieldmask",
    "date",
];

/// Schemas that become a struct.
fn is_struct(schema: &Schema) -> bool {
    if schema.schema_ref.is_some() {
        return false;
    }
    if !schema.properties.is_empty() {
        return true;
    }
    schema.schema_type.as_deref() == Some("object") && schema.additional_properties.is_none()
}

/// The Rust name for a schema id.
///
/// Schema ids are almost always valid identifiers, this only changes the
/// unusual ones, e.g. ids with a `.`.
fn type_name(id: &str) -> String {
    let valid = id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && id.starts_with(|c: char| c.is_ascii_alphabetic());
    if valid {
        id.to_string()
    } else {
        to_pascal(id)
    }
}

/// The documentation for a field: its description and the enum values.
fn field_doc(schema: &Schema) -> Option<String> {
    let mut doc = schema.description.clone().unwrap_or_default();
    let values = if schema.schema_enum.is_empty() {
        schema.items.as_deref()
    } else {
        Some(schema)
    };
    if let Some(values) = values.filter(|s| !s.schema_enum.is_empty()) {
        if !doc.is_empty() {
            doc.push_str("\n\n");
        }
        doc.push_str("Possible values:");
        for (i, v) in values.schema_enum.iter().enumerate() {
            match values.schema_enum_desc.get(i).filter(|d| !d.is_empty()) {
                Some(d) => doc.push_str(&format!("\n* `{v}`: {d}")),
                None => doc.push_str(&format!("\n* `{v}`")),
            }
        }
    }
    if schema.deprecated {
        if !doc.is_empty() {
            doc.push_str("\n\n");
        }
        doc.push_str("This field is deprecated.");
    }
    (!doc.is_empty()).then_some(doc)
}

/// Box the fields that make a struct contain itself by value.
///
/// A field of type `T` in struct `S` is boxed if `T` can reach `S` following
/// only fields contained by value.
fn box_cycles(output: &mut StructSchemas) {
    let edges = output
        .structs
        .iter()
        .map(|(name, s)| {
            let targets = s
                .fields
                .iter()
                .filter_map(|f| f.field_type.direct_message())
                .map(str::to_string)
                .collect::<BTreeSet<_>>();
            (name.clone(), targets)
        })
        .collect::<BTreeMap<_, _>>();
    for s in output.structs.values_mut() {
        let name = s.name.clone();
        for field in s.fields.iter_mut() {
            let boxed = field
                .field_type
                .direct_message()
                .is_some_and(|target| reaches(&edges, target, &name));
            if boxed {
                tracing::debug!("boxing {name}.{} to break a cycle", field.name);
            }
            field.boxed = boxed;
        }
    }
}

fn reaches(edges: &BTreeMap<String, BTreeSet<String>>, from: &str, to: &str) -> bool {
    let mut visited = BTreeSet::new();
    let mut pending = vec![from];
    while let Some(current) = pending.pop() {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = edges.get(current) {
            pending.extend(next.iter().map(String::as_str));
        }
    }
    false
}
