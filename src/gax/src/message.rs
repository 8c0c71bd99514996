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

//! Define traits required of all messages.

use crate::error::Error;

/// The JSON object representation of a message.
pub type Map = serde_json::Map<String, serde_json::Value>;

/// A trait implemented by all the generated data types.
///
/// The generated types are plain data. Besides the builder-style setters on
/// each type, this trait offers two ways to change a message in place:
/// [merge][Message::merge] for typed partial updates, and
/// [update][Message::update] for updates expressed in the JSON wire names.
///
/// # Example
/// ```
/// # use google_cloud_gax::message::Message;
/// # use serde_json::json;
/// # #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
/// # #[serde(default, rename_all = "camelCase")]
/// # struct Document { id: Option<String>, schema_id: Option<String> }
/// # impl Message for Document {
/// #     fn typename() -> &'static str { "Document" }
/// #     fn merge(&mut self, other: Self) {
/// #         if other.id.is_some() { self.id = other.id; }
/// #         if other.schema_id.is_some() { self.schema_id = other.schema_id; }
/// #     }
/// # }
/// let json = json!({"id": "doc1", "schemaId": "default_schema"});
/// let serde_json::Value::Object(fields) = json else { unreachable!() };
/// let mut doc = Document::from_fields(fields)?;
///
/// let json = json!({"schemaId": null});
/// let serde_json::Value::Object(fields) = json else { unreachable!() };
/// doc.update(fields)?;
/// assert_eq!(doc.id.as_deref(), Some("doc1"));
/// assert_eq!(doc.schema_id, None);
/// # Ok::<(), google_cloud_gax::error::Error>(())
/// ```
pub trait Message:
    Clone + Default + PartialEq + serde::ser::Serialize + serde::de::DeserializeOwned
{
    /// The typename of this message, the schema id in the Discovery document.
    fn typename() -> &'static str;

    /// Overwrites the fields set in `other`.
    ///
    /// Fields that are not set in `other` keep their current value. Unknown
    /// fields are combined, with the values in `other` taking precedence.
    fn merge(&mut self, other: Self);

    /// Creates a message from its JSON fields.
    ///
    /// The keys are the JSON (camelCase) property names. Properties that are
    /// not mentioned stay unset.
    fn from_fields(fields: Map) -> crate::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(fields)).map_err(|e| {
            Error::serde(format!(
                "cannot create {} from its fields: {e}",
                Self::typename()
            ))
        })
    }

    /// Returns the JSON fields of this message.
    ///
    /// Unset fields are not included.
    fn to_fields(&self) -> crate::Result<Map> {
        match serde_json::to_value(self).map_err(Error::serde)? {
            serde_json::Value::Object(map) => Ok(map),
            v => Err(Error::serde(format!(
                "expected {} to serialize as a JSON object, got {v}",
                Self::typename()
            ))),
        }
    }

    /// Overwrites only the fields mentioned in `fields`.
    ///
    /// The keys are the JSON (camelCase) property names. A key mapped to
    /// `null` clears the field. On error the message is not modified.
    fn update(&mut self, fields: Map) -> crate::Result<()> {
        let mut current = self.to_fields()?;
        for (k, v) in fields {
            match v {
                serde_json::Value::Null => {
                    current.remove(&k);
                }
                v => {
                    current.insert(k, v);
                }
            }
        }
        *self = Self::from_fields(current)?;
        Ok(())
    }
}
