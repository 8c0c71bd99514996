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

//! Static descriptions of REST methods and their URI templates.
//!
//! Discovery documents describe each method with a path template such as
//! `v1/{+name}:search`. This module implements the subset of [RFC 6570] used
//! by these templates:
//!
//! * `{var}`: simple expansion, every character outside the unreserved set
//!   is percent-encoded.
//! * `{+var}`: reserved expansion, reserved characters such as `/` and `:` are
//!   kept as-is.
//!
//! [RFC 6570]: https://datatracker.ietf.org/doc/html/rfc6570

use crate::error::Error;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Everything except the unreserved characters: ALPHA / DIGIT / "-" / "." / "_" / "~".
const SIMPLE: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// Keeps the unreserved and reserved characters.
const RESERVED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// The static description of a REST method.
///
/// The generated method catalog contains one constant of this type per method
/// in the Discovery document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Method {
    /// The method id, e.g. `discoveryengine.projects.locations.collections.engines.get`.
    pub id: &'static str,
    /// The HTTP verb.
    pub http_method: &'static str,
    /// The path template, relative to the service base URL.
    pub path: &'static str,
    /// The path template with every resource segment spelled out, if any.
    pub flat_path: Option<&'static str>,
    /// The names of the required parameters, in order.
    pub parameter_order: &'static [&'static str],
    /// The schema id of the request body, if the method has one.
    pub request: Option<&'static str>,
    /// The schema id of the response body, if the method has one.
    pub response: Option<&'static str>,
    /// The OAuth2 scopes accepted by the method.
    pub scopes: &'static [&'static str],
}

impl Method {
    /// Expands the path template of this method with `params`.
    pub fn expand(&self, params: &[(&str, &str)]) -> crate::Result<String> {
        expand(self.path, params)
    }

    /// Returns the full URL for this method, relative to `base_url`.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_gax::path_template::Method;
    /// const GET: Method = Method {
    ///     id: "discoveryengine.projects.operations.get",
    ///     http_method: "GET",
    ///     path: "v1/{+name}",
    ///     flat_path: None,
    ///     parameter_order: &["name"],
    ///     request: None,
    ///     response: Some("GoogleLongrunningOperation"),
    ///     scopes: &[],
    /// };
    /// let url = GET.url(
    ///     "https://discoveryengine.googleapis.com/",
    ///     &[("name", "projects/p/operations/op-1")],
    /// )?;
    /// assert_eq!(url, "https://discoveryengine.googleapis.com/v1/projects/p/operations/op-1");
    /// # Ok::<(), google_cloud_gax::error::Error>(())
    /// ```
    pub fn url(&self, base_url: &str, params: &[(&str, &str)]) -> crate::Result<String> {
        let path = self.expand(params)?;
        if base_url.ends_with('/') {
            Ok(format!("{base_url}{path}"))
        } else {
            Ok(format!("{base_url}/{path}"))
        }
    }
}

/// The errors detected while expanding a template.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("missing required parameter `{0}` in template `{1}`")]
    MissingParameter(String, String),
    #[error("unterminated variable at offset {0} in template `{1}`")]
    Unterminated(usize, String),
    #[error("empty variable name at offset {0} in template `{1}`")]
    EmptyName(usize, String),
}

/// Expands `template` using the values in `params`.
///
/// Fails with an error of kind [ErrorKind::Binding] if a variable has no value
/// or the template is malformed.
///
/// [ErrorKind::Binding]: crate::error::ErrorKind::Binding
pub fn expand(template: &str, params: &[(&str, &str)]) -> crate::Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let offset = template.len() - rest.len() + start;
        let Some(len) = rest[start..].find('}') else {
            return Err(Error::binding(TemplateError::Unterminated(
                offset,
                template.to_string(),
            )));
        };
        let variable = &rest[start + 1..start + len];
        let (name, set) = match variable.strip_prefix('+') {
            Some(name) => (name, RESERVED),
            None => (variable, SIMPLE),
        };
        if name.is_empty() {
            return Err(Error::binding(TemplateError::EmptyName(
                offset,
                template.to_string(),
            )));
        }
        let Some((_, value)) = params.iter().find(|(k, _)| *k == name) else {
            return Err(Error::binding(TemplateError::MissingParameter(
                name.to_string(),
                template.to_string(),
            )));
        };
        output.extend(utf8_percent_encode(value, set));
        rest = &rest[start + len + 1..];
    }
    output.push_str(rest);
    tracing::debug!("expanded {template} to {output}");
    Ok(output)
}
