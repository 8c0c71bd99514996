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

use crate::error::Error;
use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The [Status] type defines a logical error model that is suitable for
/// different programming environments, including REST APIs and RPC APIs. Each
/// [Status] message contains three pieces of data: error code, error message,
/// and error details.
///
/// You can find out more about this error model and how to work with it in the
/// [API Design Guide](https://cloud.google.com/apis/design/errors).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawStatus", into = "RawStatus")]
#[non_exhaustive]
pub struct Status {
    /// The status code.
    pub code: Code,

    /// A developer-facing error message, which should be in English.
    pub message: String,

    /// A list of messages that carry the error details.
    pub details: Vec<StatusDetails>,

    /// The numeric code sent by the service, only when it is not one of the
    /// canonical [Code] values. [code][Status::code] is [Code::Unknown] in
    /// that case.
    pub unknown_code: Option<i32>,
}

/// The wire form of [Status], where `code` is any integer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
struct RawStatus {
    code: i32,
    message: String,
    details: Vec<StatusDetails>,
}

impl From<RawStatus> for Status {
    fn from(value: RawStatus) -> Self {
        let code = Code::from(value.code);
        let unknown_code = (code as i32 != value.code).then_some(value.code);
        Status {
            code,
            message: value.message,
            details: value.details,
            unknown_code,
        }
    }
}

impl From<Status> for RawStatus {
    fn from(value: Status) -> Self {
        RawStatus {
            code: value.unknown_code.unwrap_or(value.code as i32),
            message: value.message,
            details: value.details,
        }
    }
}

impl Status {
    /// Sets the value for [code][Status::code].
    pub fn set_code<T: Into<Code>>(mut self, v: T) -> Self {
        self.code = v.into();
        self.unknown_code = None;
        self
    }

    /// Sets the value for [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Sets the value for [details][Status::details].
    pub fn set_details<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<StatusDetails>,
    {
        self.details = v.into_iter().map(|v| v.into()).collect();
        self
    }

    /// Converts a generated status message into a [Status].
    ///
    /// Long-running operations and import responses embed errors in their
    /// payload, using the `GoogleRpcStatus` schema of the API. This function
    /// converts any message with that JSON shape.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_gax::error::rpc::{Code, Status};
    /// # use google_cloud_gax::message::Message;
    /// # use serde_json::json;
    /// # #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    /// # struct RpcStatus { code: i32, message: String }
    /// # impl Message for RpcStatus {
    /// #     fn typename() -> &'static str { "GoogleRpcStatus" }
    /// #     fn merge(&mut self, other: Self) { *self = other; }
    /// # }
    /// let msg = RpcStatus { code: 5, message: "document not found".into() };
    /// let status = Status::from_message(&msg)?;
    /// assert_eq!(status.code, Code::NotFound);
    /// # Ok::<(), google_cloud_gax::error::Error>(())
    /// ```
    pub fn from_message<M: Message>(msg: &M) -> crate::Result<Self> {
        let value = serde_json::to_value(msg).map_err(Error::serde)?;
        serde_json::from_value(value).map_err(Error::serde)
    }
}

/// The canonical error codes for APIs.
///
/// Sometimes multiple error codes may apply. Services should return the most
/// specific error code that applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Code {
    /// Not an error; returned on success.
    ///
    /// HTTP Mapping: 200 OK
    Ok = 0,

    /// The operation was cancelled, typically by the caller.
    ///
    /// HTTP Mapping: 499 Client Closed Request
    Cancelled = 1,

    /// Unknown error.
    ///
    /// HTTP Mapping: 500 Internal Server Error
    Unknown = 2,

    /// The client specified an invalid argument.
    ///
    /// HTTP Mapping: 400 Bad Request
    InvalidArgument = 3,

    /// The deadline expired before the operation could complete.
    ///
    /// HTTP Mapping: 504 Gateway Timeout
    DeadlineExceeded = 4,

    /// Some requested entity, such as a document or a data store, was not
    /// found.
    ///
    /// HTTP Mapping: 404 Not Found
    NotFound = 5,

    /// The entity that a client attempted to create already exists.
    ///
    /// HTTP Mapping: 409 Conflict
    AlreadyExists = 6,

    /// The caller does not have permission to execute the specified
    /// operation.
    ///
    /// HTTP Mapping: 403 Forbidden
    PermissionDenied = 7,

    /// Some resource has been exhausted, perhaps a per-user quota.
    ///
    /// HTTP Mapping: 429 Too Many Requests
    ResourceExhausted = 8,

    /// The system is not in a state required for the operation's execution.
    ///
    /// HTTP Mapping: 400 Bad Request
    FailedPrecondition = 9,

    /// The operation was aborted, typically due to a concurrency issue.
    ///
    /// HTTP Mapping: 409 Conflict
    Aborted = 10,

    /// The operation was attempted past the valid range.
    ///
    /// HTTP Mapping: 400 Bad Request
    OutOfRange = 11,

    /// The operation is not implemented or is not supported/enabled in this
    /// service.
    ///
    /// HTTP Mapping: 501 Not Implemented
    Unimplemented = 12,

    /// Internal errors.
    ///
    /// HTTP Mapping: 500 Internal Server Error
    Internal = 13,

    /// The service is currently unavailable.
    ///
    /// HTTP Mapping: 503 Service Unavailable
    Unavailable = 14,

    /// Unrecoverable data loss or corruption.
    ///
    /// HTTP Mapping: 500 Internal Server Error
    DataLoss = 15,

    /// The request does not have valid authentication credentials for the
    /// operation.
    ///
    /// HTTP Mapping: 401 Unauthorized
    Unauthenticated = 16,
}

impl Code {
    /// The name of the code, as used in the `status` field of HTTP error
    /// payloads.
    pub fn name(&self) -> &str {
        match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl Default for Code {
    fn default() -> Self {
        Self::Unknown
    }
}

impl From<i32> for Code {
    fn from(value: i32) -> Self {
        match value {
            0 => Code::Ok,
            1 => Code::Cancelled,
            2 => Code::Unknown,
            3 => Code::InvalidArgument,
            4 => Code::DeadlineExceeded,
            5 => Code::NotFound,
            6 => Code::AlreadyExists,
            7 => Code::PermissionDenied,
            8 => Code::ResourceExhausted,
            9 => Code::FailedPrecondition,
            10 => Code::Aborted,
            11 => Code::OutOfRange,
            12 => Code::Unimplemented,
            13 => Code::Internal,
            14 => Code::Unavailable,
            15 => Code::DataLoss,
            16 => Code::Unauthenticated,
            _ => Code::default(),
        }
    }
}

impl From<Code> for String {
    fn from(value: Code) -> String {
        value.name().to_string()
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Code {
    type Error = String;
    fn try_from(value: &str) -> std::result::Result<Code, Self::Error> {
        match value {
            "OK" => Ok(Code::Ok),
            "CANCELLED" => Ok(Code::Cancelled),
            "UNKNOWN" => Ok(Code::Unknown),
            "INVALID_ARGUMENT" => Ok(Code::InvalidArgument),
            "DEADLINE_EXCEEDED" => Ok(Code::DeadlineExceeded),
            "NOT_FOUND" => Ok(Code::NotFound),
            "ALREADY_EXISTS" => Ok(Code::AlreadyExists),
            "PERMISSION_DENIED" => Ok(Code::PermissionDenied),
            "RESOURCE_EXHAUSTED" => Ok(Code::ResourceExhausted),
            "FAILED_PRECONDITION" => Ok(Code::FailedPrecondition),
            "ABORTED" => Ok(Code::Aborted),
            "OUT_OF_RANGE" => Ok(Code::OutOfRange),
            "UNIMPLEMENTED" => Ok(Code::Unimplemented),
            "INTERNAL" => Ok(Code::Internal),
            "UNAVAILABLE" => Ok(Code::Unavailable),
            "DATA_LOSS" => Ok(Code::DataLoss),
            "UNAUTHENTICATED" => Ok(Code::Unauthenticated),
            _ => Err(format!("unknown status code value {value}")),
        }
    }
}

impl Serialize for Code {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(*self as i32)
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Code::from)
    }
}

/// The `{"error": {...}}` envelope used by HTTP error responses.
#[derive(Clone, Debug, Deserialize)]
struct ErrorWrapper {
    error: WrapperStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct WrapperStatus {
    pub code: i32,
    pub message: String,
    pub status: Option<String>,
    pub details: Vec<StatusDetails>,
}

impl From<WrapperStatus> for Status {
    fn from(value: WrapperStatus) -> Self {
        // In the envelope `code` is the HTTP status code, the RPC code is in
        // `status`.
        let code = value
            .status
            .as_deref()
            .and_then(|s| Code::try_from(s).ok())
            .unwrap_or_default();
        Status {
            code,
            message: value.message,
            details: value.details,
            unknown_code: None,
        }
    }
}

impl TryFrom<&bytes::Bytes> for Status {
    type Error = Error;

    /// Parses either an HTTP error envelope or a bare status payload.
    fn try_from(value: &bytes::Bytes) -> std::result::Result<Self, Self::Error> {
        if let Ok(wrapper) = serde_json::from_slice::<ErrorWrapper>(value) {
            return Ok(Status::from(wrapper.error));
        }
        let json = serde_json::from_slice::<serde_json::Value>(value).map_err(Error::serde)?;
        let has_code = json.as_object().is_some_and(|o| o.contains_key("code"));
        if !has_code {
            return Err(Error::serde(format!(
                "expected a JSON object with a status, got {json}"
            )));
        }
        serde_json::from_value::<Status>(json).map_err(Error::serde)
    }
}

/// The type of details associated with [Status].
///
/// Google Cloud services often return a detailed error description. These
/// details can be used to better understand the root cause of the problem.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
#[serde(tag = "@type")]
pub enum StatusDetails {
    #[serde(rename = "type.googleapis.com/google.rpc.BadRequest")]
    BadRequest(BadRequest),
    #[serde(rename = "type.googleapis.com/google.rpc.ErrorInfo")]
    ErrorInfo(ErrorInfo),
    #[serde(rename = "type.googleapis.com/google.rpc.Help")]
    Help(Help),
    #[serde(rename = "type.googleapis.com/google.rpc.LocalizedMessage")]
    LocalizedMessage(LocalizedMessage),
    #[serde(rename = "type.googleapis.com/google.rpc.RetryInfo")]
    RetryInfo(RetryInfo),
    #[serde(untagged)]
    Other(serde_json::Map<String, serde_json::Value>),
}

/// Describes the cause of the error with structured details.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ErrorInfo {
    /// The reason of the error, a constant value in `UPPER_SNAKE_CASE`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// The logical grouping to which the reason belongs.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// Additional structured details about this error.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl ErrorInfo {
    /// Sets the value for [reason][ErrorInfo::reason].
    pub fn set_reason<T: Into<String>>(mut self, v: T) -> Self {
        self.reason = v.into();
        self
    }

    /// Sets the value for [domain][ErrorInfo::domain].
    pub fn set_domain<T: Into<String>>(mut self, v: T) -> Self {
        self.domain = v.into();
        self
    }

    /// Sets the value for [metadata][ErrorInfo::metadata].
    pub fn set_metadata<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// Describes violations in a client request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BadRequest {
    /// Describes all violations in a client request.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_violations: Vec<FieldViolation>,
}

impl BadRequest {
    /// Sets the value for [field_violations][BadRequest::field_violations].
    pub fn set_field_violations<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<FieldViolation>,
    {
        self.field_violations = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// A single bad request field.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FieldViolation {
    /// A path to the field in the request body.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    /// A description of why the request element is bad.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl FieldViolation {
    /// Sets the value for [field][FieldViolation::field].
    pub fn set_field<T: Into<String>>(mut self, v: T) -> Self {
        self.field = v.into();
        self
    }

    /// Sets the value for [description][FieldViolation::description].
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = v.into();
        self
    }
}

/// Provides links to documentation or for performing an out of band action.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Help {
    /// URL(s) pointing to additional information on handling the current error.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Help {
    /// Sets the value for [links][Help::links].
    pub fn set_links<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<Link>,
    {
        self.links = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// Describes a URL link.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Link {
    /// Sets the value for [description][Link::description].
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = v.into();
        self
    }

    /// Sets the value for [url][Link::url].
    pub fn set_url<T: Into<String>>(mut self, v: T) -> Self {
        self.url = v.into();
        self
    }
}

/// A localized error message that is safe to return to the user.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LocalizedMessage {
    /// The locale used following the specification defined in BCP-47.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locale: String,
    /// The localized error message in the above locale.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl LocalizedMessage {
    /// Sets the value for [locale][LocalizedMessage::locale].
    pub fn set_locale<T: Into<String>>(mut self, v: T) -> Self {
        self.locale = v.into();
        self
    }

    /// Sets the value for [message][LocalizedMessage::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }
}

/// Describes when the clients can retry a failed request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RetryInfo {
    /// Clients should wait at least this long between retrying the same
    /// request, in the `google.protobuf.Duration` JSON format (e.g. `"1.5s"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay: Option<String>,
}

impl RetryInfo {
    /// Sets the value for [retry_delay][RetryInfo::retry_delay].
    pub fn set_retry_delay<T: Into<String>>(mut self, v: T) -> Self {
        self.retry_delay = Some(v.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn status_basic_setters() {
        let got = Status::default()
            .set_code(Code::Unimplemented)
            .set_message("test-message");
        let want = Status {
            code: Code::Unimplemented,
            message: "test-message".into(),
            ..Default::default()
        };
        assert_eq!(got, want);

        let got = Status::default()
            .set_code(Code::Unimplemented as i32)
            .set_message("test-message");
        assert_eq!(got, want);
    }

    #[test]
    fn status_detail_setter() {
        let d0 = StatusDetails::ErrorInfo(ErrorInfo::default().set_reason("test-reason"));
        let d1 = StatusDetails::Help(Help::default().set_links([Link::default().set_url("test-url")]));
        let got = Status::default().set_details([d0.clone(), d1.clone()]);
        assert_eq!(got.details, vec![d0, d1]);
    }

    #[test]
    fn serialization_all_variants() -> Result<()> {
        let status = Status {
            code: Code::Unimplemented,
            message: "test".to_string(),
            details: vec![
                StatusDetails::BadRequest(BadRequest::default().set_field_violations([
                    FieldViolation::default()
                        .set_field("document.id")
                        .set_description("must not be empty"),
                ])),
                StatusDetails::ErrorInfo(
                    ErrorInfo::default()
                        .set_reason("reason")
                        .set_domain("discoveryengine.googleapis.com"),
                ),
                StatusDetails::Help(Help::default().set_links([Link::default()
                    .set_description("desc")
                    .set_url("url")])),
                StatusDetails::LocalizedMessage(
                    LocalizedMessage::default()
                        .set_locale("en-US")
                        .set_message("message"),
                ),
                StatusDetails::RetryInfo(RetryInfo::default().set_retry_delay("1s")),
            ],
            unknown_code: None,
        };
        let got = serde_json::to_value(&status)?;
        let want = json!({
            "code": Code::Unimplemented as i32,
            "message": "test",
            "details": [
                {"@type": "type.googleapis.com/google.rpc.BadRequest", "fieldViolations": [{"field": "document.id", "description": "must not be empty"}]},
                {"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "reason", "domain": "discoveryengine.googleapis.com"},
                {"@type": "type.googleapis.com/google.rpc.Help", "links": [{"description": "desc", "url": "url"}]},
                {"@type": "type.googleapis.com/google.rpc.LocalizedMessage", "locale": "en-US", "message": "message"},
                {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "1s"},
            ]
        });
        assert_eq!(got, want);

        let roundtrip = serde_json::from_value::<Status>(got)?;
        assert_eq!(roundtrip, status);
        Ok(())
    }

    #[test]
    fn deserialization_other() -> Result<()> {
        let detail = json!({
            "@type": "type.googleapis.com/google.cloud.discoveryengine.v1.ImportErrorConfig",
            "gcsPrefix": "gs://bucket/errors"
        });
        let input = json!({"code": 3, "message": "bad", "details": [detail.clone()]});
        let got = serde_json::from_value::<Status>(input.clone())?;
        let serde_json::Value::Object(map) = detail else {
            unreachable!("detail is an object");
        };
        assert_eq!(got.details, vec![StatusDetails::Other(map)]);
        assert_eq!(got.code, Code::InvalidArgument);

        let output = serde_json::to_value(&got)?;
        assert_eq!(output, input);
        Ok(())
    }

    // A sample error payload, as returned by the service.
    const SAMPLE_PAYLOAD: &[u8] = b"{\n  \"error\": {\n    \"code\": 400,\n    \"message\": \"Field \\\"document.id\\\" is a required field, but no value is found.\",\n    \"status\": \"INVALID_ARGUMENT\"\n  }\n}\n";
    const INVALID_CODE_PAYLOAD: &[u8] = b"{\n  \"error\": {\n    \"code\": 400,\n    \"message\": \"bad\",\n    \"status\": \"NOT-A-VALID-CODE\"\n  }\n}\n";

    #[test]
    fn deserialize_envelope() -> Result<()> {
        let got = serde_json::from_slice::<ErrorWrapper>(SAMPLE_PAYLOAD)?;
        let want = WrapperStatus {
            code: 400,
            status: Some("INVALID_ARGUMENT".to_string()),
            message: "Field \"document.id\" is a required field, but no value is found.".into(),
            details: Vec::new(),
        };
        assert_eq!(got.error, want);
        Ok(())
    }

    #[test]
    fn try_from_bytes() -> Result<()> {
        let got = Status::try_from(&bytes::Bytes::from_static(SAMPLE_PAYLOAD))?;
        assert_eq!(got.code, Code::InvalidArgument);
        assert!(got.message.contains("document.id"), "{got:?}");

        let got = Status::try_from(&bytes::Bytes::from_static(INVALID_CODE_PAYLOAD))?;
        assert_eq!(got.code, Code::Unknown);

        let got = Status::try_from(&bytes::Bytes::from_static(
            b"{\"code\": 5, \"message\": \"not found\"}",
        ))?;
        assert_eq!(got.code, Code::NotFound);
        assert_eq!(got.message, "not found");
        Ok(())
    }

    #[test_case(b"\"error\": 1234"; "not json")]
    #[test_case(b"<html>Bad Gateway</html>"; "html")]
    #[test_case(b"[1, 2, 3]"; "array")]
    #[test_case(b"1234"; "number")]
    #[test_case(b"{}"; "empty object")]
    #[test_case(b"{\"error\": \"quota exceeded for project\"}"; "error is a string")]
    #[test_case(b"{\"message\": \"upstream timeout\"}"; "object without code")]
    fn try_from_bytes_error(input: &'static [u8]) {
        let got = Status::try_from(&bytes::Bytes::from_static(input));
        let err = got.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Serde, "{err:?}");
    }

    #[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
    #[serde(default)]
    struct FakeRpcStatus {
        code: i32,
        message: String,
        details: Vec<HashMap<String, serde_json::Value>>,
    }

    impl Message for FakeRpcStatus {
        fn typename() -> &'static str {
            "GoogleRpcStatus"
        }
        fn merge(&mut self, other: Self) {
            *self = other;
        }
    }

    #[test]
    fn from_message() -> Result<()> {
        let msg = FakeRpcStatus {
            code: 7,
            message: "permission denied on resource".into(),
            details: vec![HashMap::from([
                (
                    "@type".to_string(),
                    json!("type.googleapis.com/google.rpc.ErrorInfo"),
                ),
                ("reason".to_string(), json!("IAM_PERMISSION_DENIED")),
            ])],
        };
        let got = Status::from_message(&msg)?;
        assert_eq!(got.code, Code::PermissionDenied);
        assert_eq!(got.message, "permission denied on resource");
        assert_eq!(
            got.details,
            vec![StatusDetails::ErrorInfo(
                ErrorInfo::default().set_reason("IAM_PERMISSION_DENIED")
            )]
        );
        Ok(())
    }

    #[test]
    fn from_message_unknown_code() -> Result<()> {
        let msg = FakeRpcStatus {
            code: 42,
            message: "custom failure".into(),
            details: Vec::new(),
        };
        let got = Status::from_message(&msg)?;
        assert_eq!(got.code, Code::Unknown);
        assert_eq!(got.unknown_code, Some(42));
        assert_eq!(got.message, "custom failure");

        let output = serde_json::to_value(&got)?;
        assert_eq!(output, json!({"code": 42, "message": "custom failure", "details": []}));
        Ok(())
    }

    #[test]
    fn canonical_code_has_no_unknown_code() -> Result<()> {
        let got = serde_json::from_value::<Status>(json!({"code": 2, "message": "unknown"}))?;
        assert_eq!(got.code, Code::Unknown);
        assert_eq!(got.unknown_code, None);

        let got = serde_json::from_value::<Status>(json!({"code": 99}))?.set_code(Code::NotFound);
        assert_eq!(got.unknown_code, None);
        assert_eq!(serde_json::to_value(&got)?["code"], json!(5));
        Ok(())
    }

    #[test_case("OK")]
    #[test_case("CANCELLED")]
    #[test_case("UNKNOWN")]
    #[test_case("INVALID_ARGUMENT")]
    #[test_case("DEADLINE_EXCEEDED")]
    #[test_case("NOT_FOUND")]
    #[test_case("ALREADY_EXISTS")]
    #[test_case("PERMISSION_DENIED")]
    #[test_case("RESOURCE_EXHAUSTED")]
    #[test_case("FAILED_PRECONDITION")]
    #[test_case("ABORTED")]
    #[test_case("OUT_OF_RANGE")]
    #[test_case("UNIMPLEMENTED")]
    #[test_case("INTERNAL")]
    #[test_case("UNAVAILABLE")]
    #[test_case("DATA_LOSS")]
    #[test_case("UNAUTHENTICATED")]
    fn code_roundtrip(input: &str) -> Result<()> {
        let code = Code::try_from(input).map_err(anyhow::Error::msg)?;
        assert_eq!(String::from(code), input);
        assert_eq!(&format!("{code}"), input);
        let serialized = serde_json::to_value(code)?;
        assert_eq!(serde_json::from_value::<Code>(serialized)?, code);
        Ok(())
    }

    #[test]
    fn code_try_from_string_error() {
        let err = Code::try_from("INVALID-NOT-A-CODE");
        assert!(
            matches!(&err, Err(s) if s.contains("INVALID-NOT-A-CODE")),
            "expected error in try_from, got {err:?}"
        );
    }

    #[test]
    fn code_deserialize_unknown() -> Result<()> {
        let code = serde_json::from_value::<Code>(json!(-17))?;
        assert_eq!(code, Code::Unknown);
        Ok(())
    }
}
