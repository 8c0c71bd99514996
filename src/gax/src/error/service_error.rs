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

use crate::error::rpc::Status;
use http::HeaderMap;

/// An error returned by a Google Cloud service.
///
/// Google Cloud services include detailed error information represented by a
/// [Status]. Depending on how the error is received, the error may have a HTTP
/// status code and/or a number of headers associated with them.
///
/// More information about the Google Cloud error model in [AIP-193].
///
/// [AIP-193]: https://google.aip.dev/193
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ServiceError {
    status: Status,
    http_status_code: Option<u16>,
    headers: Option<HeaderMap>,
}

impl ServiceError {
    /// Returns the underlying [Status].
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The HTTP status code, if any, associated with this error.
    ///
    /// Errors embedded in the *payload* of a successful response, such as the
    /// error samples of a document import, have no HTTP status code.
    pub fn http_status_code(&self) -> &Option<u16> {
        &self.http_status_code
    }

    /// The response headers, if any, associated with this error.
    pub fn headers(&self) -> &Option<HeaderMap> {
        &self.headers
    }

    /// Sets the HTTP status code for this service error.
    pub fn with_http_status_code<T: Into<u16>>(mut self, v: T) -> Self {
        self.http_status_code = Some(v.into());
        self
    }

    /// Sets the headers for this error.
    pub fn with_headers<T: Into<HeaderMap>>(mut self, v: T) -> Self {
        self.headers = Some(v.into());
        self
    }
}

impl From<Status> for ServiceError {
    fn from(value: Status) -> Self {
        Self {
            status: value,
            http_status_code: None,
            headers: None,
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "the service returned an error: {:?}", self.status)?;
        if let Some(c) = &self.http_status_code {
            write!(f, ", http_status_code={c}")?;
        }
        if let Some(h) = &self.headers {
            let headers = h
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.to_str().unwrap_or("[error]")))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, ", headers=[{headers}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::rpc::Code;
    use http::HeaderValue;

    fn source() -> Status {
        Status::default()
            .set_code(Code::Aborted)
            .set_message("ABORTED")
    }

    #[test]
    fn from_status() {
        let error = ServiceError::from(source());
        assert_eq!(error.status(), &source());
        assert_eq!(error.http_status_code(), &None);
        assert!(error.headers().is_none());
    }

    #[test]
    fn with_http_details() {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-request-id", HeaderValue::from_static("abc-123"));
        let error = ServiceError::from(source())
            .with_http_status_code(409_u16)
            .with_headers(headers.clone());
        assert_eq!(error.http_status_code(), &Some(409));
        assert_eq!(error.headers(), &Some(headers));

        let got = format!("{error}");
        assert!(got.contains("ABORTED"), "{got}");
        assert!(got.contains("http_status_code=409"), "{got}");
        assert!(got.contains("x-goog-request-id: abc-123"), "{got}");
    }
}
