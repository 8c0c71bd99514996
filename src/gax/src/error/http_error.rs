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

use bytes::Bytes;
use http::HeaderMap;

/// An error describing a non-2xx HTTP response without a [Status] payload.
///
/// [Status]: crate::error::rpc::Status
#[derive(Debug, Default, Clone)]
pub struct HttpError {
    status_code: u16,
    payload: Option<Bytes>,
    headers: HeaderMap,
}

impl HttpError {
    /// Creates a new [HttpError] with the given status code, headers, and payload.
    pub fn new(status_code: u16, headers: HeaderMap, payload: Option<Bytes>) -> Self {
        Self {
            status_code,
            headers,
            payload,
        }
    }

    /// Returns the status code associated with the HTTP error response.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns a reference to the payload associated with the HTTP error
    /// response.
    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// Returns a reference to the headers associated with the HTTP error
    /// response.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HTTP Error: code={}, headers={:?}",
            self.status_code, self.headers
        )?;
        if let Some(payload) = self.payload() {
            write!(f, ", payload:\n{payload:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/html"));
        headers
    }

    #[test]
    fn display_without_payload() {
        let error = HttpError::new(503, headers(), None);
        let display = format!("{error}");
        assert!(display.contains("code=503"), "missing code in {display}");
        assert!(display.contains("text/html"), "missing header in {display}");
        assert!(!display.contains("payload:"), "unexpected payload in {display}");
    }

    #[test]
    fn display_handles_blob() {
        let error = HttpError::new(
            502,
            headers(),
            Some(Bytes::from_static(b"upstream connect error")),
        );
        let display = format!("{error}");
        assert!(display.contains("code=502"), "missing code in {display}");
        assert!(
            display.contains("payload:\nb\"upstream connect error\""),
            "missing payload in {display}"
        );
    }

    #[test]
    fn accessors() {
        let error = HttpError::new(429, headers(), Some(Bytes::from_static(b"slow down")));
        assert_eq!(error.status_code(), 429);
        assert_eq!(error.payload(), Some(&Bytes::from_static(b"slow down")));
        assert_eq!(error.headers(), &headers());
    }
}
