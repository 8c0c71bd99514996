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

use super::rpc::Status;
use super::{HttpError, ServiceError};
use http::HeaderMap;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by the Discovery Engine client types.
///
/// The data types themselves never fail. Errors come from three places:
/// converting JSON into (or out of) a message, expanding a path template with
/// missing or malformed inputs, and errors reported by the service. This type
/// tells them apart with an [ErrorKind] and keeps the original error as its
/// [source][std::error::Error::source].
///
/// # Example
/// ```
/// use google_cloud_gax::error::{Error, ErrorKind};
/// use google_cloud_gax::error::rpc::{Code, Status};
/// let status = Status::default().set_code(Code::NotFound).set_message("NOT FOUND");
/// let error = Error::service(status.clone());
/// assert_eq!(error.kind(), ErrorKind::Rpc);
/// assert_eq!(error.status(), Some(&status));
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

impl Error {
    /// Creates a new [Error] with the given [ErrorKind] and source error.
    pub fn new<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        Error {
            kind,
            source: source.into(),
        }
    }

    /// A helper to create a new [ErrorKind::Serde] error.
    pub fn serde<T: Into<BoxError>>(source: T) -> Self {
        Error::new(ErrorKind::Serde, source)
    }

    /// A helper to create a new [ErrorKind::Binding] error.
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Error::new(ErrorKind::Binding, source)
    }

    /// A helper to create a new [ErrorKind::Rpc] error.
    pub fn rpc<T: Into<BoxError>>(source: T) -> Self {
        Error::new(ErrorKind::Rpc, source)
    }

    /// A helper to create a new [ErrorKind::Other] error.
    pub fn other<T: Into<BoxError>>(source: T) -> Self {
        Error::new(ErrorKind::Other, source)
    }

    /// Creates an error with the information returned by the service.
    pub fn service(status: Status) -> Self {
        Error::rpc(ServiceError::from(status))
    }

    /// Converts a failed HTTP response into an [Error].
    ///
    /// Google Cloud services return a JSON envelope with a [Status] on most
    /// failures. When the payload has that shape the error carries a
    /// [ServiceError], including the HTTP status code and headers. Otherwise
    /// (proxies, load balancers, truncated payloads) the error carries a
    /// [HttpError] with the raw payload.
    ///
    /// This is the hook an HTTP transport uses to surface errors. This crate
    /// does not send requests itself.
    pub fn from_http_response(
        status_code: u16,
        headers: HeaderMap,
        payload: bytes::Bytes,
    ) -> Self {
        match Status::try_from(&payload) {
            Ok(status) => Error::rpc(
                ServiceError::from(status)
                    .with_http_status_code(status_code)
                    .with_headers(headers),
            ),
            Err(e) => {
                tracing::debug!("HTTP error payload is not a google.rpc.Status: {e}");
                Error::rpc(HttpError::new(status_code, headers, Some(payload)))
            }
        }
    }

    /// Returns the [ErrorKind] associated with this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind.clone()
    }

    /// The [Status] reported by the service, if this error came from it.
    pub fn status(&self) -> Option<&Status> {
        self.as_inner::<ServiceError>().map(|e| e.status())
    }

    /// The HTTP status code of the failed response, if any.
    pub fn http_status_code(&self) -> Option<u16> {
        if let Some(e) = self.as_inner::<ServiceError>() {
            return *e.http_status_code();
        }
        self.as_inner::<HttpError>().map(|e| e.status_code())
    }

    /// Recurses through the source error chain and returns some reference to the
    /// inner value if it is of type `T`, or `None` if it isn't found.
    pub fn as_inner<T: StdError + Send + Sync + 'static>(&self) -> Option<&T> {
        let mut error = self.source.as_ref() as &dyn StdError;
        loop {
            match error.downcast_ref::<T>() {
                Some(e) => return Some(e),
                None => error = error.source()?,
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.source)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// The category of an [Error].
#[derive(Clone, Debug, PartialEq, Default)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A serialization or deserialization error.
    Serde,
    /// A request could not be formatted, e.g. a path parameter is missing.
    Binding,
    /// The service, or something between the client and the service, reported
    /// an error.
    Rpc,
    /// An uncategorized error.
    #[default]
    Other,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Serde => write!(
                f,
                "a problem occurred during serialization or deserialization"
            ),
            ErrorKind::Binding => write!(f, "a problem occurred formatting the request"),
            ErrorKind::Rpc => write!(f, "a problem occurred while making a RPC"),
            ErrorKind::Other => write!(f, "a problem occurred"),
        }
    }
}
