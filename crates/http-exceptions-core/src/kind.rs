use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// The closed set of client-facing error classes
///
/// Each kind maps to exactly one status code and carries the default
/// message used when a caller does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 400, usually raised by request parameter validation
    BadRequest,
    /// 401, missing or bad authentication
    Unauthorized,
    /// 403, the caller has no access to the resource
    Forbidden,
    /// 404, the resource does not exist in any datastore
    NotFound,
    /// 409, creating or updating the resource conflicts with its current state
    Conflict,
    /// 410, the resource existed but has been removed
    Gone,
    /// 415, invalid `Accept` or `Content-Type` header
    UnsupportedMedia,
    /// 422, the request parameters are well-formed but cannot be used
    UnprocessableEntity,
    /// 424, the action depended on another action that failed
    FailedDependency,
}

impl ErrorKind {
    /// Every kind, sorted by status code
    pub const ALL: [Self; 9] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::Gone,
        Self::UnsupportedMedia,
        Self::UnprocessableEntity,
        Self::FailedDependency,
    ];

    /// Numeric status code
    pub const fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::UnsupportedMedia => 415,
            Self::UnprocessableEntity => 422,
            Self::FailedDependency => 424,
        }
    }

    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Gone => StatusCode::GONE,
            Self::UnsupportedMedia => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::FailedDependency => StatusCode::FAILED_DEPENDENCY,
        }
    }

    /// Message used when messages are enabled and the caller gives none
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Invalid request parameters",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Conflict",
            Self::Gone => "Gone",
            Self::UnsupportedMedia => "Unsupported Media",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::FailedDependency => "Failed Dependency",
        }
    }

    /// Machine-readable name, matching the factory operation name
    pub const fn error_type(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Gone => "gone",
            Self::UnsupportedMedia => "unsupported_media",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::FailedDependency => "failed_dependency",
        }
    }

    /// Look up the kind for a numeric status code
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status_code();
        write!(f, "{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Unknown"))
    }
}
