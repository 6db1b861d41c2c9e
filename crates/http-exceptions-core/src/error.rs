use http::StatusCode;

/// An error that knows how it should be reported to an API client
///
/// Handlers return values implementing this trait and the rendering
/// layer turns them into responses, so the error values never depend
/// on a particular web framework.
pub trait HttpError: std::error::Error {
    /// Status code sent with the response
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `not_found`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Whether the failure is attributable to the caller (4xx)
    fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
