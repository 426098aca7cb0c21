use super::Error;

/// Error when a result set has an unexpected structure.
///
/// This occurs when:
/// - A mapped column is not present in the result set
/// - A cursor is read past its last row
///
/// The database returned valid data, but its shape doesn't match what the
/// mapping expected.
#[derive(Debug)]
pub(super) struct InvalidResult {
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidResult(_)))
    }
}
