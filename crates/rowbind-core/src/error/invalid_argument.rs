use super::Error;

#[derive(Debug)]
pub(super) struct InvalidArgument {
    argument: &'static str,
    message: Box<str>,
}

impl std::error::Error for InvalidArgument {}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument `{}`: {}", self.argument, self.message)
    }
}

impl Error {
    /// Creates an invalid argument error. Raised before any partial work.
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgument {
            argument,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidArgument(_)))
    }
}
