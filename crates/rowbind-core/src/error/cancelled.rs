use super::Error;

#[derive(Debug)]
pub(super) struct Cancelled;

impl std::error::Error for Cancelled {}

impl core::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl Error {
    /// The caller's cancellation token fired before or during execution.
    pub fn cancelled() -> Error {
        Error::from(super::ErrorKind::Cancelled(Cancelled))
    }

    /// Returns `true` if this error is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Cancelled(_)))
    }
}
