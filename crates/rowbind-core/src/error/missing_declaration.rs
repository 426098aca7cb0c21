use super::Error;

/// Error when a type is used in a role it was never declared for.
///
/// This occurs when:
/// - A procedure argument type has no `#[procedure]` declaration
/// - An entity type has no `#[entity]` declaration and its validity is checked
///
/// Missing declarations are never defaulted.
#[derive(Debug)]
pub(super) struct MissingDeclaration {
    type_name: &'static str,
    declaration: &'static str,
}

impl std::error::Error for MissingDeclaration {}

impl core::fmt::Display for MissingDeclaration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing required declaration: `{}` is not annotated with {}",
            self.type_name, self.declaration
        )
    }
}

impl Error {
    pub fn missing_declaration(type_name: &'static str, declaration: &'static str) -> Error {
        Error::from(super::ErrorKind::MissingDeclaration(MissingDeclaration {
            type_name,
            declaration,
        }))
    }

    /// Returns `true` if this error is a missing declaration error.
    pub fn is_missing_declaration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingDeclaration(_)))
    }
}
