//! Mapping descriptors: what the derive macros declare about a type, built
//! once per type and cached for the life of the process.

mod cache;

mod entity;
pub use entity::{Entity, EntityDeclaration, EntityDescriptor, FieldMapping, NestedMapping};

mod procedure;
pub use procedure::{Procedure, ProcedureDeclaration, ProcedureDescriptor, ProcedureParam};

use std::sync::Arc;

/// Returns the mapping descriptor for `T`, building it on first use.
///
/// Concurrent first calls build the descriptor exactly once; every caller
/// receives the same instance.
pub fn descriptor<T: Entity>() -> Arc<EntityDescriptor<T>> {
    cache::get_or_build(T::build_descriptor)
}

/// Returns the procedure descriptor for `T`, building it on first use.
pub fn procedure_descriptor<T: Procedure>() -> Arc<ProcedureDescriptor<T>> {
    cache::get_or_build(T::build_descriptor)
}
