mod entity;
pub(crate) use entity::Entity;

mod entity_attr;
pub(crate) use entity_attr::EntityAttr;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldKind};

mod param;
pub(crate) use param::Param;

mod params;
pub(crate) use params::ParamsStruct;

mod procedure;
pub(crate) use procedure::Procedure;

mod procedure_attr;
pub(crate) use procedure_attr::ProcedureAttr;

mod ty;
