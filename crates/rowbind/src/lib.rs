pub mod bind;
pub use bind::{Binder, Params, ToValue};

pub mod db;
pub use db::{Call, ConnectionState, Db, IntoCommand};

pub mod materialize;
pub use materialize::{
    entities_from_cursor, entities_from_table, entities_to_table, is_valid_entity, TableExt,
};

mod primitive;
pub use primitive::Primitive;

mod primitive_chrono;

pub mod schema;
pub use schema::{Entity, Procedure};

pub use rowbind_core::{
    bail, driver, err, stmt,
    stmt::{CommandType, DbType, Direction, Parameter, Value},
    table, DataSet, Error, Result, Table,
};

pub use rowbind_macros::{Entity, Params, Procedure};

pub use tokio_util::sync::CancellationToken;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        bind::{Binder, Params, ToValue},
        primitive::{load, Primitive},
        schema::{
            Entity, EntityDeclaration, EntityDescriptor, FieldMapping, NestedMapping, Procedure,
            ProcedureDeclaration, ProcedureDescriptor, ProcedureParam,
        },
        Error, Result,
    };
    pub use rowbind_core::stmt::{CommandType, Direction, Type, Value};
    pub use std::{default::Default, option::Option};
}
