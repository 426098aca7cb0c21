mod command_type;
pub use command_type::CommandType;

mod db_type;
pub use db_type::{DbType, ProviderType};

mod parameter;
pub use parameter::{Direction, Parameter};

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_chrono;
