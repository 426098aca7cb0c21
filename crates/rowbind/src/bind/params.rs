use super::{Binder, ToValue};
use crate::Result;

use indexmap::IndexMap;
use rowbind_core::stmt::Parameter;
use std::collections::HashMap;

/// A set of named arguments for a text command.
///
/// Each named value is dispatched through [`Binder::bind`]: lists expand into
/// one parameter per item, everything else binds as a single parameter.
/// Implemented with `#[derive(Params)]` for plain structs, and for the
/// output of [`params!`](crate::params).
pub trait Params {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()>;
}

impl Params for () {
    fn bind(&self, _binder: &mut Binder<'_>) -> Result<()> {
        Ok(())
    }
}

impl<P: Params + ?Sized> Params for &P {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        (**self).bind(binder)
    }
}

impl<P: Params> Params for Option<P> {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        match self {
            Some(params) => params.bind(binder),
            None => Ok(()),
        }
    }
}

impl<K: AsRef<str>, V: ToValue> Params for [(K, V)] {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        for (name, value) in self {
            binder.bind(name.as_ref(), value.to_value())?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: ToValue, const N: usize> Params for [(K, V); N] {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        self.as_slice().bind(binder)
    }
}

impl<K: AsRef<str>, V: ToValue> Params for Vec<(K, V)> {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        self.as_slice().bind(binder)
    }
}

impl<K: AsRef<str>, V: ToValue, S> Params for HashMap<K, V, S> {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        for (name, value) in self {
            binder.bind(name.as_ref(), value.to_value())?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: ToValue, S> Params for IndexMap<K, V, S> {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        for (name, value) in self {
            binder.bind(name.as_ref(), value.to_value())?;
        }
        Ok(())
    }
}

/// Explicit parameters are added as they are, without expansion.
impl Params for [Parameter] {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        for parameter in self {
            binder.add_parameter(parameter.clone());
        }
        Ok(())
    }
}

impl Params for Vec<Parameter> {
    fn bind(&self, binder: &mut Binder<'_>) -> Result<()> {
        self.as_slice().bind(binder)
    }
}

/// Builds a list of named arguments.
///
/// ```ignore
/// let users: Vec<User> = db.query(
///     "select * from users where id in (@ids) and active = @active",
///     params! { ids = vec![1, 2, 3], active = true },
/// )?;
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<(&'static str, $crate::Value)>::new()
    };
    ( $( $name:ident = $value:expr ),+ $(,)? ) => {
        ::std::vec![
            $( (::core::stringify!($name), $crate::bind::ToValue::to_value(&$value)) ),+
        ]
    };
}
