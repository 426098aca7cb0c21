/// `#[entity(schema = "..", table = "..", key = "..")]`. Every key is
/// optional, and a bare `#[entity]` is allowed.
#[derive(Debug, Default)]
pub(crate) struct EntityAttr {
    pub(crate) schema: Option<syn::LitStr>,
    pub(crate) table: Option<syn::LitStr>,

    /// Primary key column
    pub(crate) key: Option<syn::LitStr>,
}

impl EntityAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut result = Self::default();

        if let syn::Meta::Path(_) = attr.meta {
            return Ok(result);
        }

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("schema") {
                &mut result.schema
            } else if meta.path.is_ident("table") {
                &mut result.table
            } else if meta.path.is_ident("key") {
                &mut result.key
            } else {
                return Err(meta.error("expected `schema`, `table` or `key`"));
            };

            if slot.is_some() {
                return Err(meta.error("duplicate entity attribute"));
            }

            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;

        Ok(result)
    }
}
