const COMMAND_TYPES: &[&str] = &["StoredProcedure", "Text", "TableDirect"];

/// `#[procedure(schema = "..", name = "..", command_type = ..)]`
#[derive(Debug, Default)]
pub(crate) struct ProcedureAttr {
    pub(crate) schema: Option<syn::LitStr>,

    /// Defaults to the struct name
    pub(crate) name: Option<syn::LitStr>,

    /// Defaults to `StoredProcedure`
    pub(crate) command_type: Option<syn::Ident>,
}

impl ProcedureAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut result = Self::default();

        if let syn::Meta::Path(_) = attr.meta {
            return Ok(result);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("schema") {
                if result.schema.is_some() {
                    return Err(meta.error("duplicate `schema`"));
                }
                result.schema = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("name") {
                if result.name.is_some() {
                    return Err(meta.error("duplicate `name`"));
                }
                result.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("command_type") {
                if result.command_type.is_some() {
                    return Err(meta.error("duplicate `command_type`"));
                }

                let ident: syn::Ident = meta.value()?.parse()?;
                if !COMMAND_TYPES.iter().any(|name| ident == name) {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        "expected `StoredProcedure`, `Text` or `TableDirect`",
                    ));
                }
                result.command_type = Some(ident);
            } else {
                return Err(meta.error("expected `schema`, `name` or `command_type`"));
            }

            Ok(())
        })?;

        Ok(result)
    }
}
