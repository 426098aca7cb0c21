use super::ty;

const DIRECTIONS: &[&str] = &["Input", "Output", "InputOutput", "ReturnValue"];

/// A procedure argument field carrying `#[param(..)]`.
#[derive(Debug)]
pub(crate) struct Param {
    pub(crate) ident: syn::Ident,

    /// Parameter name; defaults to the field name
    pub(crate) name: syn::LitStr,

    pub(crate) direction: syn::Ident,

    /// `db_type = Int32` is carried as `"Int32"`; `db_type = "jsonb"` as is
    pub(crate) db_type: Option<syn::LitStr>,
}

impl Param {
    /// Returns `None` for fields without `#[param]`.
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Option<Param>> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(
                field,
                "procedure fields must be named",
            ));
        };

        let mut attrs = field.attrs.iter().filter(|attr| attr.path().is_ident("param"));

        let Some(attr) = attrs.next() else {
            return Ok(None);
        };

        if let Some(duplicate) = attrs.next() {
            return Err(syn::Error::new_spanned(
                duplicate,
                "duplicate #[param] attribute",
            ));
        }

        let mut param = Param {
            ident: ident.clone(),
            name: ty::field_name(ident),
            direction: syn::Ident::new("Input", ident.span()),
            db_type: None,
        };

        if let syn::Meta::Path(_) = attr.meta {
            return Ok(Some(param));
        }

        let mut name = None;
        let mut direction = None;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if name.is_some() {
                    return Err(meta.error("duplicate `name`"));
                }
                name = Some(meta.value()?.parse::<syn::LitStr>()?);
            } else if meta.path.is_ident("direction") {
                if direction.is_some() {
                    return Err(meta.error("duplicate `direction`"));
                }

                let ident: syn::Ident = meta.value()?.parse()?;
                if !DIRECTIONS.iter().any(|name| ident == name) {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        "expected `Input`, `Output`, `InputOutput` or `ReturnValue`",
                    ));
                }
                direction = Some(ident);
            } else if meta.path.is_ident("db_type") {
                if param.db_type.is_some() {
                    return Err(meta.error("duplicate `db_type`"));
                }

                let value = meta.value()?;
                param.db_type = Some(if value.peek(syn::LitStr) {
                    value.parse()?
                } else {
                    let ident: syn::Ident = value.parse()?;
                    syn::LitStr::new(&ident.to_string(), ident.span())
                });
            } else {
                return Err(meta.error("expected `name`, `direction` or `db_type`"));
            }

            Ok(())
        })?;

        if let Some(name) = name {
            param.name = name;
        }

        if let Some(direction) = direction {
            param.direction = direction;
        }

        Ok(Some(param))
    }
}
