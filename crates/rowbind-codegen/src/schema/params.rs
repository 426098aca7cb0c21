use super::{ty, ErrorSet};

/// A plain struct bound field by field as named arguments.
#[derive(Debug)]
pub(crate) struct ParamsStruct {
    pub(crate) ident: syn::Ident,
    pub(crate) generics: syn::Generics,
    pub(crate) fields: Vec<ParamsField>,
}

#[derive(Debug)]
pub(crate) struct ParamsField {
    pub(crate) ident: syn::Ident,

    /// Argument name: the field name, or `#[params(rename = "..")]`
    pub(crate) name: syn::LitStr,
}

impl ParamsStruct {
    pub(crate) fn from_ast(item: &syn::ItemStruct) -> syn::Result<ParamsStruct> {
        let syn::Fields::Named(node) = &item.fields else {
            return Err(syn::Error::new_spanned(
                &item.fields,
                "params fields must be named",
            ));
        };

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for field in &node.named {
            match ParamsField::from_ast(field) {
                Ok(Some(field)) => fields.push(field),
                Ok(None) => {}
                Err(err) => errs.push(err),
            }
        }

        errs.finish()?;

        Ok(ParamsStruct {
            ident: item.ident.clone(),
            generics: item.generics.clone(),
            fields,
        })
    }
}

impl ParamsField {
    /// Returns `None` for `#[params(skip)]` fields.
    fn from_ast(field: &syn::Field) -> syn::Result<Option<ParamsField>> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "params fields must be named"));
        };

        let mut skip = false;
        let mut name = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("params") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("rename") {
                    if name.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    name = Some(meta.value()?.parse::<syn::LitStr>()?);
                } else {
                    return Err(meta.error("expected `skip` or `rename`"));
                }
                Ok(())
            })?;
        }

        if skip {
            return Ok(None);
        }

        Ok(Some(ParamsField {
            ident: ident.clone(),
            name: name.unwrap_or_else(|| ty::field_name(ident)),
        }))
    }
}
