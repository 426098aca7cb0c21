use super::{ty, ErrorSet};

/// An entity field carrying `#[column]` or `#[nested]`.
#[derive(Debug)]
pub(crate) struct Field {
    pub(crate) ident: syn::Ident,

    /// Field type as written
    pub(crate) ty: syn::Type,

    pub(crate) kind: FieldKind,
}

#[derive(Debug)]
pub(crate) enum FieldKind {
    /// `#[column]` or `#[column("name")]`
    Column(syn::LitStr),

    /// `#[nested]`. `target` is the entity type, with any `Option` removed.
    Nested { target: syn::Type, optional: bool },
}

impl Field {
    /// Returns `None` for fields without a mapping attribute.
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Option<Field>> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "entity fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut kind = None;

        for attr in &field.attrs {
            let parsed = if attr.path().is_ident("column") {
                column_name(attr, ident).map(FieldKind::Column)
            } else if attr.path().is_ident("nested") {
                nested(attr, &field.ty)
            } else {
                continue;
            };

            match parsed {
                Ok(_) if kind.is_some() => errs.push(syn::Error::new_spanned(
                    attr,
                    "field has more than one mapping attribute",
                )),
                Ok(parsed) => kind = Some(parsed),
                Err(err) => errs.push(err),
            }
        }

        errs.finish()?;

        Ok(kind.map(|kind| Field {
            ident: ident.clone(),
            ty: field.ty.clone(),
            kind,
        }))
    }
}

fn column_name(attr: &syn::Attribute, ident: &syn::Ident) -> syn::Result<syn::LitStr> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(ty::field_name(ident)),
        syn::Meta::List(_) => attr.parse_args(),
        syn::Meta::NameValue(_) => Err(syn::Error::new_spanned(
            attr,
            "expected `#[column]` or `#[column(\"name\")]`",
        )),
    }
}

fn nested(attr: &syn::Attribute, field_ty: &syn::Type) -> syn::Result<FieldKind> {
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        return Err(syn::Error::new_spanned(attr, "`#[nested]` takes no arguments"));
    }

    Ok(match ty::option_inner(field_ty) {
        Some(inner) => FieldKind::Nested {
            target: inner.clone(),
            optional: true,
        },
        None => FieldKind::Nested {
            target: field_ty.clone(),
            optional: false,
        },
    })
}
