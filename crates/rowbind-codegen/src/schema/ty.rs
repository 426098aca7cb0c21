/// Returns `T` if `ty` is written as `Option<T>`.
pub(crate) fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };

    if path.qself.is_some() {
        return None;
    }

    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first() {
        Some(syn::GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// The name a field is known by in SQL: its identifier without any `r#`.
pub(crate) fn field_name(ident: &syn::Ident) -> syn::LitStr {
    use syn::ext::IdentExt;
    syn::LitStr::new(&ident.unraw().to_string(), ident.span())
}
