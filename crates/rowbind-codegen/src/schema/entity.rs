use super::{EntityAttr, ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Entity {
    pub(crate) ident: syn::Ident,

    /// `None` when the struct has no `#[entity]` attribute
    pub(crate) attr: Option<EntityAttr>,

    /// Mapped fields in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Entity {
    pub(crate) fn from_ast(item: &syn::ItemStruct) -> syn::Result<Entity> {
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &item.generics,
                "entities cannot have generic parameters",
            ));
        }

        let syn::Fields::Named(node) = &item.fields else {
            return Err(syn::Error::new_spanned(
                &item.fields,
                "entity fields must be named",
            ));
        };

        let mut errs = ErrorSet::new();
        let mut attr = None;

        for ast in &item.attrs {
            if !ast.path().is_ident("entity") {
                continue;
            }

            if attr.is_some() {
                errs.push(syn::Error::new_spanned(ast, "duplicate #[entity] attribute"));
                continue;
            }

            match EntityAttr::from_ast(ast) {
                Ok(parsed) => attr = Some(parsed),
                Err(err) => errs.push(err),
            }
        }

        let mut fields = vec![];
        for field in &node.named {
            match Field::from_ast(field) {
                Ok(Some(field)) => fields.push(field),
                Ok(None) => {}
                Err(err) => errs.push(err),
            }
        }

        errs.finish()?;

        Ok(Entity {
            ident: item.ident.clone(),
            attr,
            fields,
        })
    }
}
