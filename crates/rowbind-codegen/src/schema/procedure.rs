use super::{ErrorSet, Param, ProcedureAttr};

#[derive(Debug)]
pub(crate) struct Procedure {
    pub(crate) ident: syn::Ident,

    /// `None` when the struct has no `#[procedure]` attribute
    pub(crate) attr: Option<ProcedureAttr>,

    pub(crate) params: Vec<Param>,
}

impl Procedure {
    pub(crate) fn from_ast(item: &syn::ItemStruct) -> syn::Result<Procedure> {
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &item.generics,
                "procedure argument types cannot have generic parameters",
            ));
        }

        let syn::Fields::Named(node) = &item.fields else {
            return Err(syn::Error::new_spanned(
                &item.fields,
                "procedure fields must be named",
            ));
        };

        let mut errs = ErrorSet::new();
        let mut attr = None;

        for ast in &item.attrs {
            if !ast.path().is_ident("procedure") {
                continue;
            }

            if attr.is_some() {
                errs.push(syn::Error::new_spanned(
                    ast,
                    "duplicate #[procedure] attribute",
                ));
                continue;
            }

            match ProcedureAttr::from_ast(ast) {
                Ok(parsed) => attr = Some(parsed),
                Err(err) => errs.push(err),
            }
        }

        let mut params = vec![];
        for field in &node.named {
            match Param::from_ast(field) {
                Ok(Some(param)) => params.push(param),
                Ok(None) => {}
                Err(err) => errs.push(err),
            }
        }

        errs.finish()?;

        Ok(Procedure {
            ident: item.ident.clone(),
            attr,
            params,
        })
    }
}
