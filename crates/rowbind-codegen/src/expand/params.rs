use super::wrap_in_const;
use crate::schema::ParamsStruct;

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn params(params: &ParamsStruct) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);
    let ident = &params.ident;
    let (impl_generics, ty_generics, where_clause) = params.generics.split_for_impl();

    let binds = params.fields.iter().map(|field| {
        let field_ident = &field.ident;
        let name = &field.name;

        quote! {
            binder.bind(#name, #rowbind::ToValue::to_value(&self.#field_ident))?;
        }
    });

    wrap_in_const(quote! {
        impl #impl_generics #rowbind::Params for #ident #ty_generics #where_clause {
            fn bind(&self, binder: &mut #rowbind::Binder<'_>) -> #rowbind::Result<()> {
                #( #binds )*
                Ok(())
            }
        }
    })
}
