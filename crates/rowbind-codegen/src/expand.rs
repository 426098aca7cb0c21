mod entity;
pub(super) use entity::entity;

mod params;
pub(super) use params::params;

mod procedure;
pub(super) use procedure::procedure;

use proc_macro2::TokenStream;
use quote::quote;

/// Optional string literal as an `Option<&'static str>` expression.
fn opt_str(lit: Option<&syn::LitStr>) -> TokenStream {
    match lit {
        Some(lit) => quote!(Some(#lit)),
        None => quote!(None),
    }
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowbind as _rowbind;
            #code
        };
    }
}
