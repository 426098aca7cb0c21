mod expand;
mod schema;

use proc_macro2::TokenStream;

/// Expands `#[derive(Entity)]`.
pub fn generate_entity(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let entity = schema::Entity::from_ast(&item)?;

    Ok(expand::entity(&entity))
}

/// Expands `#[derive(Procedure)]`.
pub fn generate_procedure(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let procedure = schema::Procedure::from_ast(&item)?;

    Ok(expand::procedure(&procedure))
}

/// Expands `#[derive(Params)]`.
pub fn generate_params(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let params = schema::ParamsStruct::from_ast(&item)?;

    Ok(expand::params(&params))
}
