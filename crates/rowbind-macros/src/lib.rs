extern crate proc_macro;

use proc_macro::TokenStream;

/// Maps a struct's `#[column]` and `#[nested]` fields to result set columns.
#[proc_macro_derive(Entity, attributes(entity, column, nested))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate_entity(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Declares a stored procedure and maps its `#[param]` fields to command
/// parameters.
#[proc_macro_derive(Procedure, attributes(procedure, param))]
pub fn derive_procedure(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate_procedure(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[proc_macro_derive(Params, attributes(params))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate_params(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
