use super::{opt_str, wrap_in_const};
use crate::schema::{Param, Procedure};

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn procedure(procedure: &Procedure) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);
    let ident = &procedure.ident;

    let declaration = match &procedure.attr {
        Some(attr) => {
            let schema = opt_str(attr.schema.as_ref());
            let name = match &attr.name {
                Some(name) => quote!(#name),
                None => {
                    let name = ident.to_string();
                    quote!(#name)
                }
            };
            let command_type = match &attr.command_type {
                Some(command_type) => quote!(#rowbind::CommandType::#command_type),
                None => quote!(#rowbind::CommandType::StoredProcedure),
            };

            quote! {
                #rowbind::Option::Some(#rowbind::ProcedureDeclaration {
                    schema: #schema,
                    name: #name,
                    command_type: #command_type,
                })
            }
        }
        None => quote!(#rowbind::Option::None),
    };

    let params = procedure
        .params
        .iter()
        .map(|param| expand_param(&rowbind, param));

    wrap_in_const(quote! {
        impl #rowbind::Procedure for #ident {
            fn declaration() -> #rowbind::Option<#rowbind::ProcedureDeclaration> {
                #declaration
            }

            fn build_descriptor() -> #rowbind::ProcedureDescriptor<Self> {
                #rowbind::ProcedureDescriptor::new(vec![ #( #params, )* ])
            }
        }
    })
}

fn expand_param(rowbind: &TokenStream, param: &Param) -> TokenStream {
    let ident = &param.ident;
    let member = ident.to_string();
    let name = &param.name;
    let direction = &param.direction;
    let db_type = opt_str(param.db_type.as_ref());

    quote! {
        #rowbind::ProcedureParam::new(
            #member,
            #name,
            #rowbind::Direction::#direction,
            #db_type,
            |target: &Self| #rowbind::ToValue::to_value(&target.#ident),
        )
    }
}
