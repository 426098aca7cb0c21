use super::{opt_str, wrap_in_const};
use crate::schema::{Entity, Field, FieldKind};

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn entity(entity: &Entity) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);
    let ident = &entity.ident;

    let declaration = match &entity.attr {
        Some(attr) => {
            let schema = opt_str(attr.schema.as_ref());
            let table = opt_str(attr.table.as_ref());
            let key = opt_str(attr.key.as_ref());

            quote! {
                #rowbind::Option::Some(#rowbind::EntityDeclaration {
                    schema: #schema,
                    table: #table,
                    key: #key,
                })
            }
        }
        None => quote!(#rowbind::Option::None),
    };

    let fields = entity.fields.iter().filter_map(|field| match &field.kind {
        FieldKind::Column(column) => Some(expand_field_mapping(&rowbind, field, column)),
        FieldKind::Nested { .. } => None,
    });

    let nested = entity.fields.iter().filter_map(|field| match &field.kind {
        FieldKind::Nested { target, optional } => {
            Some(expand_nested_mapping(&rowbind, field, target, *optional))
        }
        FieldKind::Column(_) => None,
    });

    wrap_in_const(quote! {
        impl #rowbind::Entity for #ident {
            fn declaration() -> #rowbind::Option<#rowbind::EntityDeclaration> {
                #declaration
            }

            fn build_descriptor() -> #rowbind::EntityDescriptor<Self> {
                #rowbind::EntityDescriptor::new(
                    vec![ #( #fields, )* ],
                    vec![ #( #nested, )* ],
                )
            }
        }
    })
}

fn expand_field_mapping(rowbind: &TokenStream, field: &Field, column: &syn::LitStr) -> TokenStream {
    let ident = &field.ident;
    let member = ident.to_string();
    let ty = &field.ty;

    quote! {
        #rowbind::FieldMapping::new(
            #member,
            #column,
            <#ty as #rowbind::Primitive>::TYPE,
            <#ty as #rowbind::Primitive>::NULLABLE,
            |target: &mut Self, value: #rowbind::Value| -> #rowbind::Result<()> {
                target.#ident = #rowbind::load::<#ty>(value)?;
                Ok(())
            },
            |target: &Self| #rowbind::Primitive::to_value(&target.#ident),
        )
    }
}

fn expand_nested_mapping(
    rowbind: &TokenStream,
    field: &Field,
    target: &syn::Type,
    optional: bool,
) -> TokenStream {
    let ident = &field.ident;
    let member = ident.to_string();

    let assign = if optional {
        quote!(entity.#ident = #rowbind::Option::Some(nested))
    } else {
        quote!(entity.#ident = nested)
    };

    quote! {
        #rowbind::NestedMapping::new::<#target>(
            #member,
            |entity: &mut Self, nested: #target| { #assign; },
        )
    }
}
