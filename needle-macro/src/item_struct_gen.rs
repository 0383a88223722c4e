use from_attr::{AttrsValue, FromAttr};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemStruct;

use crate::{
    commons::{self, FieldResolveStmts},
    di_attr::DiAttr,
    service_attribute::{ServiceAttribute, SimpleServiceAttribute},
};

pub(crate) fn generate(
    attr: ServiceAttribute,
    mut item_struct: ItemStruct,
) -> syn::Result<TokenStream> {
    let DiAttr { needle_path } = match DiAttr::remove_attributes(&mut item_struct.attrs) {
        Ok(Some(AttrsValue { value: attr, .. })) => attr,
        Ok(None) => DiAttr::default(),
        Err(AttrsValue { value: e, .. }) => return Err(e),
    };

    let SimpleServiceAttribute {
        dispose,
        auto_register,
    } = attr.simplify()?;

    #[cfg(feature = "auto-register")]
    commons::check_auto_register_with_generics(auto_register.is_some(), &item_struct.generics)?;

    let FieldResolveStmts {
        dependencies,
        stmts,
        fields,
    } = commons::generate_field_resolve_stmts(&mut item_struct.fields, &needle_path)?;

    let struct_ident = &item_struct.ident;

    let (impl_generics, ty_generics, where_clause) = item_struct.generics.split_for_impl();

    let instance = commons::generate_instance(struct_ident, &fields);

    let as_dispose = if dispose {
        quote! {
            fn as_dispose(&self) -> ::core::option::Option<&dyn #needle_path::Dispose> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    let auto_register = match auto_register {
        #[cfg(feature = "auto-register")]
        Some(lifetime) => {
            let lifetime = match lifetime {
                needle_core::Lifetime::Scoped => quote!(Scoped),
                needle_core::Lifetime::Singleton => quote!(Singleton),
            };

            quote! {
                #needle_path::register_service!(#lifetime, #struct_ident);
            }
        }
        _ => quote! {},
    };

    let expand = quote! {
        #item_struct

        impl #impl_generics #needle_path::Injectable for #struct_ident #ty_generics #where_clause {
            fn dependencies() -> ::std::vec::Vec<#needle_path::TypeToken> {
                ::std::vec![
                    #(
                        #needle_path::TypeToken::of::<#dependencies>(),
                    )*
                ]
            }

            #[allow(unused_variables)]
            fn construct(args: &mut #needle_path::Arguments) -> #needle_path::Result<Self> {
                #(#stmts)*

                ::core::result::Result::Ok(#instance)
            }

            #as_dispose
        }

        #auto_register
    };

    Ok(expand)
}
