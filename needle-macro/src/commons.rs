use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, AngleBracketedGenericArguments, Field, Fields, FieldsNamed, FieldsUnnamed,
    GenericArgument, Ident, Path, PathArguments, Stmt, Type, TypePath,
};

use crate::field_attribute::FieldAttribute;

fn extract_path_type<'a>(ty: &'a Type, ty_name: &str) -> Option<&'a Type> {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return None;
    };

    let segment = path.segments.last()?;

    if segment.ident != ty_name {
        return None;
    }

    let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
        &segment.arguments
    else {
        return None;
    };

    if args.len() != 1 {
        return None;
    }

    match args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

fn extract_rc_type(ty: &Type) -> Option<&Type> {
    extract_path_type(ty, "Rc")
}

fn extract_option_type(ty: &Type) -> Option<&Type> {
    extract_path_type(ty, "Option")
}

enum ResolveOne {
    Required(Type),
    Optional(Type),
    Default(syn::Expr),
}

fn classify_field(attrs: &mut Vec<syn::Attribute>, ty: &Type) -> syn::Result<ResolveOne> {
    if let Some(default) = FieldAttribute::from_attrs(attrs)?.into_default() {
        return Ok(ResolveOne::Default(default));
    }

    if let Some(ty) = extract_rc_type(ty) {
        return Ok(ResolveOne::Required(ty.clone()));
    }

    if let Some(ty) = extract_option_type(ty).and_then(extract_rc_type) {
        return Ok(ResolveOne::Optional(ty.clone()));
    }

    Err(syn::Error::new(
        ty.span(),
        "the field type must be `Rc<T>` or `Option<Rc<T>>`, \
        or use `#[di(default)]` to initialize it without injection",
    ))
}

pub(crate) struct FieldResolveStmts {
    pub(crate) dependencies: Vec<Type>,
    pub(crate) stmts: Vec<Stmt>,
    pub(crate) fields: ResolvedFields,
}

pub(crate) enum ResolvedFields {
    Unit,
    Named {
        field_names: Vec<Ident>,
        field_values: Vec<Ident>,
    },
    Unnamed(Vec<Ident>),
}

fn generate_field_resolve_stmt(
    attrs: &mut Vec<syn::Attribute>,
    ty: &Type,
    index: usize,
    needle_path: &Path,
    dependencies: &mut Vec<Type>,
) -> syn::Result<(Stmt, Ident)> {
    let variable = format_ident!("field_{}", index);

    let stmt = match classify_field(attrs, ty)? {
        ResolveOne::Required(ty) => {
            let stmt = syn::parse_quote! {
                let #variable = #needle_path::Arguments::next::<#ty>(args)?;
            };
            dependencies.push(ty);
            stmt
        }
        ResolveOne::Optional(ty) => {
            let stmt = syn::parse_quote! {
                let #variable = #needle_path::Arguments::next_optional::<#ty>(args)?;
            };
            dependencies.push(ty);
            stmt
        }
        ResolveOne::Default(default) => syn::parse_quote! {
            let #variable = #default;
        },
    };

    Ok((stmt, variable))
}

pub(crate) fn generate_field_resolve_stmts(
    fields: &mut Fields,
    needle_path: &Path,
) -> syn::Result<FieldResolveStmts> {
    let mut dependencies = Vec::new();
    let mut stmts = Vec::new();

    let fields = match fields {
        Fields::Unit => ResolvedFields::Unit,
        Fields::Named(FieldsNamed { named, .. }) => {
            let mut field_names = Vec::with_capacity(named.len());
            let mut field_values = Vec::with_capacity(named.len());

            for (
                index,
                Field {
                    attrs,
                    ident: field_name,
                    ty,
                    ..
                },
            ) in named.iter_mut().enumerate()
            {
                let (stmt, field_value) =
                    generate_field_resolve_stmt(attrs, ty, index, needle_path, &mut dependencies)?;

                stmts.push(stmt);
                field_values.push(field_value);

                if let Some(field_name) = field_name {
                    field_names.push(field_name.clone());
                }
            }

            ResolvedFields::Named {
                field_names,
                field_values,
            }
        }
        Fields::Unnamed(FieldsUnnamed { unnamed, .. }) => {
            let mut field_values = Vec::with_capacity(unnamed.len());

            for (index, Field { attrs, ty, .. }) in unnamed.iter_mut().enumerate() {
                let (stmt, field_value) =
                    generate_field_resolve_stmt(attrs, ty, index, needle_path, &mut dependencies)?;

                stmts.push(stmt);
                field_values.push(field_value);
            }

            ResolvedFields::Unnamed(field_values)
        }
    };

    Ok(FieldResolveStmts {
        dependencies,
        stmts,
        fields,
    })
}

pub(crate) fn generate_instance(ident: &Ident, fields: &ResolvedFields) -> TokenStream {
    match fields {
        ResolvedFields::Unit => quote! {
            #ident
        },
        ResolvedFields::Named {
            field_names,
            field_values,
        } => quote! {
            #ident {
                #(
                    #field_names: #field_values,
                )*
            }
        },
        ResolvedFields::Unnamed(field_values) => quote! {
            #ident(
                #(
                    #field_values,
                )*
            )
        },
    }
}

#[cfg(feature = "auto-register")]
pub(crate) fn check_auto_register_with_generics(
    auto_register: bool,
    generics: &syn::Generics,
) -> syn::Result<()> {
    if auto_register && !generics.params.is_empty() {
        return Err(syn::Error::new(
            generics.span(),
            "not support auto register generic struct, \
            please remove generics, or use `#[Service(auto_register = false)]` to disable auto register",
        ));
    }

    Ok(())
}
