mod commons;
mod di_attr;
mod field_attribute;
mod item_struct_gen;
mod service_attribute;

use proc_macro::TokenStream;
use syn::{parse_macro_input, spanned::Spanned, Item};

use crate::service_attribute::ServiceAttribute;

#[proc_macro_attribute]
#[allow(non_snake_case)]
pub fn Service(attr: TokenStream, input: TokenStream) -> TokenStream {
    let mut attribute = ServiceAttribute::default();
    let parser = syn::meta::parser(|meta| attribute.parse(meta));
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(input as Item);

    let result = match item {
        Item::Struct(item_struct) => item_struct_gen::generate(attribute, item_struct),
        _ => Err(syn::Error::new(item.span(), "expected struct")),
    };

    result.unwrap_or_else(|e| e.to_compile_error()).into()
}
