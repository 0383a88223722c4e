use proc_macro2::Span;
use syn::{meta::ParseNestedMeta, parse_quote, spanned::Spanned, Attribute, Expr, Token};

// #[di(
//     default,
//     default = 42,
// )]

#[derive(Default)]
pub(crate) struct FieldAttribute {
    default: Option<(Span, Expr)>,
}

impl FieldAttribute {
    fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let meta_path = &meta.path;
        let meta_path_span = meta_path.span();

        if meta_path.is_ident("default") {
            if self.default.is_some() {
                return Err(meta.error("the `default` attribute can only be set once"));
            }

            self.default = Some((
                meta_path_span,
                if meta.input.is_empty() || meta.input.peek(Token![,]) {
                    parse_quote!(::core::default::Default::default())
                } else {
                    meta.value()?.parse::<Expr>()?
                },
            ));

            return Ok(());
        }

        Err(meta.error("the attribute must be: `default`"))
    }

    pub(crate) fn from_attrs(attrs: &mut Vec<Attribute>) -> syn::Result<FieldAttribute> {
        let mut field_attr = FieldAttribute::default();
        let mut errors = Vec::new();

        attrs.retain(|attr| {
            if !attr.path().is_ident("di") {
                return true;
            }

            if let Err(e) = attr.parse_nested_meta(|meta| field_attr.parse(meta)) {
                errors.push(e);
            }

            false
        });

        if let Some(e) = errors.into_iter().reduce(|mut a, b| {
            a.combine(b);
            a
        }) {
            return Err(e);
        }

        Ok(field_attr)
    }

    pub(crate) fn into_default(self) -> Option<Expr> {
        self.default.map(|(_, expr)| expr)
    }
}
