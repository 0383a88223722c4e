use needle_core::Lifetime;
use proc_macro2::Span;
use syn::{meta::ParseNestedMeta, spanned::Spanned, LitBool, Token};

// #[Service(
//     singleton | scoped,
//     dispose,
//     auto_register = false,
// )]

#[derive(Default)]
pub(crate) struct ServiceAttribute {
    singleton: Option<Span>,
    scoped: Option<Span>,
    dispose: Option<(Span, bool)>,
    auto_register: Option<(Span, bool)>,
}

impl ServiceAttribute {
    pub(crate) fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let meta_path = &meta.path;
        let meta_path_span = meta_path.span();

        macro_rules! flag_attr {
            ($attribute:tt) => {
                if meta_path.is_ident(stringify!($attribute)) {
                    if self.$attribute.is_some() {
                        return Err(meta.error(concat!(
                            "the `",
                            stringify!($attribute),
                            "` attribute can only be set once"
                        )));
                    }

                    self.$attribute = Some(meta_path_span);
                    return Ok(());
                }
            };
        }

        macro_rules! boolean_attr {
            ($attribute:tt) => {
                if meta_path.is_ident(stringify!($attribute)) {
                    if self.$attribute.is_some() {
                        return Err(meta.error(concat!(
                            "the `",
                            stringify!($attribute),
                            "` attribute can only be set once"
                        )));
                    }

                    self.$attribute = Some((
                        meta_path_span,
                        if meta.input.is_empty() || meta.input.peek(Token![,]) {
                            true
                        } else {
                            meta.value()?.parse::<LitBool>()?.value
                        },
                    ));
                    return Ok(());
                }
            };
        }

        flag_attr!(singleton);
        flag_attr!(scoped);
        boolean_attr!(dispose);
        boolean_attr!(auto_register);

        Err(meta.error(
            "the attribute must be one of: `singleton`, `scoped`, `dispose`, `auto_register`",
        ))
    }

    pub(crate) fn simplify(self) -> syn::Result<SimpleServiceAttribute> {
        let ServiceAttribute {
            singleton,
            scoped,
            dispose,
            auto_register,
        } = self;

        let lifetime = match (singleton, scoped) {
            (Some(singleton), Some(scoped)) => {
                let mut e = syn::Error::new(
                    singleton,
                    "the `singleton` and `scoped` attributes cannot be used together",
                );
                e.combine(syn::Error::new(
                    scoped,
                    "the `singleton` and `scoped` attributes cannot be used together",
                ));
                return Err(e);
            }
            (Some(_), None) => Some(Lifetime::Singleton),
            (None, Some(_)) => Some(Lifetime::Scoped),
            (None, None) => None,
        };

        let auto_register = match (lifetime, auto_register) {
            (None, Some((span, true))) => {
                return Err(syn::Error::new(
                    span,
                    "the `auto_register` attribute requires `singleton` or `scoped`",
                ));
            }
            (None, _) => None,
            (Some(_), Some((_, false))) => None,
            (Some(lifetime), _) => Some(lifetime),
        };

        Ok(SimpleServiceAttribute {
            dispose: dispose.map(|(_, dispose)| dispose).unwrap_or(false),
            auto_register,
        })
    }
}

pub(crate) struct SimpleServiceAttribute {
    pub(crate) dispose: bool,
    /// The lifetime to auto-register the service with, if any.
    pub(crate) auto_register: Option<Lifetime>,
}
