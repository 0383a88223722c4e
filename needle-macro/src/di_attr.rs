use from_attr::FromAttr;
use syn::{parse_quote, Path};

// #[di(needle_path = path::to::needle)]

#[derive(FromAttr)]
#[attribute(idents = [di])]
pub(crate) struct DiAttr {
    #[attribute(default = default_needle_path())]
    pub(crate) needle_path: Path,
}

fn default_needle_path() -> Path {
    parse_quote!(::needle)
}

impl Default for DiAttr {
    fn default() -> Self {
        Self {
            needle_path: default_needle_path(),
        }
    }
}
