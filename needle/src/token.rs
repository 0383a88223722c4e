use std::{
    any::{self, TypeId},
    borrow::Cow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// Identifies a registrable type, it is the key of the container's registry.
///
/// Two tokens are equal if and only if they were built from the same type,
/// the name is only carried for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeToken {
    /// The name of the type.
    pub name: &'static str,
    /// The unique identifier of the type.
    pub id: TypeId,
}

impl TypeToken {
    /// Returns the token of `T`.
    pub fn of<T: ?Sized + 'static>() -> TypeToken {
        TypeToken {
            name: any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Returns whether the token identifies a built-in primitive or text type.
    ///
    /// Such types carry no constructor dependencies of their own, so finding one
    /// in a dependency list almost always means a registration mistake.
    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.iter().any(|primitive| primitive() == self.id)
    }
}

const PRIMITIVES: &[fn() -> TypeId] = &[
    TypeId::of::<String>,
    TypeId::of::<str>,
    TypeId::of::<&'static str>,
    TypeId::of::<Cow<'static, str>>,
    TypeId::of::<bool>,
    TypeId::of::<char>,
    TypeId::of::<()>,
    TypeId::of::<i8>,
    TypeId::of::<i16>,
    TypeId::of::<i32>,
    TypeId::of::<i64>,
    TypeId::of::<i128>,
    TypeId::of::<isize>,
    TypeId::of::<u8>,
    TypeId::of::<u16>,
    TypeId::of::<u32>,
    TypeId::of::<u64>,
    TypeId::of::<u128>,
    TypeId::of::<usize>,
    TypeId::of::<f32>,
    TypeId::of::<f64>,
];

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl PartialOrd for TypeToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeToken {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
