//! Runtime type tokens for provider values.

use std::{
    any::{TypeId, type_name},
    fmt,
};

/// Best-effort description of the value type a provider yields.
///
/// Providers expose `Option<TypeDescriptor>`: leaves usually know their type, while
/// compositions such as `map` or `flat_map` may not be able to name it at composition time.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Descriptor for the static type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns `true` when this descriptor names the static type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Fully qualified type name as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped, e.g. `Vec<String>` for `alloc::vec::Vec<alloc::string::String>`.
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut token = String::new();
        for ch in self.name.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                token.push(ch);
            } else {
                short.push_str(last_path_segment(&token));
                token.clear();
                short.push(ch);
            }
        }
        short.push_str(last_path_segment(&token));
        short
    }
}

fn last_path_segment(token: &str) -> &str {
    token.rsplit("::").next().unwrap_or(token)
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl std::hash::Hash for TypeDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeDescriptor").field(&self.name).finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}
