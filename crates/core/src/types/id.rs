//! Newtype IDs for type-safe entity references.
//!
//! Both backend services use 64-bit auto-increment primary keys, so every
//! id wraps an `i64`. Use `define_id!` to keep business ids and user ids from
//! being swapped at call sites.

/// Macro to define a type-safe ID wrapper around `i64`.
///
/// The generated type is `Copy`, serializes transparently, parses from a
/// decimal string and displays as its number, so it can be interpolated
/// straight into endpoint paths.
///
/// # Example
///
/// ```rust
/// # use acaclick_core::define_id;
/// define_id!(ProductId);
///
/// let id: ProductId = "42".parse().unwrap();
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(format!("/products/{id}/"), "/products/42/");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Business record (`id_negocio` in the negocios service).
define_id!(NegocioId);
// User account (`id_usuario` in the auth service).
define_id!(UsuarioId);
define_id!(RolId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: NegocioId = " 17 ".parse().unwrap();
        assert_eq!(id, NegocioId::new(17));
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<UsuarioId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = NegocioId::new(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
        let parsed: NegocioId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, id);
    }
}
