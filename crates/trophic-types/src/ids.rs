//! Strongly-typed identifiers.
//!
//! Ecosystems and species are identified by the names used in the input
//! rows, wrapped in newtypes so an ecosystem id can never be passed where a
//! species name is expected. Batch runs get a UUID v7 [`RunId`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`String`] with standard derives.
///
/// Names are ordered lexicographically, which is the tie-break order used by
/// the consumption priority policies and the sort order of result lists.
macro_rules! define_name {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a name from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name! {
    /// Identifier of an ecosystem (a group of species evaluated together).
    EcosystemId
}

define_name! {
    /// Name of a species, unique within its ecosystem.
    SpeciesName
}

/// Unique identifier for one batch run of the solver.
///
/// Uses UUID v7 so reports sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RunId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_order_lexicographically() {
        let mut names = vec![
            SpeciesName::from("wolf"),
            SpeciesName::from("deer"),
            SpeciesName::from("Elk"),
        ];
        names.sort();
        let sorted: Vec<&str> = names.iter().map(SpeciesName::as_str).collect();
        assert_eq!(sorted, vec!["Elk", "deer", "wolf"]);
    }

    #[test]
    fn names_serialize_as_plain_strings() {
        let json = serde_json::to_string(&EcosystemId::from("E1")).ok();
        assert_eq!(json.as_deref(), Some("\"E1\""));
    }

    #[test]
    fn run_ids_are_distinct() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
        assert_eq!(a.to_string(), a.into_inner().to_string());
    }
}
