//! Enumerations persisted by variant name in TEXT columns.
//!
//! Values are carried as opaque data: no transition between `Etat` values is
//! enforced anywhere.

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Stored and serialized name of the variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($variant) => Ok($name::$variant), )+
                    other => Err(UnknownVariant {
                        enum_name: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

define_text_enum! {
    /// Lifecycle state of a project, deliverable, activity or maintenance.
    Etat {
        Planifier,
        EnCours,
        Termine,
    }
}

define_text_enum! {
    /// Whether a project is run for an outside client or in-house.
    TypeProjet {
        Interne,
        Externe,
    }
}

define_text_enum! {
    /// Nature of a daily load entry.
    TypeCharge {
        Dev,
        Support,
    }
}

define_text_enum! {
    /// Which kind of record an estimation targets.
    TypeEntite {
        Activite,
        Projet,
        Livrable,
    }
}
