//! Domain models as seen by the client.
//!
//! The backend is authoritative for every entity; these are cached copies.

/// Define a fieldless enum carried on the wire as an integer code.
///
/// Serializes as the code; deserializes from the code or the variant name
/// (case-insensitive), since both shapes appear in backend payloads.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            /// Every variant, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire code.
            pub fn code(self) -> u8 {
                self as u8
            }

            /// Look up a variant by wire code.
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Variant name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            /// Parse a variant name, ignoring case.
            pub fn parse(name: &str) -> Option<Self> {
                $(
                    if name.eq_ignore_ascii_case(stringify!($variant)) {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Code(u8),
                    Name(String),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Code(code) => $name::from_code(code).ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "invalid {} code: {}",
                            stringify!($name),
                            code
                        ))
                    }),
                    Raw::Name(name) => $name::parse(&name).ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "invalid {} name: {}",
                            stringify!($name),
                            name
                        ))
                    }),
                }
            }
        }
    };
}

mod appointment;
mod basket;
mod clinic;
mod doctor;
mod medical_record;
mod order;
mod pet;
mod product;
mod rating;
mod session;
mod wishlist;

pub use appointment::*;
pub use basket::*;
pub use clinic::*;
pub use doctor::*;
pub use medical_record::*;
pub use order::*;
pub use pet::*;
pub use product::*;
pub use rating::*;
pub use session::*;
pub use wishlist::*;
