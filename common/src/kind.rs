//! Macros for defining kind enums.

/// Macro for defining a kind enum backed by a [`u8`].
///
/// With the `serde` feature enabled, the enum is (de)serialized as its
/// integer value.
///
/// # Example
///
/// ```rust
/// use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::try_from(2), Ok(Kind::Sphere));
/// assert!(Kind::try_from(3).is_err());
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }

        impl ::core::convert::TryFrom<u8> for $name {
            type Error = $crate::InvalidKind;

            fn try_from(v: u8) -> Result<Self, Self::Error> {
                match v {
                    $(
                        v if Self::$variant.u8() == v => Ok(Self::$variant),
                    )*
                    v => Err($crate::InvalidKind {
                        kind: ::core::stringify!($name),
                        value: v,
                    }),
                }
            }
        }

        $crate::impl_kind_serde!($name);
    };
}

/// Implements integer (de)serialization for a [`define_kind!`] enum.
#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! impl_kind_serde {
    ($name:ident) => {
        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.serialize_u8(self.u8())
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                use $crate::private::serde::de::Error as _;

                let v = <u8 as $crate::private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                Self::try_from(v).map_err(D::Error::custom)
            }
        }
    };
}

/// No-op without the `serde` feature.
#[cfg(not(feature = "serde"))]
#[doc(hidden)]
#[macro_export]
macro_rules! impl_kind_serde {
    ($name:ident) => {};
}

/// Error of converting an integer into a kind enum.
#[derive(
    Clone, Copy, Debug, derive_more::Display, derive_more::Error, Eq, PartialEq,
)]
#[display("invalid `{kind}` value: {value}")]
pub struct InvalidKind {
    /// Name of the kind enum.
    pub kind: &'static str,

    /// Rejected value.
    pub value: u8,
}
