//! [`Residence`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Residence listed by the agency.
///
/// Mirrors the record shape of the remote service, so field names on the wire
/// are the service's ones.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Residence {
    /// ID of this [`Residence`].
    #[serde(rename = "residenceId")]
    pub id: Id,

    /// Name of this [`Residence`].
    #[serde(rename = "residenceNom")]
    pub name: String,

    /// Description of this [`Residence`].
    #[serde(rename = "residenceDescription")]
    pub description: String,

    /// [`Price`] of this [`Residence`] before any option.
    #[serde(rename = "residencePrixDeBase")]
    pub base_price: Price,

    /// Postal address of this [`Residence`], if any.
    #[serde(rename = "residenceAdresse", default)]
    pub address: Option<String>,

    /// Contact phone number of this [`Residence`].
    #[serde(
        rename = "residenceTelephone",
        default,
        deserialize_with = "default_on_null"
    )]
    pub telephone: String,

    /// Contact email of this [`Residence`].
    #[serde(
        rename = "residenceEmail",
        default,
        deserialize_with = "default_on_null"
    )]
    pub email: String,

    /// [`Image`]s of this [`Residence`] in display order.
    #[serde(
        rename = "residenceImages",
        default,
        deserialize_with = "default_on_null"
    )]
    pub images: Vec<Image>,

    /// [`Localisation`] of this [`Residence`], if known.
    #[serde(rename = "residenceLocalisation", default)]
    pub localisation: Option<Localisation>,

    /// [`Status`] of this [`Residence`].
    pub status: Status,

    /// [`DateTime`] when this [`Residence`] was created.
    #[serde(
        rename = "residenceDateCreation",
        default,
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::rfc3339::option"
    )]
    pub created_at: Option<CreationDateTime>,

    /// [`DateTime`] when this [`Residence`] was last modified.
    #[serde(
        rename = "residenceDateModification",
        default,
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::rfc3339::option"
    )]
    pub modified_at: Option<ModificationDateTime>,
}

impl Residence {
    /// Indicates whether this [`Residence`] is soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.status == Status::Inactive
    }
}

/// ID of a [`Residence`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

/// Base price of a [`Residence`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Lowest [`Price`] a [`Residence`] may be listed at.
    pub const MIN: Self = Self(10_000);

    /// Indicates whether this [`Price`] is high enough to be listed.
    #[must_use]
    pub fn is_listable(self) -> bool {
        self >= Self::MIN
    }
}

/// Reference to an image of a [`Residence`].
///
/// Either an inline `data:` URI, an absolute URL, or a name of an image
/// stored by the remote service.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Image(String);

impl Image {
    /// Creates a new [`Image`] reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Creates a new inline [`Image`] out of the provided `base64` payload.
    #[must_use]
    pub fn inline(mime: &str, base64: &str) -> Self {
        Self(format!("data:{mime};base64,{base64}"))
    }

    /// Indicates whether this [`Image`] carries its own content.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Returns the location this [`Image`] can be displayed from.
    ///
    /// Names of images stored by the remote service are resolved as
    /// `{base_url}/image/{name}`, anything else is returned as is.
    #[must_use]
    pub fn resolve(&self, base_url: &str) -> String {
        if self.is_inline()
            || self.0.starts_with("http://")
            || self.0.starts_with("https://")
        {
            return self.0.clone();
        }
        format!(
            "{}/image/{}",
            base_url.trim_end_matches('/'),
            self.0.trim_start_matches('/'),
        )
    }
}

/// Geographic position of a [`Residence`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Localisation {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl Localisation {
    /// Checks whether both coordinates lie within their ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

define_kind! {
    #[doc = "Soft-deletion status of a [`Residence`]."]
    enum Status {
        #[doc = "Deleted, may still be restored."]
        Inactive = 0,

        #[doc = "Listed."]
        Active = 1,
    }
}

/// Contact email of a [`Residence`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

/// Contact phone number of a [`Residence`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    ///
    /// Accepts french numbers, either national (`06 12 34 56 78`) or
    /// international (`+33 6 12 34 56 78`).
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(?:\+33[\s.-]?|0)[1-9](?:[\s.-]?\d{2}){4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

/// Deserializes `null` as the [`Default`] value.
fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// [`DateTime`] when a [`Residence`] was created.
pub type CreationDateTime = DateTimeOf<(Residence, unit::Creation)>;

/// [`DateTime`] when a [`Residence`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Residence, unit::Modification)>;
