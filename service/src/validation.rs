//! Validation of [`Draft`]s against the listing rules.

use derive_more::{Display, Error};
use smart_default::SmartDefault;

use crate::domain::{
    residence::{Email, Phone},
    Draft,
};

/// Message reported for a missing name.
pub const NAME_REQUIRED: &str = "Le nom est requis";

/// Message reported for a missing description.
pub const DESCRIPTION_REQUIRED: &str = "La description est requise";

/// Message reported for a missing or too low base price.
pub const PRICE_TOO_LOW: &str = "Le prix de base doit être d'au moins 10000";

/// Message reported for a missing address.
pub const ADDRESS_REQUIRED: &str = "L'adresse est requise";

/// Message reported for a draft without images.
pub const IMAGES_REQUIRED: &str = "Au moins une image est requise";

/// Message reported for a malformed phone number.
pub const TELEPHONE_INVALID: &str = "Le numéro de téléphone est invalide";

/// Message reported for a malformed email.
pub const EMAIL_INVALID: &str = "L'adresse e-mail est invalide";

/// Message reported for out of range coordinates.
pub const LOCALISATION_INVALID: &str = "Les coordonnées sont invalides";

/// Set of [`validate`] rules to apply on top of the mandatory ones.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Rules {
    /// Whether contact details (phone number, email and coordinates) are
    /// checked for well-formedness.
    #[default(false)]
    pub contact: bool,
}

/// Field of a [`Draft`] a validation message relates to.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Field {
    /// [`Draft::name`].
    #[display("nom")]
    Name,

    /// [`Draft::description`].
    #[display("description")]
    Description,

    /// [`Draft::base_price`].
    #[display("prixDeBase")]
    BasePrice,

    /// [`Draft::address`].
    #[display("adresse")]
    Address,

    /// [`Draft::images`].
    #[display("images")]
    Images,

    /// [`Draft::telephone`].
    #[display("telephone")]
    Telephone,

    /// [`Draft::email`].
    #[display("email")]
    Email,

    /// [`Draft::localisation`].
    #[display("localisation")]
    Localisation,
}

/// Validation messages of a [`Draft`], one slot per [`Field`].
///
/// Empty errors mean the [`Draft`] is valid.
#[derive(Clone, Debug, Default, Eq, Error, PartialEq)]
pub struct FormErrors {
    /// Message for [`Field::Name`].
    pub name: Option<&'static str>,

    /// Message for [`Field::Description`].
    pub description: Option<&'static str>,

    /// Message for [`Field::BasePrice`].
    pub base_price: Option<&'static str>,

    /// Message for [`Field::Address`].
    pub address: Option<&'static str>,

    /// Message for [`Field::Images`].
    pub images: Option<&'static str>,

    /// Message for [`Field::Telephone`].
    pub telephone: Option<&'static str>,

    /// Message for [`Field::Email`].
    pub email: Option<&'static str>,

    /// Message for [`Field::Localisation`].
    pub localisation: Option<&'static str>,
}

impl FormErrors {
    /// Indicates whether no [`Field`] has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Returns the message of the provided [`Field`], if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Description => self.description,
            Field::BasePrice => self.base_price,
            Field::Address => self.address,
            Field::Images => self.images,
            Field::Telephone => self.telephone,
            Field::Email => self.email,
            Field::Localisation => self.localisation,
        }
    }

    /// Iterates over the present messages in [`Field`] declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        [
            Field::Name,
            Field::Description,
            Field::BasePrice,
            Field::Address,
            Field::Images,
            Field::Telephone,
            Field::Email,
            Field::Localisation,
        ]
        .into_iter()
        .filter_map(|f| self.get(f).map(|msg| (f, msg)))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, msg)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
        }
        Ok(())
    }
}

/// Validates the provided [`Draft`] against the given [`Rules`].
///
/// Every rule is evaluated, so the result holds a message for each offending
/// [`Field`] at once.
#[must_use]
pub fn validate(draft: &Draft, rules: Rules) -> FormErrors {
    let blank = |s: &Option<String>| {
        s.as_deref().map_or(true, |s| s.trim().is_empty())
    };

    let mut errors = FormErrors {
        name: blank(&draft.name).then_some(NAME_REQUIRED),
        description: blank(&draft.description).then_some(DESCRIPTION_REQUIRED),
        base_price: (!draft.base_price.is_some_and(|p| p.is_listable()))
            .then_some(PRICE_TOO_LOW),
        address: blank(&draft.address).then_some(ADDRESS_REQUIRED),
        images: draft
            .images
            .as_ref()
            .map_or(true, Vec::is_empty)
            .then_some(IMAGES_REQUIRED),
        ..FormErrors::default()
    };

    if rules.contact {
        let malformed = |s: &Option<String>, ok: fn(&str) -> bool| {
            s.as_deref()
                .map(str::trim)
                .is_some_and(|s| !s.is_empty() && !ok(s))
        };

        errors.telephone =
            malformed(&draft.telephone, |s| Phone::new(s).is_some())
                .then_some(TELEPHONE_INVALID);
        errors.email = malformed(&draft.email, |s| Email::new(s).is_some())
            .then_some(EMAIL_INVALID);
        errors.localisation = draft
            .localisation
            .is_some_and(|l| !l.is_valid())
            .then_some(LOCALISATION_INVALID);
    }

    errors
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        residence::{Image, Localisation, Price},
        Draft,
    };

    use super::{
        validate, Field, FormErrors, Rules, ADDRESS_REQUIRED,
        DESCRIPTION_REQUIRED, EMAIL_INVALID, IMAGES_REQUIRED,
        LOCALISATION_INVALID, NAME_REQUIRED, PRICE_TOO_LOW, TELEPHONE_INVALID,
    };

    fn valid() -> Draft {
        Draft {
            name: Some("Les Oliviers".into()),
            description: Some("Villa avec piscine".into()),
            base_price: Some(Price::from(20_000)),
            address: Some("12 rue des Lilas".into()),
            images: Some(vec![Image::new("facade.jpg")]),
            ..Draft::default()
        }
    }

    #[test]
    fn accepts_valid_draft() {
        assert!(validate(&valid(), Rules::default()).is_empty());
    }

    #[test]
    fn reports_only_missing_name() {
        let draft = Draft {
            name: Some(String::new()),
            description: Some("x".into()),
            base_price: Some(Price::from(20_000)),
            address: Some("y".into()),
            images: Some(vec![Image::new("i")]),
            ..Draft::default()
        };

        assert_eq!(
            validate(&draft, Rules::default()),
            FormErrors {
                name: Some(NAME_REQUIRED),
                ..FormErrors::default()
            },
        );
    }

    #[test]
    fn reports_exactly_offending_fields_in_any_combination() {
        type Breaker = (Field, &'static str, fn(&mut Draft));
        let breakers: [Breaker; 5] = [
            (Field::Name, NAME_REQUIRED, |d| d.name = Some("   ".into())),
            (Field::Description, DESCRIPTION_REQUIRED, |d| {
                d.description = None;
            }),
            (Field::BasePrice, PRICE_TOO_LOW, |d| {
                d.base_price = Some(Price::from(9_999));
            }),
            (Field::Address, ADDRESS_REQUIRED, |d| d.address = None),
            (Field::Images, IMAGES_REQUIRED, |d| d.images = Some(vec![])),
        ];

        for mask in 0_u8..32 {
            let mut draft = valid();
            let mut expected = vec![];
            for (i, (field, msg, brk)) in breakers.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    brk(&mut draft);
                    expected.push((*field, *msg));
                }
            }

            let errors = validate(&draft, Rules::default());

            assert_eq!(errors.iter().collect::<Vec<_>>(), expected, "{mask:05b}");
            assert_eq!(errors.is_empty(), mask == 0);
        }
    }

    #[test]
    fn missing_price_is_reported() {
        let draft = Draft {
            base_price: None,
            ..valid()
        };

        assert_eq!(
            validate(&draft, Rules::default()).get(Field::BasePrice),
            Some(PRICE_TOO_LOW),
        );
    }

    #[test]
    fn contact_rules_are_disabled_by_default() {
        let draft = Draft {
            telephone: Some("not a phone".into()),
            email: Some("not an email".into()),
            localisation: Some(Localisation {
                latitude: 123.0,
                longitude: 0.0,
            }),
            ..valid()
        };

        assert!(validate(&draft, Rules::default()).is_empty());

        let errors = validate(&draft, Rules { contact: true });
        assert_eq!(errors.telephone, Some(TELEPHONE_INVALID));
        assert_eq!(errors.email, Some(EMAIL_INVALID));
        assert_eq!(errors.localisation, Some(LOCALISATION_INVALID));
    }

    #[test]
    fn contact_rules_ignore_empty_values() {
        let draft = Draft {
            telephone: Some(String::new()),
            email: None,
            ..valid()
        };

        assert!(validate(&draft, Rules { contact: true }).is_empty());
    }

    #[test]
    fn displays_field_keyed_messages() {
        let errors = FormErrors {
            name: Some(NAME_REQUIRED),
            images: Some(IMAGES_REQUIRED),
            ..FormErrors::default()
        };

        assert_eq!(
            errors.to_string(),
            "nom: Le nom est requis; images: Au moins une image est requise",
        );
    }
}
