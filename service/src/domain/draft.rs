//! [`Draft`] definitions.

use serde::Serialize;

use super::residence::{self, Image, Localisation, Price, Residence, Status};

/// In-progress edit of a [`Residence`], not persisted yet.
///
/// Every field is optional, as the draft may be incomplete while being
/// edited. Serializes into the request body expected by the remote service,
/// omitting absent fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Draft {
    /// Name of the [`Residence`].
    #[serde(rename = "residenceNom", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description of the [`Residence`].
    #[serde(
        rename = "residenceDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// [`Price`] of the [`Residence`].
    #[serde(
        rename = "residencePrixDeBase",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_price: Option<Price>,

    /// Postal address of the [`Residence`].
    #[serde(
        rename = "residenceAdresse",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,

    /// Contact phone number of the [`Residence`].
    #[serde(
        rename = "residenceTelephone",
        skip_serializing_if = "Option::is_none"
    )]
    pub telephone: Option<String>,

    /// Contact email of the [`Residence`].
    #[serde(rename = "residenceEmail", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// [`Image`]s of the [`Residence`].
    #[serde(rename = "residenceImages", skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,

    /// [`Localisation`] of the [`Residence`].
    #[serde(
        rename = "residenceLocalisation",
        skip_serializing_if = "Option::is_none"
    )]
    pub localisation: Option<Localisation>,

    /// [`Status`] of the [`Residence`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Draft {
    /// Appends the provided [`Image`]s to this [`Draft`] at once.
    pub fn attach(&mut self, images: impl IntoIterator<Item = Image>) {
        self.images.get_or_insert_with(Vec::new).extend(images);
    }
}

impl From<&Residence> for Draft {
    fn from(residence: &Residence) -> Self {
        Self {
            name: Some(residence.name.clone()),
            description: Some(residence.description.clone()),
            base_price: Some(residence.base_price),
            address: residence.address.clone(),
            telephone: Some(residence.telephone.clone()),
            email: Some(residence.email.clone()),
            images: Some(residence.images.clone()),
            localisation: residence.localisation,
            status: Some(residence.status),
        }
    }
}

/// Mode a [`Draft`] is edited in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EditMode {
    /// [`Draft`] of a new [`Residence`].
    #[default]
    Create,

    /// [`Draft`] of changes to the existing [`Residence`] with this ID.
    Update(residence::Id),
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::domain::residence::{Image, Price};

    use super::Draft;

    #[test]
    fn serializes_present_fields_only() {
        let draft = Draft {
            name: Some("Les Oliviers".into()),
            base_price: Some(Price::from(12_000)),
            ..Draft::default()
        };

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "residenceNom": "Les Oliviers",
                "residencePrixDeBase": 12000,
            }),
        );
    }

    #[test]
    fn attaches_images_after_existing_ones() {
        let mut draft = Draft {
            images: Some(vec![Image::new("a.jpg")]),
            ..Draft::default()
        };

        draft.attach([Image::new("b.jpg"), Image::new("c.jpg")]);

        assert_eq!(
            draft.images.unwrap(),
            vec![Image::new("a.jpg"), Image::new("b.jpg"), Image::new("c.jpg")],
        );
    }
}
