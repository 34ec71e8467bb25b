//! [`Args`] definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service::domain::{
    residence::{self, Image, Localisation, Price},
    Draft,
};

/// Administration console of the agency residences.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run against the remote service.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists the residences.
    List {
        /// Include soft-deleted residences.
        #[arg(long)]
        all: bool,
    },

    /// Shows a single residence.
    Show {
        /// ID of the residence.
        id: residence::Id,
    },

    /// Creates a new residence.
    Create(Fields),

    /// Updates an existing residence.
    Update {
        /// ID of the residence.
        id: residence::Id,

        /// Changed fields.
        #[command(flatten)]
        fields: Fields,
    },

    /// Soft-deletes a residence.
    Delete {
        /// ID of the residence.
        id: residence::Id,
    },

    /// Restores a soft-deleted residence.
    Restore {
        /// ID of the residence.
        id: residence::Id,
    },
}

/// Editable fields of a residence.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct Fields {
    /// Name.
    #[arg(long = "nom")]
    pub name: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Base price.
    #[arg(long = "prix")]
    pub base_price: Option<u64>,

    /// Postal address.
    #[arg(long = "adresse")]
    pub address: Option<String>,

    /// Contact phone number.
    #[arg(long)]
    pub telephone: Option<String>,

    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    /// Latitude in degrees.
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Image URL or name of an image stored by the remote service.
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Local image file to upload inline.
    #[arg(long = "image-file")]
    pub image_files: Vec<PathBuf>,
}

impl Fields {
    /// Applies the provided fields onto the given [`Draft`].
    ///
    /// Image files are left out, as they have to be ingested first.
    pub fn apply(&self, draft: &mut Draft) {
        let Self {
            name,
            description,
            base_price,
            address,
            telephone,
            email,
            latitude,
            longitude,
            images,
            image_files: _,
        } = self;

        if name.is_some() {
            draft.name.clone_from(name);
        }
        if description.is_some() {
            draft.description.clone_from(description);
        }
        if let Some(price) = *base_price {
            draft.base_price = Some(Price::from(price));
        }
        if address.is_some() {
            draft.address.clone_from(address);
        }
        if telephone.is_some() {
            draft.telephone.clone_from(telephone);
        }
        if email.is_some() {
            draft.email.clone_from(email);
        }
        if let (Some(latitude), Some(longitude)) = (*latitude, *longitude) {
            draft.localisation = Some(Localisation {
                latitude,
                longitude,
            });
        }
        if !images.is_empty() {
            draft.attach(images.iter().map(|i| Image::new(i.as_str())));
        }
    }
}
